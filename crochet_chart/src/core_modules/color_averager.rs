// THEORY:
// The `color_averager` module reduces a rectangular block of pixels to a single
// representative color. It is the bridge between the full-resolution source image
// and the blocky, low-resolution raster the pattern is charted from.
//
// Key architectural principles:
// 1.  **Spatial Pooling**: A block of N x N pixels becomes one color. Every
//     channel is pooled independently; alpha is not pooled at all.
// 2.  **Two Averaging Policies**:
//     - `Arithmetic`: the plain mean of the raw channel values.
//     - `Quadratic`: the square root of the mean of squared values. Bright pixels
//       weigh more, so small highlights survive pixelation better.
// 3.  **Inclusive Regions**: The region is iterated corner to corner inclusive,
//     and the divisor is the inclusive area `(dx + 1) * (dy + 1)`.
// 4.  **No Clipping Here**: The caller hands in a region that already lies inside
//     the source. A region that does not is a bug upstream and is reported as
//     `OutOfBounds` instead of being silently clipped.

pub mod color_averager {
    use crate::core_modules::pixel::pixel::{Channel, Pixel};
    use crate::core_modules::pixel_source::PixelSource;
    use crate::core_modules::region::Region;
    use crate::error::ChartError;

    /// How a block's channel values are pooled into one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum AveragingMode {
        /// Mean of raw channel values.
        #[default]
        Arithmetic,
        /// Root mean square of channel values.
        Quadratic,
    }

    impl AveragingMode {
        pub fn from_squared(squared: bool) -> Self {
            if squared {
                AveragingMode::Quadratic
            } else {
                AveragingMode::Arithmetic
            }
        }

        #[inline]
        fn accumulate(self, channel: Channel) -> u64 {
            let value = channel as u64;
            match self {
                AveragingMode::Arithmetic => value,
                AveragingMode::Quadratic => value * value,
            }
        }

        #[inline]
        fn finish(self, sum: u64, area: u64) -> Channel {
            let mean = sum as f64 / area as f64;
            let value = match self {
                AveragingMode::Arithmetic => mean,
                AveragingMode::Quadratic => mean.sqrt(),
            };
            value.round().clamp(0.0, Channel::MAX as f64) as Channel
        }
    }

    /// Averages every pixel of `region` into one fully opaque color.
    pub fn average_color<S: PixelSource + ?Sized>(
        source: &S,
        region: &Region,
        mode: AveragingMode,
    ) -> Result<Pixel, ChartError> {
        let bounds = source.bounds().ok_or(ChartError::EmptyImage)?;
        if !bounds.contains_region(region) {
            let (x, y) = if bounds.contains(region.min_x, region.min_y) {
                (region.max_x, region.max_y)
            } else {
                (region.min_x, region.min_y)
            };
            return Err(ChartError::OutOfBounds { x, y });
        }

        let mut sum_r = 0u64;
        let mut sum_g = 0u64;
        let mut sum_b = 0u64;

        for (x, y) in region.coordinates() {
            let pixel = source.at(x, y).ok_or(ChartError::OutOfBounds { x, y })?;
            sum_r += mode.accumulate(pixel.red);
            sum_g += mode.accumulate(pixel.green);
            sum_b += mode.accumulate(pixel.blue);
        }

        let area = region.area();
        Ok(Pixel::rgb(
            mode.finish(sum_r, area),
            mode.finish(sum_g, area),
            mode.finish(sum_b, area),
        ))
    }
}
