// THEORY:
// `PixelSource` is the capability the charting core needs from an image: its
// bounds and a point sampler. Decoding lives elsewhere, so anything that can
// answer these two questions (a decoded PNG, a pixelated raster, a synthetic test
// pattern) can drive the averager, the pixelator and the spiral.

use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::region::Region;
use image::{DynamicImage, RgbaImage};

/// Read-only access to a rectangular grid of pixels.
pub trait PixelSource {
    /// Inclusive bounds of the buffer, `None` when it holds no pixels.
    fn bounds(&self) -> Option<Region>;

    /// The pixel at `(x, y)`, `None` outside the bounds.
    fn at(&self, x: u32, y: u32) -> Option<Pixel>;
}

impl PixelSource for RgbaImage {
    fn bounds(&self) -> Option<Region> {
        Region::from_dimensions(self.width(), self.height())
    }

    fn at(&self, x: u32, y: u32) -> Option<Pixel> {
        self.get_pixel_checked(x, y).map(|rgba| Pixel::from(*rgba))
    }
}

impl PixelSource for DynamicImage {
    fn bounds(&self) -> Option<Region> {
        Region::from_dimensions(self.width(), self.height())
    }

    fn at(&self, x: u32, y: u32) -> Option<Pixel> {
        if !image::GenericImageView::in_bounds(self, x, y) {
            return None;
        }
        Some(Pixel::from(image::GenericImageView::get_pixel(self, x, y)))
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn bounds(&self) -> Option<Region> {
        (**self).bounds()
    }

    fn at(&self, x: u32, y: u32) -> Option<Pixel> {
        (**self).at(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_image_reports_inclusive_bounds() {
        let image = RgbaImage::from_pixel(4, 3, image::Rgba([1, 2, 3, 4]));
        assert_eq!(image.bounds(), Some(Region::new(0, 0, 3, 2).unwrap()));
        assert_eq!(image.at(3, 2), Some(Pixel::new(1, 2, 3, 4)));
        assert_eq!(image.at(4, 2), None);
    }

    #[test]
    fn dynamic_image_samples_as_rgba() {
        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([200]));
        let dynamic = DynamicImage::ImageLuma8(gray);
        assert_eq!(dynamic.at(1, 1), Some(Pixel::rgb(200, 200, 200)));
        assert_eq!(dynamic.at(2, 0), None);
    }

    #[test]
    fn empty_image_has_no_bounds() {
        let image = RgbaImage::new(0, 5);
        assert_eq!(image.bounds(), None);
    }
}
