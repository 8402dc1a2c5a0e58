// THEORY:
// The parallel pipeline spreads the pixelation pass over a pool of blocking tokio
// tasks. Pixelation is the only stage whose cost grows with the pixel count, so it
// is the only one worth splitting.
//
// Key architectural principles:
// 1.  **Disjoint Bands**: The block grid is cut into contiguous bands of block rows,
//     one per worker. Blocks never overlap, so no two workers ever touch the same
//     pixel.
// 2.  **Read-Only Sharing**: Workers share the source through an `Arc` and only read
//     it. Each returns its band's colors; the raster is painted afterwards on the
//     calling task, so every output pixel is still written exactly once.
// 3.  **Same Answer**: The output is identical to `grid_manager::pixelate`.

use crate::core_modules::color_averager::color_averager::{AveragingMode, average_color};
use crate::core_modules::grid_manager::{BlockGrid, blank_raster, paint_block};
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_source::PixelSource;
use crate::core_modules::region::Region;
use crate::error::ChartError;
use futures::future::join_all;
use image::RgbaImage;
use log::debug;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Upper bound on concurrent pixelation tasks.
    pub workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
        }
    }
}

type Band = Vec<(Region, Pixel)>;

/// Pixelates `source` on up to `config.workers` blocking tasks.
pub async fn pixelate_parallel<S>(
    source: Arc<S>,
    block_size: u32,
    mode: AveragingMode,
    config: &ParallelConfig,
) -> Result<RgbaImage, ChartError>
where
    S: PixelSource + Send + Sync + 'static,
{
    if block_size == 0 {
        return Err(ChartError::InvalidBlockSize(block_size));
    }
    let bounds = source.bounds().ok_or(ChartError::EmptyImage)?;
    let grid = BlockGrid::new(bounds, block_size)?;

    let workers = config.workers.clamp(1, grid.grid_height() as usize) as u32;
    let rows_per_band = grid.grid_height().div_ceil(workers);
    debug!(
        "pixelating {} block rows on {} workers ({:?})",
        grid.grid_height(),
        workers,
        mode
    );

    let tasks = (0..workers).map(|band| {
        let source = Arc::clone(&source);
        let start = band * rows_per_band;
        let end = (start + rows_per_band).min(grid.grid_height());
        tokio::task::spawn_blocking(move || -> Result<Band, ChartError> {
            grid.blocks_in_rows(start..end)
                .map(|block| average_color(&*source, &block, mode).map(|color| (block, color)))
                .collect()
        })
    });

    let mut raster = blank_raster(&grid);
    for joined in join_all(tasks).await {
        let band = joined.map_err(|error| ChartError::Worker(error.to_string()))??;
        for (block, color) in band {
            paint_block(&mut raster, &grid, &block, color);
        }
    }

    Ok(raster)
}

/// Both pixelated variants of `source`: arithmetic first, quadratic second.
pub async fn pixelate_variants<S>(
    source: Arc<S>,
    block_size: u32,
    config: &ParallelConfig,
) -> Result<(RgbaImage, RgbaImage), ChartError>
where
    S: PixelSource + Send + Sync + 'static,
{
    futures::try_join!(
        pixelate_parallel(Arc::clone(&source), block_size, AveragingMode::Arithmetic, config),
        pixelate_parallel(source, block_size, AveragingMode::Quadratic, config),
    )
}
