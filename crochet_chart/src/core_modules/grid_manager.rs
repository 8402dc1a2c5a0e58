// THEORY:
// The `GridManager` module owns the partition of an image into fixed-size square
// blocks and runs the pixelation pass over it. It is the first stage of the
// charting pipeline: raw image in, flat-color raster out.
//
// Key architectural principles:
// 1.  **Partitioning**: `BlockGrid` slices the image bounds into a grid of
//     `block_size` squares starting at the image origin. The last column and row
//     are clipped to the image edge, so blocks never overlap and never leave the
//     image. Every pixel belongs to exactly one block.
// 2.  **Orchestration**: `pixelate` is not an analyzer itself. It walks the grid,
//     asks the color averager for one color per block and paints that color into
//     every pixel of the block in a fresh raster.
// 3.  **Pure Function**: The source is only read. The output raster has the same
//     dimensions as the source, with its origin at `(0, 0)`.
// 4.  **Band Access**: Blocks can be enumerated by ranges of block rows, which is
//     what lets the parallel pipeline hand disjoint bands to different workers.

use crate::core_modules::color_averager::color_averager::{AveragingMode, average_color};
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_source::PixelSource;
use crate::core_modules::region::Region;
use crate::error::ChartError;
use image::RgbaImage;
use log::debug;
use std::ops::Range;

/// The partition of an image's bounds into square blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    /// The bounds of the source image being partitioned.
    bounds: Region,
    /// The side length of one block in pixels.
    block_size: u32,
    /// The width of the grid in blocks (image width / block size, rounded up).
    grid_width: u32,
    /// The height of the grid in blocks (image height / block size, rounded up).
    grid_height: u32,
}

impl BlockGrid {
    pub fn new(bounds: Region, block_size: u32) -> Result<Self, ChartError> {
        if block_size == 0 {
            return Err(ChartError::InvalidBlockSize(block_size));
        }
        Ok(Self {
            bounds,
            block_size,
            grid_width: bounds.width().div_ceil(block_size),
            grid_height: bounds.height().div_ceil(block_size),
        })
    }

    pub fn bounds(&self) -> Region {
        self.bounds
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    pub fn num_blocks(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// The clipped region of the block at `(block_x, block_y)` in grid units.
    pub fn block_at(&self, block_x: u32, block_y: u32) -> Region {
        let min_x = self.bounds.min_x + block_x * self.block_size;
        let min_y = self.bounds.min_y + block_y * self.block_size;
        Region {
            min_x,
            min_y,
            max_x: min_x
                .saturating_add(self.block_size - 1)
                .min(self.bounds.max_x),
            max_y: min_y
                .saturating_add(self.block_size - 1)
                .min(self.bounds.max_y),
        }
    }

    /// The clipped region of the block with the given row-major index.
    pub fn block(&self, block_index: usize) -> Region {
        let block_y = (block_index / self.grid_width as usize) as u32;
        let block_x = (block_index % self.grid_width as usize) as u32;
        self.block_at(block_x, block_y)
    }

    /// All blocks in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = Region> + '_ {
        self.blocks_in_rows(0..self.grid_height)
    }

    /// The blocks of the given grid rows, in row-major order.
    pub fn blocks_in_rows(&self, rows: Range<u32>) -> impl Iterator<Item = Region> + '_ {
        let rows = rows.start.min(self.grid_height)..rows.end.min(self.grid_height);
        rows.flat_map(move |block_y| {
            (0..self.grid_width).map(move |block_x| self.block_at(block_x, block_y))
        })
    }
}

/// Builds the output raster for `grid`'s bounds, fully transparent until painted.
pub(crate) fn blank_raster(grid: &BlockGrid) -> RgbaImage {
    let bounds = grid.bounds();
    RgbaImage::new(bounds.width(), bounds.height())
}

/// Fills every pixel of `block` in `raster` with `color`.
/// `block` is in source coordinates; the raster's origin is the grid's minimum corner.
pub(crate) fn paint_block(raster: &mut RgbaImage, grid: &BlockGrid, block: &Region, color: Pixel) {
    let origin = grid.bounds();
    let rgba: image::Rgba<u8> = color.into();
    for (x, y) in block.coordinates() {
        raster.put_pixel(x - origin.min_x, y - origin.min_y, rgba);
    }
}

/// Pixelates `source` into blocks of `block_size`, pooling each with `mode`.
pub fn pixelate<S: PixelSource + ?Sized>(
    source: &S,
    block_size: u32,
    mode: AveragingMode,
) -> Result<RgbaImage, ChartError> {
    if block_size == 0 {
        return Err(ChartError::InvalidBlockSize(block_size));
    }
    let bounds = source.bounds().ok_or(ChartError::EmptyImage)?;
    let grid = BlockGrid::new(bounds, block_size)?;
    debug!(
        "pixelating {}x{} image into {}x{} blocks of {}px ({:?})",
        bounds.width(),
        bounds.height(),
        grid.grid_width(),
        grid.grid_height(),
        block_size,
        mode
    );

    let mut raster = blank_raster(&grid);
    for block in grid.blocks() {
        let color = average_color(source, &block, mode)?;
        paint_block(&mut raster, &grid, &block, color);
    }

    Ok(raster)
}
