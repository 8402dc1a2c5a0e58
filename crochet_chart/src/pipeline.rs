// THEORY:
// The `pipeline` module is the top-level API for the charting engine. It wires the
// stages together in their only valid order:
//
//   color averager -> pixelator -> spiral traversal -> pattern -> histogram
//
// and hands back both the pixelated raster (for export) and the chart built from it.
// Configuration is validated once, up front, so no stage ever sees a zero block size.

use crate::core_modules::color_averager::color_averager::AveragingMode;
use crate::core_modules::grid_manager;
use crate::core_modules::histogram::{ColorHistogram, histogram};
use crate::core_modules::pattern::{Pattern, Row, build_pattern, sample_row};
use crate::core_modules::pixel_source::PixelSource;
use crate::core_modules::spiral::SpiralTraversal;
use crate::error::ChartError;
use image::RgbaImage;
use log::{info, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::pattern::Tile;
pub use crate::core_modules::pixel::pixel::Pixel;
pub use crate::core_modules::region::Region;
pub use crate::core_modules::spiral::Coordinate;

pub const DEFAULT_BLOCK_SIZE: u32 = 120;
pub const DEFAULT_PATTERN_NAME: &str = "My Crochet Pattern";

/// Configuration for the ChartPipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    /// Side length in pixels of one pixelated block, and the spiral's step.
    pub block_size: u32,
    /// How each block's pixels are pooled.
    pub averaging: AveragingMode,
    /// The label the finished pattern carries.
    pub pattern_name: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            averaging: AveragingMode::Arithmetic,
            pattern_name: DEFAULT_PATTERN_NAME.to_string(),
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.block_size == 0 {
            return Err(ChartError::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}

/// Everything produced from one source image.
#[derive(Debug, Clone)]
pub struct ChartReport {
    /// The flat-color raster the pattern was charted from.
    pub pixelated: RgbaImage,
    /// The increase phase of the chart.
    pub pattern: Pattern,
    /// Tiles per color across `pattern`.
    pub color_counts: ColorHistogram,
}

/// The main, top-level struct for the charting engine.
pub struct ChartPipeline {
    config: ChartConfig,
}

impl ChartPipeline {
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Pixelates `source` with the configured block size and averaging mode.
    pub fn pixelate<S: PixelSource + ?Sized>(&self, source: &S) -> Result<RgbaImage, ChartError> {
        grid_manager::pixelate(source, self.config.block_size, self.config.averaging)
    }

    /// Charts an already pixelated raster.
    pub fn chart(&self, pixelated: &RgbaImage) -> Result<Pattern, ChartError> {
        let bounds = PixelSource::bounds(pixelated).ok_or(ChartError::EmptyImage)?;
        let traversal = SpiralTraversal::new(bounds, self.config.block_size)?;
        build_pattern(&traversal, pixelated, &self.config.pattern_name)
    }

    pub fn generate_report<S: PixelSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<ChartReport, ChartError> {
        // Stage 1: Pixelation
        let pixelated = self.pixelate(source)?;
        self.report_from_pixelated(pixelated)
    }

    /// Charts a raster that is already pixelated with the configured block size.
    pub fn report_from_pixelated(&self, pixelated: RgbaImage) -> Result<ChartReport, ChartError> {
        // Stage 2: Spiral charting
        let pattern = self.chart(&pixelated)?;

        // Stage 3: Color counting
        let color_counts = histogram(&pattern);

        info!(
            "charted '{}': {} rows, {} tiles, {} colors",
            pattern.name(),
            pattern.rows().len(),
            pattern.tile_count(),
            color_counts.len()
        );

        Ok(ChartReport {
            pixelated,
            pattern,
            color_counts,
        })
    }

    /// The rows that would close the chart from its widest row to the far corner.
    /// This phase is not defined yet and always fails with `NotImplemented`.
    pub fn closing_rows(&self, report: &ChartReport) -> Result<Vec<Row>, ChartError> {
        let bounds = PixelSource::bounds(&report.pixelated).ok_or(ChartError::EmptyImage)?;
        let traversal = SpiralTraversal::new(bounds, self.config.block_size)?;
        let coordinate_rows = traversal.decrease_rows().inspect_err(|error| {
            warn!("closing rows requested for '{}': {}", report.pattern.name(), error)
        })?;
        coordinate_rows
            .iter()
            .map(|coordinates| sample_row(&report.pixelated, coordinates))
            .collect()
    }
}
