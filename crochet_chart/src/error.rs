use thiserror::Error;

/// Everything that can go wrong while charting an image.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("block size must be greater than zero, got {0}")]
    InvalidBlockSize(u32),

    /// A region or coordinate fell outside the source image. Clipping and
    /// clamping make this unreachable from the pipeline; seeing it means a bug.
    #[error("coordinate ({x}, {y}) lies outside the image bounds")]
    OutOfBounds { x: u32, y: u32 },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0} is not implemented yet")]
    NotImplemented(&'static str),

    #[error("pixelation worker failed: {0}")]
    Worker(String),
}
