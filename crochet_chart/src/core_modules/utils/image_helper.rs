// The file-format edge of the crate: bytes in, pixel source out, and a pixelated
// raster back to lossless PNG bytes. Nothing else in the crate names a format.

pub mod image_helper {
    use crate::error::ChartError;
    use image::{DynamicImage, ImageEncoder, RgbaImage};
    use std::path::Path;

    /// Decodes any format the `image` crate recognises.
    pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ChartError> {
        image::load_from_memory(bytes).map_err(ChartError::Decode)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage, ChartError> {
        let bytes = std::fs::read(path)?;
        decode(&bytes)
    }

    /// Encodes `raster` as an RGBA8 PNG, keeping every pixel value exactly.
    pub fn encode_png(raster: &RgbaImage) -> Result<Vec<u8>, ChartError> {
        let mut bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
        encoder
            .write_image(
                raster.as_raw(),
                raster.width(),
                raster.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(ChartError::Encode)?;
        Ok(bytes)
    }

    pub fn save(path: impl AsRef<Path>, raster: &RgbaImage) -> Result<(), ChartError> {
        let bytes = encode_png(raster)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
