// THEORY:
// The `Pixel` module is the most fundamental unit of the charting system. It is a
// "dumb" data container for a single RGBA sample. Every other stage either reads
// pixels (the averager, the spiral) or writes them (the pixelator).
//
// Key principles:
// 1) 8-bit channels only: no color-space conversion happens anywhere in the crate.
// 2) Alpha is carried but never averaged; pixelated output is always fully opaque.
// 3) The hex form (`#rrggbb`) is the identity of a color in a pattern histogram.

pub mod pixel {
    pub type Byte = u8;
    pub type Bytes = Vec<Byte>;
    pub type Channel = Byte;
    pub type Hex = String;

    const CHANNELS: usize = 4;
    pub const OPAQUE: Channel = Channel::MAX;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// A fully opaque pixel.
        pub fn rgb(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel::new(red, green, blue, OPAQUE)
        }

        /// The `#rrggbb` key used by the color histogram. Alpha is ignored.
        pub fn to_hex(&self) -> Hex {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        }
    }

    impl TryFrom<&[Byte]> for Pixel {
        type Error = usize;

        /// Fails with the offending length when the slice is not exactly RGBA.
        fn try_from(bytes: &[Byte]) -> Result<Self, Self::Error> {
            if bytes.len() != CHANNELS {
                return Err(bytes.len());
            }
            Ok(Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3]))
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            vec![pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }

    impl From<image::Rgba<u8>> for Pixel {
        fn from(rgba: image::Rgba<u8>) -> Self {
            let [red, green, blue, alpha] = rgba.0;
            Pixel::new(red, green, blue, alpha)
        }
    }

    impl From<Pixel> for image::Rgba<u8> {
        fn from(pixel: Pixel) -> Self {
            image::Rgba([pixel.red, pixel.green, pixel.blue, pixel.alpha])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn hex_is_lowercase_and_ignores_alpha() {
        assert_eq!(Pixel::new(255, 0, 171, 12).to_hex(), "#ff00ab");
        assert_eq!(Pixel::rgb(1, 2, 3).to_hex(), "#010203");
    }

    #[test]
    fn bytes_must_be_exactly_four_channels() {
        let bytes: &[u8] = &[10, 20, 30, 40];
        assert_eq!(Pixel::try_from(bytes), Ok(Pixel::new(10, 20, 30, 40)));

        let short: &[u8] = &[10, 20, 30];
        assert_eq!(Pixel::try_from(short), Err(3));
    }

    #[test]
    fn converts_to_and_from_image_rgba() {
        let pixel = Pixel::new(9, 8, 7, 6);
        let rgba: image::Rgba<u8> = pixel.into();
        assert_eq!(rgba.0, [9, 8, 7, 6]);
        assert_eq!(Pixel::from(rgba), pixel);
        assert_eq!(Bytes::from(pixel), vec![9, 8, 7, 6]);
    }
}
