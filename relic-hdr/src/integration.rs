//! Integration with the [image] crate.

use crate::Image;
use ::image::{ImageBuffer, Rgb32FImage};

impl Image {
    /// Convert the image into an [`Rgb32FImage`].
    ///
    /// Returns `None` if the number of values doesn't match the dimensions.
    pub fn into_rgb32f(self) -> Option<Rgb32FImage> {
        ImageBuffer::from_raw(self.width, self.height, self.data)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DecodeSettings, decode};
    use ::image::Rgb;

    #[test]
    fn rgb32f() {
        let data = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\n-Y 1 +X 2\n\x80\x40\x00\x81\x01\x02\x03\x88";
        let image = decode(data, &DecodeSettings::default())
            .unwrap()
            .into_rgb32f()
            .unwrap();

        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(*image.get_pixel(0, 0), Rgb([1.0, 0.5, 0.0]));
        assert_eq!(*image.get_pixel(1, 0), Rgb([1.0, 2.0, 3.0]));
    }
}
