//! Integration with the [image] crate.

use crate::{Image, Samples};
use ::image::{DynamicImage, ImageBuffer};

impl Image {
    /// Convert the image into a [`DynamicImage`].
    ///
    /// One channel is treated as grayscale, two as grayscale with alpha, three
    /// as RGB and four as RGBA. Returns `None` for any other number of
    /// channels.
    pub fn into_dynamic_image(self) -> Option<DynamicImage> {
        let (width, height) = (self.width, self.height);

        let image = match (self.samples, self.channels) {
            (Samples::U8(s), 1) => DynamicImage::ImageLuma8(ImageBuffer::from_raw(width, height, s)?),
            (Samples::U8(s), 2) => {
                DynamicImage::ImageLumaA8(ImageBuffer::from_raw(width, height, s)?)
            }
            (Samples::U8(s), 3) => DynamicImage::ImageRgb8(ImageBuffer::from_raw(width, height, s)?),
            (Samples::U8(s), 4) => {
                DynamicImage::ImageRgba8(ImageBuffer::from_raw(width, height, s)?)
            }
            (Samples::U16(s), 1) => {
                DynamicImage::ImageLuma16(ImageBuffer::from_raw(width, height, s)?)
            }
            (Samples::U16(s), 2) => {
                DynamicImage::ImageLumaA16(ImageBuffer::from_raw(width, height, s)?)
            }
            (Samples::U16(s), 3) => {
                DynamicImage::ImageRgb16(ImageBuffer::from_raw(width, height, s)?)
            }
            (Samples::U16(s), 4) => {
                DynamicImage::ImageRgba16(ImageBuffer::from_raw(width, height, s)?)
            }
            _ => return None,
        };

        Some(image)
    }
}
