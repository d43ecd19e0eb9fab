/// Image previews
///
/// iced wants RGBA pixels, our bitmaps are RGB. Convert once per upload and
/// keep the handle; views only clone the handle.

use iced::widget::image::Handle;
use iced::widget::Image;
use iced::{ContentFit, Element};
use image::{DynamicImage, RgbImage};

/// Build an iced image handle from an RGB bitmap
pub fn bitmap_handle(bitmap: &RgbImage) -> Handle {
    let rgba = DynamicImage::ImageRgb8(bitmap.clone()).into_rgba8();
    let (width, height) = rgba.dimensions();
    Handle::from_rgba(width, height, rgba.into_raw())
}

/// Square preview box; the image keeps its aspect ratio inside it
pub fn preview<'a, Message: 'a>(handle: &Handle, size: u32) -> Element<'a, Message> {
    Image::new(handle.clone())
        .width(size as f32)
        .height(size as f32)
        .content_fit(ContentFit::Contain)
        .into()
}
