use image::{imageops::FilterType, DynamicImage};

/// Resampling filter used for every preview
const PREVIEW_FILTER: FilterType = FilterType::Lanczos3;

/// Compute the display size of a `width` x `height` image inside a
/// `max_width` x `max_height` box.
///
/// Landscape images take the full box width, everything else (portrait and
/// square) takes the full box height. The other side follows the aspect ratio,
/// rounded to the nearest pixel and never below 1.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let aspect = width as f64 / height as f64;

    if aspect > 1.0 {
        let new_height = (max_width as f64 / aspect).round() as u32;
        (max_width, new_height.max(1))
    } else {
        let new_width = (max_height as f64 * aspect).round() as u32;
        (new_width.max(1), max_height)
    }
}

/// Resize a decoded image so it fits the preview box.
///
/// Small images are scaled up as well, so the dominant side always matches
/// its bound.
pub fn scale_to_fit(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (new_width, new_height) =
        fit_dimensions(image.width(), image.height(), max_width, max_height);
    image.resize_exact(new_width, new_height, PREVIEW_FILTER)
}
