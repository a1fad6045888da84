use ab_glyph::{FontVec, PxScale};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba};
use imageproc::drawing::draw_text_mut;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Text watermarks are drawn this far from the bottom-right corner,
/// measured from the top-left of the image.
const TEXT_OFFSET_X: u32 = 300;
const TEXT_OFFSET_Y: u32 = 200;

/// Margin between a pasted logo and the bottom/right edges of the base image.
const LOGO_MARGIN: u32 = 100;

/// A logo may occupy at most 1/8 of each base image dimension.
const LOGO_SHRINK_DIVISOR: u32 = 8;

// Candidate paths for the watermark typeface, tried in order. The app has no
// bundled assets, so a system font it is.
const FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("no usable watermark font found on this system")]
    FontUnavailable,

    #[error("could not determine the image format of {0}")]
    UnknownFormat(PathBuf),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes an image from disk, remembering the on-disk format so the
/// watermarked result can be written back in the same encoding.
pub fn open_image(path: &Path) -> Result<(DynamicImage, ImageFormat), CompositorError> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| CompositorError::UnknownFormat(path.to_path_buf()))?;
    let img = reader.decode()?;
    Ok((img, format))
}

/// Scales an image to fit within `max_w` x `max_h` while preserving its aspect
/// ratio, returning the scaled copy together with the scale factor applied.
/// Images smaller than the bounds are enlarged.
pub fn resize_for_display(img: &DynamicImage, max_w: u32, max_h: u32) -> (DynamicImage, f32) {
    let (w, h) = (img.width(), img.height());
    let ratio = (max_w as f32 / w as f32).min(max_h as f32 / h as f32);

    // Truncate like the ratio math implies, but never collapse a dimension to
    // zero on extreme aspect ratios.
    let new_w = ((w as f32 * ratio) as u32).max(1);
    let new_h = ((h as f32 * ratio) as u32).max(1);

    let scaled = img.resize_exact(new_w, new_h, FilterType::Triangle);
    (scaled, ratio)
}

/// Draws `text` near the bottom-right corner of the image and returns the new
/// buffer. The anchor sits at `(width - 300, height - 200)`, clamped to the
/// top-left corner for images smaller than those offsets.
pub fn apply_text_overlay(
    img: DynamicImage,
    text: &str,
    font_size: f32,
    color: Rgba<u8>,
) -> Result<DynamicImage, CompositorError> {
    let font = load_watermark_font()?;

    let x = img.width().saturating_sub(TEXT_OFFSET_X);
    let y = img.height().saturating_sub(TEXT_OFFSET_Y);

    let mut canvas = img.into_rgba8();
    draw_text_mut(
        &mut canvas,
        color,
        x as i32,
        y as i32,
        PxScale::from(font_size),
        &font,
        text,
    );

    Ok(DynamicImage::ImageRgba8(canvas))
}

/// Pastes `logo` near the bottom-right corner of `base` and returns the new
/// buffer. The logo is first shrunk (never enlarged, aspect preserved) so that
/// neither dimension exceeds 1/8 of the corresponding base dimension, then
/// placed 100px in from the bottom and right edges. The position is clamped to
/// the top-left corner for undersized base images.
pub fn apply_logo_overlay(base: DynamicImage, logo: &DynamicImage) -> DynamicImage {
    let max_w = (base.width() / LOGO_SHRINK_DIVISOR).max(1);
    let max_h = (base.height() / LOGO_SHRINK_DIVISOR).max(1);

    let logo = if logo.width() > max_w || logo.height() > max_h {
        logo.thumbnail(max_w, max_h)
    } else {
        logo.clone()
    };

    let x = base.width().saturating_sub(logo.width() + LOGO_MARGIN);
    let y = base.height().saturating_sub(logo.height() + LOGO_MARGIN);

    let mut canvas = base.into_rgba8();
    image::imageops::overlay(&mut canvas, &logo, x as i64, y as i64);

    DynamicImage::ImageRgba8(canvas)
}

/// Maps a source format to the file extension used for the saved watermark.
/// JPEG is special-cased to "jpg"; everything else uses its canonical
/// lowercase extension.
pub fn resolve_save_format(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpg",
        other => other.extensions_str().first().copied().unwrap_or("png"),
    }
}

fn load_watermark_font() -> Result<FontVec, CompositorError> {
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        if !path.is_file() {
            continue;
        }
        match fs::read(path) {
            Ok(bytes) => match FontVec::try_from_vec(bytes) {
                Ok(font) => {
                    log::debug!("Using watermark font: {}", path.display());
                    return Ok(font);
                }
                Err(e) => log::warn!("Ignoring unparseable font {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Failed to read font {}: {}", path.display(), e),
        }
    }
    Err(CompositorError::FontUnavailable)
}
