use crate::compositor::{self, CompositorError};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

/// Filename stem for the exported result; the extension depends on the source
/// format of the imported image.
const OUTPUT_STEM: &str = "watermarked_image";

/// Where the session currently stands. Controls which actions the UI offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    NoImage,
    Loaded,
    OverlayApplied,
}

/// The single editing session: one image at a time, replaced wholesale on
/// import. Overlays go through [`Session::apply_overlay`] so the phase can
/// only advance together with the buffer.
#[derive(Default)]
pub struct Session {
    image: Option<DynamicImage>,
    format: Option<ImageFormat>,
    phase: SessionPhase,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    /// Replaces whatever was loaded before and resets any applied overlay.
    pub fn import(&mut self, image: DynamicImage, format: ImageFormat) {
        self.image = Some(image);
        self.format = Some(format);
        self.phase = SessionPhase::Loaded;
    }

    /// Runs an overlay transform over the current image. Returns `false` when
    /// no image is loaded. The buffer is only swapped in when the transform
    /// succeeds, so a failed overlay leaves the session untouched.
    pub fn apply_overlay<F>(&mut self, op: F) -> Result<bool, CompositorError>
    where
        F: FnOnce(DynamicImage) -> Result<DynamicImage, CompositorError>,
    {
        let Some(image) = self.image.clone() else {
            return Ok(false);
        };
        self.image = Some(op(image)?);
        self.phase = SessionPhase::OverlayApplied;
        Ok(true)
    }

    /// Writes `watermarked_image.<ext>` into `dir`, overwriting any previous
    /// file of that name. Returns `Ok(None)` without touching the filesystem
    /// when no overlay has been applied yet.
    pub fn save_watermarked(&self, dir: &Path) -> Result<Option<PathBuf>, CompositorError> {
        if self.phase != SessionPhase::OverlayApplied {
            return Ok(None);
        }
        let (Some(image), Some(format)) = (self.image.as_ref(), self.format) else {
            return Ok(None);
        };

        let ext = compositor::resolve_save_format(format);
        let path = dir.join(format!("{}.{}", OUTPUT_STEM, ext));

        // The JPEG encoder rejects alpha channels, so flatten to RGB first.
        if format == ImageFormat::Jpeg {
            image.to_rgb8().save_with_format(&path, format)?;
        } else {
            image.save_with_format(&path, format)?;
        }

        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::apply_logo_overlay;
    use image::{Rgba, RgbaImage};

    fn solid(w: u32, h: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(color)))
    }

    #[test]
    fn starts_empty() {
        let session = Session::default();
        assert_eq!(session.phase(), SessionPhase::NoImage);
        assert!(session.image().is_none());
    }

    #[test]
    fn import_resets_overlay_state() {
        let mut session = Session::default();
        session.import(solid(400, 300, [0, 0, 0, 255]), ImageFormat::Png);
        assert_eq!(session.phase(), SessionPhase::Loaded);

        let applied = session
            .apply_overlay(|img| Ok(apply_logo_overlay(img, &solid(32, 32, [255, 0, 0, 255]))))
            .unwrap();
        assert!(applied);
        assert_eq!(session.phase(), SessionPhase::OverlayApplied);

        session.import(solid(400, 300, [0, 0, 0, 255]), ImageFormat::Png);
        assert_eq!(session.phase(), SessionPhase::Loaded);
    }

    #[test]
    fn overlay_without_image_is_a_noop() {
        let mut session = Session::default();
        let applied = session
            .apply_overlay(|img| Ok(img))
            .unwrap();
        assert!(!applied);
        assert_eq!(session.phase(), SessionPhase::NoImage);
    }

    #[test]
    fn failed_overlay_leaves_session_untouched() {
        let mut session = Session::default();
        session.import(solid(400, 300, [9, 9, 9, 255]), ImageFormat::Png);

        let result = session.apply_overlay(|_| Err(CompositorError::FontUnavailable));
        assert!(result.is_err());
        assert_eq!(session.phase(), SessionPhase::Loaded);
        assert_eq!(session.image().unwrap().width(), 400);
    }

    #[test]
    fn save_without_overlay_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::default();
        assert!(session.save_watermarked(dir.path()).unwrap().is_none());

        session.import(solid(400, 300, [0, 0, 0, 255]), ImageFormat::Png);
        assert!(session.save_watermarked(dir.path()).unwrap().is_none());

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_writes_png_with_resolved_extension() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::default();
        session.import(solid(400, 300, [0, 0, 0, 255]), ImageFormat::Png);
        session
            .apply_overlay(|img| Ok(apply_logo_overlay(img, &solid(32, 32, [255, 0, 0, 255]))))
            .unwrap();

        let path = session.save_watermarked(dir.path()).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "watermarked_image.png");
        assert!(path.is_file());
    }

    #[test]
    fn save_flattens_jpeg_alpha() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = Session::default();
        session.import(solid(400, 300, [10, 20, 30, 255]), ImageFormat::Jpeg);
        session
            .apply_overlay(|img| Ok(apply_logo_overlay(img, &solid(32, 32, [255, 0, 0, 255]))))
            .unwrap();

        let path = session.save_watermarked(dir.path()).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "watermarked_image.jpg");

        let (reloaded, format) = compositor::open_image(&path).unwrap();
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!((reloaded.width(), reloaded.height()), (400, 300));
    }
}
