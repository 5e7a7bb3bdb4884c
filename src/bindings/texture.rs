/*! GPU-resident 2D textures created from decoded images. */

use crate::bindings::software::image::ImageData;
use crate::imp;
use crate::pixel_formats::PixelFormatTag;
use crate::pixel_formats::sealed::PixelFormat;
use crate::render::device::BoundDevice;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// The kind of GPU texture a [`QuadTexture`] allocates.
///
/// Only 2D textures exist today; the enum keeps the accessor surface stable
/// if that changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TextureKind {
    D2,
}

/// Wraps a backend allocation failure.
#[derive(Debug)]
pub struct AllocationError(pub(crate) imp::Error);
impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for AllocationError {}

/// Errors produced by [`QuadTexture`] operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TextureError {
    ///An accessor ran before a successful finalize.
    #[error("texture has not been finalized")]
    NotFinalized,
    ///`finalize` ran a second time on the same texture.  Construct a new
    ///texture to re-upload.
    #[error("texture was already finalized")]
    AlreadyFinalized,
    ///The image was empty or malformed; nothing was sent to the GPU.
    #[error("image data is empty or malformed")]
    InvalidSource,
    #[error("GPU texture allocation failed: {0}")]
    Allocation(AllocationError),
}

/// A GPU-resident 2D texture, populated exactly once from an [`ImageData`].
///
/// The texture starts empty. [`finalize`](Self::finalize) allocates the GPU
/// resource and uploads the pixel rows; before that, every accessor except
/// [`is_flipped`](Self::is_flipped) fails with
/// [`TextureError::NotFinalized`]. A second finalize is rejected with
/// [`TextureError::AlreadyFinalized`].
///
/// The GPU handle is exclusively owned: `QuadTexture` is neither `Clone` nor
/// `Copy`, and the resource is released when the value drops.
#[derive(Debug)]
pub struct QuadTexture<Format: PixelFormat> {
    imp: Option<imp::Texture<Format>>,
    ///`None` until someone calls [`Self::set_flip`]; finalize then prefers
    ///the image's own orientation.
    flip_override: Option<bool>,
    flip: bool,
}

impl<Format: PixelFormat> QuadTexture<Format> {
    /// A texture with no GPU resource yet.
    ///
    /// The flip flag defaults to `true` until finalize adopts the image's
    /// detected orientation.
    pub fn new() -> Self {
        Self {
            imp: None,
            flip_override: None,
            flip: true,
        }
    }

    /// Whether uploads vertically reflect the input rows.
    ///
    /// Valid in every state; before finalize it reports the configured
    /// default (or override).
    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    /// Overrides the vertical-flip flag.
    ///
    /// Called before [`finalize`](Self::finalize), this wins over the
    /// image's detected orientation. Called after, it only changes what
    /// [`is_flipped`](Self::is_flipped) reports; the upload has already
    /// happened.
    pub fn set_flip(&mut self, flip: bool) {
        self.flip_override = Some(flip);
        self.flip = flip;
    }

    /// Allocates the GPU texture and uploads `image`'s rows.
    ///
    /// Rows are reversed during upload when the effective flip flag is set,
    /// so the GPU-side texture is always top-down. Fails with
    /// [`TextureError::InvalidSource`] for empty images (checked before any
    /// GPU work), [`TextureError::Allocation`] when the backend rejects the
    /// allocation, and [`TextureError::AlreadyFinalized`] on a second call.
    pub fn finalize(
        &mut self,
        image: &ImageData<Format>,
        device: &Arc<BoundDevice>,
        debug_name: &str,
    ) -> Result<(), TextureError> {
        if self.imp.is_some() {
            return Err(TextureError::AlreadyFinalized);
        }
        if image.is_empty() {
            return Err(TextureError::InvalidSource);
        }
        let flip = self.flip_override.unwrap_or_else(|| image.flipped());
        let imp = imp::Texture::new(
            device,
            image.width(),
            image.height(),
            image.texture_data(),
            flip,
            debug_name,
        )
        .map_err(|e| TextureError::Allocation(AllocationError(e)))?;
        self.imp = Some(imp);
        self.flip = flip;
        Ok(())
    }

    /// The texture kind; 2D for every texture this crate creates.
    pub fn kind(&self) -> Result<TextureKind, TextureError> {
        self.imp
            .as_ref()
            .map(|_| TextureKind::D2)
            .ok_or(TextureError::NotFinalized)
    }

    pub fn width(&self) -> Result<u32, TextureError> {
        self.imp
            .as_ref()
            .map(|t| t.width() as u32)
            .ok_or(TextureError::NotFinalized)
    }

    pub fn height(&self) -> Result<u32, TextureError> {
        self.imp
            .as_ref()
            .map(|t| t.height() as u32)
            .ok_or(TextureError::NotFinalized)
    }

    /// Depth of the texture; 1 for 2D textures.
    pub fn depth(&self) -> Result<u32, TextureError> {
        self.imp
            .as_ref()
            .map(|_| 1)
            .ok_or(TextureError::NotFinalized)
    }

    /// Runtime tag of the texture's pixel format.
    pub fn format(&self) -> Result<PixelFormatTag, TextureError> {
        self.imp
            .as_ref()
            .map(|_| Format::TAG)
            .ok_or(TextureError::NotFinalized)
    }

    /// Handle for the command stream.
    pub(crate) fn render_side(&self) -> Result<imp::TextureRenderSide, TextureError> {
        self.imp
            .as_ref()
            .map(|t| t.render_side())
            .ok_or(TextureError::NotFinalized)
    }
}

impl<Format: PixelFormat> Default for QuadTexture<Format> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel_formats::RGBA8UnormSRGB;

    #[test]
    fn accessors_fail_before_finalize() {
        let texture = QuadTexture::<RGBA8UnormSRGB>::new();
        assert!(matches!(texture.width(), Err(TextureError::NotFinalized)));
        assert!(matches!(texture.height(), Err(TextureError::NotFinalized)));
        assert!(matches!(texture.kind(), Err(TextureError::NotFinalized)));
        assert!(matches!(texture.depth(), Err(TextureError::NotFinalized)));
        assert!(matches!(texture.format(), Err(TextureError::NotFinalized)));
    }

    #[test]
    fn flip_reports_default_before_finalize() {
        let mut texture = QuadTexture::<RGBA8UnormSRGB>::new();
        assert!(texture.is_flipped());
        texture.set_flip(false);
        assert!(!texture.is_flipped());
    }
}

//finalize needs a device; the no-op backend supplies one without a GPU
#[cfg(all(test, not(feature = "backend_wgpu")))]
mod nop_tests {
    use super::*;
    use crate::pixel_formats::{RGBA8UnormSRGB, RGBA8UnormSRGBPixel};

    fn device() -> Arc<BoundDevice> {
        test_executors::spin_on(BoundDevice::system_default()).unwrap()
    }

    fn image() -> ImageData<RGBA8UnormSRGB> {
        ImageData::new_with(2, 2, |_| RGBA8UnormSRGBPixel::ZERO)
    }

    #[test]
    fn finalize_populates_accessors() {
        let device = device();
        let mut texture = QuadTexture::<RGBA8UnormSRGB>::new();
        texture.finalize(&image(), &device, "test").unwrap();
        assert_eq!(texture.width().unwrap(), 2);
        assert_eq!(texture.height().unwrap(), 2);
        assert_eq!(texture.depth().unwrap(), 1);
        assert_eq!(texture.kind().unwrap(), TextureKind::D2);
        assert_eq!(
            texture.format().unwrap(),
            crate::pixel_formats::PixelFormatTag::RGBA8UnormSRGB
        );
        //the image was top-down, so the detected orientation wins
        assert!(!texture.is_flipped());
    }

    #[test]
    fn second_finalize_is_rejected() {
        let device = device();
        let mut texture = QuadTexture::<RGBA8UnormSRGB>::new();
        texture.finalize(&image(), &device, "test").unwrap();
        let err = texture.finalize(&image(), &device, "test");
        assert!(matches!(err, Err(TextureError::AlreadyFinalized)));
        //the original resource is untouched
        assert_eq!(texture.width().unwrap(), 2);
    }

    #[test]
    fn empty_image_is_invalid_source() {
        let device = device();
        let mut texture = QuadTexture::<RGBA8UnormSRGB>::new();
        let empty = ImageData::<RGBA8UnormSRGB>::new_with(0, 0, |_| RGBA8UnormSRGBPixel::ZERO);
        let err = texture.finalize(&empty, &device, "test");
        assert!(matches!(err, Err(TextureError::InvalidSource)));
        //a failed finalize may be retried with corrected input
        texture.finalize(&image(), &device, "test").unwrap();
    }

    #[test]
    fn flip_override_wins_over_detection() {
        let device = device();
        let mut texture = QuadTexture::<RGBA8UnormSRGB>::new();
        texture.set_flip(true);
        texture.finalize(&image(), &device, "test").unwrap();
        assert!(texture.is_flipped());
    }
}
