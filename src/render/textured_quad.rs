/*! A mediator object composing a texture, a quad, and a transform. */

use crate::bindings::sampler::SamplerType;
use crate::bindings::slot::SlotKey;
use crate::bindings::software::image::{ImageData, ImageSource, LoadError, ResourceBundle};
use crate::bindings::texture::{QuadTexture, TextureError, TextureKind};
use crate::pixel_formats::{PixelFormatTag, RGBA8UnormSRGB};
use crate::render::command_list::{Command, CommandList};
use crate::render::coordinates::{Rect, Size};
use crate::render::device::BoundDevice;
use crate::render::quad::{CreateError, Quad};
use crate::render::transform::{Orientation, QuadTransform};
use glam::{Mat4, Vec3};
use std::path::PathBuf;
use std::sync::Arc;

/// Why a facade failed to reach the ready state.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FinalizeFailure {
    #[error("image load failed: {0}")]
    Load(#[from] LoadError),
    #[error("quad creation failed: {0}")]
    Quad(#[from] CreateError),
    #[error("texture finalize failed: {0}")]
    Texture(#[from] TextureError),
}

/// Errors surfaced by facade accessors and `encode`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FacadeError {
    ///The facade never finalized; see
    ///[`TexturedQuad::failure`] for the recorded cause.
    #[error("textured quad is not finalized")]
    NotFinalized,
}

#[derive(Debug)]
enum State {
    Ready { quad: Quad },
    Invalid { failure: FinalizeFailure },
}

/// A textured quad behind a single-call interface.
///
/// Construction loads the image, builds the quad geometry, and finalizes
/// the texture. If any step fails the facade comes back in a terminal
/// `Invalid` state instead of an error: every accessor then fails with
/// [`FacadeError::NotFinalized`] (except [`is_flipped`](Self::is_flipped)),
/// [`encode`](Self::encode) records nothing, and the only way to retry is
/// to construct a new facade.
///
/// While ready, the facade keeps a cached MVP matrix that is recomputed
/// whenever the bounds (and hence the aspect ratio) change — call
/// [`set_bounds`](Self::set_bounds) before the first encode and again on
/// every presentation-surface resize or rotation.
#[derive(Debug)]
pub struct TexturedQuad {
    texture: QuadTexture<RGBA8UnormSRGB>,
    transform: QuadTransform,
    sampler: SamplerType,
    matrix: [[f32; 4]; 4],
    state: State,
}

impl TexturedQuad {
    /// A quad textured with the bundle's `Default.jpg`.
    pub async fn new(device: &Arc<BoundDevice>, priority: async_file::Priority) -> Self {
        Self::with_source(
            ImageSource::bundled("", ""),
            &ResourceBundle::main(),
            device,
            priority,
        )
        .await
    }

    /// A quad textured with the image at an absolute path.
    ///
    /// An empty path leaves the facade invalid with
    /// [`LoadError::InvalidSource`] recorded; no GPU work happens.
    pub async fn with_path(
        path: impl Into<PathBuf>,
        device: &Arc<BoundDevice>,
        priority: async_file::Priority,
    ) -> Self {
        Self::with_source(
            ImageSource::Path(path.into()),
            &ResourceBundle::main(),
            device,
            priority,
        )
        .await
    }

    /// A quad textured with `name.ext` from the main bundle.
    ///
    /// Empty components default to `"Default"` / `"jpg"`.
    pub async fn with_resource(
        name: &str,
        ext: &str,
        device: &Arc<BoundDevice>,
        priority: async_file::Priority,
    ) -> Self {
        Self::with_source(
            ImageSource::bundled(name, ext),
            &ResourceBundle::main(),
            device,
            priority,
        )
        .await
    }

    /// The general constructor: any source against any bundle.
    pub async fn with_source(
        source: ImageSource,
        bundle: &ResourceBundle,
        device: &Arc<BoundDevice>,
        priority: async_file::Priority,
    ) -> Self {
        let mut texture = QuadTexture::new();
        let state = match Self::build(&mut texture, &source, bundle, device, priority).await {
            Ok(quad) => State::Ready { quad },
            Err(failure) => {
                logwise::debuginternal_sync!(
                    "textured quad entering invalid state: {failure}",
                    failure = logwise::privacy::LogIt(&failure)
                );
                State::Invalid { failure }
            }
        };
        let transform = QuadTransform::default();
        let matrix = match &state {
            State::Ready { quad } => Self::compute_matrix(&transform, quad),
            State::Invalid { .. } => Mat4::IDENTITY.to_cols_array_2d(),
        };
        Self {
            texture,
            transform,
            sampler: SamplerType::Bilinear,
            matrix,
            state,
        }
    }

    async fn build(
        texture: &mut QuadTexture<RGBA8UnormSRGB>,
        source: &ImageSource,
        bundle: &ResourceBundle,
        device: &Arc<BoundDevice>,
        priority: async_file::Priority,
    ) -> Result<Quad, FinalizeFailure> {
        let image = ImageData::load(source, bundle, priority).await?;
        let quad = Quad::new(device, "textured_quad")?;
        texture.finalize(&image, device, "textured_quad")?;
        Ok(quad)
    }

    fn compute_matrix(transform: &QuadTransform, quad: &Quad) -> [[f32; 4]; 4] {
        let size = quad.size();
        let scale = Mat4::from_scale(Vec3::new(size.width, size.height, 1.0));
        (transform.matrix(quad.aspect()) * scale).to_cols_array_2d()
    }

    /// True when construction fully succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    /// The recorded construction failure, if the facade is invalid.
    pub fn failure(&self) -> Option<&FinalizeFailure> {
        match &self.state {
            State::Ready { .. } => None,
            State::Invalid { failure } => Some(failure),
        }
    }

    // Texture accessors

    pub fn kind(&self) -> Result<TextureKind, FacadeError> {
        self.texture.kind().map_err(|_| FacadeError::NotFinalized)
    }

    pub fn width(&self) -> Result<u32, FacadeError> {
        self.texture.width().map_err(|_| FacadeError::NotFinalized)
    }

    pub fn height(&self) -> Result<u32, FacadeError> {
        self.texture.height().map_err(|_| FacadeError::NotFinalized)
    }

    pub fn depth(&self) -> Result<u32, FacadeError> {
        self.texture.depth().map_err(|_| FacadeError::NotFinalized)
    }

    pub fn format(&self) -> Result<PixelFormatTag, FacadeError> {
        self.texture.format().map_err(|_| FacadeError::NotFinalized)
    }

    /// Whether the source image was vertically reflected.
    ///
    /// Valid in every state; an invalid facade reports the configured
    /// default.
    pub fn is_flipped(&self) -> bool {
        self.texture.is_flipped()
    }

    // Quad accessors

    pub fn size(&self) -> Result<Size, FacadeError> {
        self.quad().map(Quad::size)
    }

    pub fn bounds(&self) -> Result<Rect, FacadeError> {
        self.quad().map(Quad::bounds)
    }

    pub fn aspect(&self) -> Result<f32, FacadeError> {
        self.quad().map(Quad::aspect)
    }

    /// Slot assigned to one of the quad's bind points.
    pub fn index(&self, key: SlotKey) -> Result<u32, FacadeError> {
        self.quad().map(|q| q.index(key))
    }

    /// Reassigns a bind-point slot on the owned quad.
    pub fn set_index(&mut self, key: SlotKey, slot: u32) -> Result<(), FacadeError> {
        self.quad_mut().map(|q| q.set_index(key, slot))
    }

    /// The cached MVP matrix, column-major.
    pub fn matrix(&self) -> [[f32; 4]; 4] {
        self.matrix
    }

    /// Updates the bounding view rectangle and recomputes the transform for
    /// the new aspect ratio.
    ///
    /// Must run before the first encode and whenever the presentation
    /// surface changes size (for example on device rotation). Idempotent:
    /// setting the same rectangle twice recomputes to a bit-identical
    /// matrix.
    pub fn set_bounds(&mut self, bounds: Rect) -> Result<(), FacadeError> {
        match &mut self.state {
            State::Ready { quad } => {
                quad.set_bounds(bounds);
                self.matrix = Self::compute_matrix(&self.transform, quad);
                Ok(())
            }
            State::Invalid { .. } => Err(FacadeError::NotFinalized),
        }
    }

    /// Updates the quad size and recomputes the transform.
    pub fn set_size(&mut self, size: Size) -> Result<(), FacadeError> {
        match &mut self.state {
            State::Ready { quad } => {
                quad.set_size(size);
                self.matrix = Self::compute_matrix(&self.transform, quad);
                Ok(())
            }
            State::Invalid { .. } => Err(FacadeError::NotFinalized),
        }
    }

    /// Updates the display orientation and recomputes the transform.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), FacadeError> {
        self.transform.set_orientation(orientation);
        match &mut self.state {
            State::Ready { quad } => {
                self.matrix = Self::compute_matrix(&self.transform, quad);
                Ok(())
            }
            State::Invalid { .. } => Err(FacadeError::NotFinalized),
        }
    }

    /// Chooses the sampler recorded by subsequent encodes.
    pub fn set_sampler(&mut self, sampler: SamplerType) {
        self.sampler = sampler;
    }

    /// Records this quad's transform, texture, sampler, geometry binds and
    /// draw into `list`.
    ///
    /// An invalid facade fails with [`FacadeError::NotFinalized`] and
    /// records nothing.
    pub fn encode(&self, list: &mut CommandList) -> Result<(), FacadeError> {
        let quad = self.quad()?;
        let texture = self
            .texture
            .render_side()
            .map_err(|_| FacadeError::NotFinalized)?;
        list.push(Command::Transform {
            matrix: self.matrix,
        });
        list.push(Command::Texture { texture });
        list.push(Command::Sampler {
            slot: quad.index(SlotKey::Sampler),
            sampler: self.sampler,
        });
        quad.encode(list);
        Ok(())
    }

    fn quad(&self) -> Result<&Quad, FacadeError> {
        match &self.state {
            State::Ready { quad } => Ok(quad),
            State::Invalid { .. } => Err(FacadeError::NotFinalized),
        }
    }

    fn quad_mut(&mut self) -> Result<&mut Quad, FacadeError> {
        match &mut self.state {
            State::Ready { quad } => Ok(quad),
            State::Invalid { .. } => Err(FacadeError::NotFinalized),
        }
    }
}

//state-machine tests; the no-op backend supplies the device
#[cfg(all(test, not(feature = "backend_wgpu")))]
mod nop_tests {
    use super::*;
    use test_executors::spin_on;

    fn device() -> Arc<BoundDevice> {
        spin_on(BoundDevice::system_default()).unwrap()
    }

    /// A bundle directory holding a 4x3 `Default.jpg`.
    fn bundle() -> ResourceBundle {
        let dir = std::env::temp_dir().join("billboard_facade_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Default.jpg");
        if !path.is_file() {
            let img = image::RgbImage::from_pixel(4, 3, image::Rgb([200, 40, 10]));
            let mut bytes = Vec::new();
            img.write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Jpeg,
            )
            .unwrap();
            std::fs::write(&path, bytes).unwrap();
        }
        ResourceBundle::new(dir)
    }

    fn ready_quad() -> TexturedQuad {
        spin_on(TexturedQuad::with_source(
            ImageSource::bundled("", ""),
            &bundle(),
            &device(),
            async_file::Priority::unit_test(),
        ))
    }

    #[test]
    fn default_resource_finalizes() {
        let quad = ready_quad();
        assert!(quad.is_ready());
        assert!(quad.failure().is_none());
        assert_eq!(quad.width().unwrap(), 4);
        assert_eq!(quad.height().unwrap(), 3);
        assert_eq!(quad.depth().unwrap(), 1);
        assert_eq!(quad.kind().unwrap(), TextureKind::D2);
        assert_eq!(quad.format().unwrap(), PixelFormatTag::RGBA8UnormSRGB);
        //jpeg rows decode top-down; the loader's orientation wins
        assert!(!quad.is_flipped());
    }

    #[test]
    fn empty_path_is_invalid_source() {
        let quad = spin_on(TexturedQuad::with_path(
            "",
            &device(),
            async_file::Priority::unit_test(),
        ));
        assert!(!quad.is_ready());
        assert!(matches!(
            quad.failure(),
            Some(FinalizeFailure::Load(LoadError::InvalidSource))
        ));
    }

    #[test]
    fn nonexistent_path_enters_invalid_state() {
        let quad = spin_on(TexturedQuad::with_path(
            "/no/such/dir/missing.png",
            &device(),
            async_file::Priority::unit_test(),
        ));
        assert!(!quad.is_ready());
        assert!(matches!(
            quad.failure(),
            Some(FinalizeFailure::Load(LoadError::NotFound { .. }))
        ));
        assert!(matches!(quad.width(), Err(FacadeError::NotFinalized)));
        assert!(matches!(quad.height(), Err(FacadeError::NotFinalized)));
        assert!(matches!(quad.aspect(), Err(FacadeError::NotFinalized)));
        //the configured default survives into the invalid state
        assert!(quad.is_flipped());
    }

    #[test]
    fn invalid_quad_encodes_nothing() {
        let quad = spin_on(TexturedQuad::with_path(
            "/no/such/dir/missing.png",
            &device(),
            async_file::Priority::unit_test(),
        ));
        let mut list = CommandList::new();
        assert!(matches!(
            quad.encode(&mut list),
            Err(FacadeError::NotFinalized)
        ));
        assert!(list.is_empty());
        assert_eq!(list.draw_count(), 0);
    }

    #[test]
    fn set_bounds_on_invalid_quad_fails() {
        let mut quad = spin_on(TexturedQuad::with_path(
            "/no/such/dir/missing.png",
            &device(),
            async_file::Priority::unit_test(),
        ));
        assert!(matches!(
            quad.set_bounds(Rect::new(0.0, 0.0, 100.0, 50.0)),
            Err(FacadeError::NotFinalized)
        ));
    }

    #[test]
    fn set_bounds_is_idempotent() {
        let mut quad = ready_quad();
        let bounds = Rect::new(0.0, 0.0, 320.0, 240.0);
        quad.set_bounds(bounds).unwrap();
        let first = quad.matrix();
        quad.set_bounds(bounds).unwrap();
        let second = quad.matrix();
        let first_bits: Vec<u32> = first.iter().flatten().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u32> = second.iter().flatten().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn bounds_change_recomputes_transform() {
        let mut quad = ready_quad();
        quad.set_bounds(Rect::new(0.0, 0.0, 320.0, 240.0)).unwrap();
        let first = quad.matrix();
        quad.set_bounds(Rect::new(0.0, 0.0, 240.0, 320.0)).unwrap();
        let second = quad.matrix();
        assert_ne!(first, second);
        assert_eq!(quad.aspect().unwrap(), 240.0 / 320.0);
    }

    #[test]
    fn ready_quad_encodes_one_draw() {
        let mut quad = ready_quad();
        quad.set_bounds(Rect::new(0.0, 0.0, 320.0, 240.0)).unwrap();
        let mut list = CommandList::new();
        quad.encode(&mut list).unwrap();
        //transform, texture, sampler, two vertex buffers, draw
        assert_eq!(list.len(), 6);
        assert_eq!(list.draw_count(), 1);
    }

    #[test]
    fn slot_reassignment_through_the_facade() {
        let mut quad = ready_quad();
        assert_eq!(quad.index(SlotKey::Vertex).unwrap(), 0);
        assert_eq!(quad.index(SlotKey::TexCoord).unwrap(), 1);
        assert_eq!(quad.index(SlotKey::Sampler).unwrap(), 0);
        quad.set_index(SlotKey::Sampler, 3).unwrap();
        assert_eq!(quad.index(SlotKey::Sampler).unwrap(), 3);
        assert_eq!(quad.index(SlotKey::Vertex).unwrap(), 0);
    }
}
