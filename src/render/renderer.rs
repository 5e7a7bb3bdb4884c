/*! A facade for managing and rendering one textured quad.

[`QuadRenderer`] is the layer that owns what the facade does not: the
compiled pipeline state, the current view bounds, and the submission of
encoded commands into a render target. A caller drives it in three steps —
construct against a device, `finalize` with an image source, then `present`
once per frame.

A renderer whose quad failed to finalize presents an empty frame rather
than failing: the invalid facade is skipped at encode time, so the target
is cleared and nothing draws.
*/

use crate::bindings::software::image::ResourceBundle;
use crate::imp;
use crate::render::command_list::CommandList;
use crate::render::coordinates::Rect;
use crate::render::device::BoundDevice;
use crate::render::textured_quad::TexturedQuad;
use std::fmt::Formatter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
pub struct RendererError(imp::Error);
impl std::fmt::Display for RendererError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for RendererError {}

#[derive(Debug)]
pub struct PresentError(imp::Error);
impl std::fmt::Display for PresentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for PresentError {}

/// A color target that [`QuadRenderer::present`] draws into.
///
/// The renderer never owns or presents a swapchain; the windowing layer
/// hands views in, or tests allocate an offscreen target.
#[derive(Debug)]
pub struct RenderTarget(pub(crate) imp::RenderTarget);

impl RenderTarget {
    /// Allocates a headless color target of the given size.
    pub fn offscreen(
        device: &Arc<BoundDevice>,
        width: u32,
        height: u32,
        debug_name: &str,
    ) -> Result<Self, RendererError> {
        imp::RenderTarget::offscreen(device, width, height, debug_name)
            .map(RenderTarget)
            .map_err(RendererError)
    }

    /// Wraps a color view handed in by the windowing layer.
    #[cfg(feature = "backend_wgpu")]
    pub fn from_wgpu(view: ::wgpu::TextureView, format: ::wgpu::TextureFormat) -> Self {
        Self(imp::RenderTarget::from_wgpu(view, format))
    }
}

/// Owns the pipeline and drives one [`TexturedQuad`] to the screen.
#[derive(Debug)]
pub struct QuadRenderer {
    device: Arc<BoundDevice>,
    pipeline: imp::QuadPipeline,
    quad: Option<TexturedQuad>,
    bounds: Rect,
    bundle: ResourceBundle,
}

impl QuadRenderer {
    /// Builds the quad pipeline against `device`, resolving bundled
    /// resources from the main bundle.
    pub fn new(device: &Arc<BoundDevice>) -> Result<Self, RendererError> {
        Self::with_bundle(device, ResourceBundle::main())
    }

    /// Like [`new`](Self::new), with an explicit resource bundle.
    pub fn with_bundle(
        device: &Arc<BoundDevice>,
        bundle: ResourceBundle,
    ) -> Result<Self, RendererError> {
        let pipeline = imp::QuadPipeline::new(device).map_err(RendererError)?;
        logwise::info_sync!("created quad renderer");
        Ok(Self {
            device: device.clone(),
            pipeline,
            quad: None,
            bounds: Rect::ZERO,
            bundle,
        })
    }

    /// Adds a textured quad constructed from an image at `path`.
    ///
    /// Returns whether the quad finalized; on `false` the renderer holds an
    /// invalid facade and will render nothing.
    pub async fn finalize_with_path(
        &mut self,
        path: impl Into<PathBuf>,
        priority: async_file::Priority,
    ) -> bool {
        let quad = TexturedQuad::with_path(path, &self.device, priority).await;
        self.install(quad)
    }

    /// Adds a textured quad constructed from `name.ext` in the renderer's
    /// bundle; empty components default to `"Default"` / `"jpg"`.
    pub async fn finalize_with_resource(
        &mut self,
        name: &str,
        ext: &str,
        priority: async_file::Priority,
    ) -> bool {
        let quad = TexturedQuad::with_source(
            crate::bindings::software::image::ImageSource::bundled(name, ext),
            &self.bundle,
            &self.device,
            priority,
        )
        .await;
        self.install(quad)
    }

    fn install(&mut self, mut quad: TexturedQuad) -> bool {
        //apply whatever bounds the view reported before finalize ran
        let _ = quad.set_bounds(self.bounds);
        let ready = quad.is_ready();
        self.quad = Some(quad);
        ready
    }

    /// The managed quad, if one was finalized (successfully or not).
    pub fn textured_quad(&self) -> Option<&TexturedQuad> {
        self.quad.as_ref()
    }

    pub fn textured_quad_mut(&mut self) -> Option<&mut TexturedQuad> {
        self.quad.as_mut()
    }

    /// Updates the view bounding rectangle, forwarding to the managed quad.
    ///
    /// Safe to call before finalize; the bounds are replayed onto the quad
    /// when it is installed.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        if let Some(quad) = &mut self.quad {
            //an invalid quad has no bounds to update
            let _ = quad.set_bounds(bounds);
        }
    }

    /// Encodes the managed quad and submits the commands into `target`.
    ///
    /// An invalid (or absent) quad encodes nothing; the target is still
    /// cleared so stale contents never linger.
    pub fn present(&mut self, target: &RenderTarget) -> Result<(), PresentError> {
        let mut list = CommandList::new();
        if let Some(quad) = &self.quad
            && quad.encode(&mut list).is_err()
        {
            logwise::debuginternal_sync!("skipping encode for invalid textured quad");
        }
        self.pipeline
            .submit(&self.device, &list, &target.0)
            .map_err(PresentError)
    }
}

#[cfg(all(test, not(feature = "backend_wgpu")))]
mod nop_tests {
    use super::*;
    use test_executors::spin_on;

    fn device() -> Arc<BoundDevice> {
        spin_on(BoundDevice::system_default()).unwrap()
    }

    #[test]
    fn invalid_quad_presents_an_empty_frame() {
        let device = device();
        let mut renderer = QuadRenderer::new(&device).unwrap();
        let finalized = spin_on(renderer.finalize_with_path(
            "/no/such/dir/missing.png",
            async_file::Priority::unit_test(),
        ));
        assert!(!finalized);
        let target = RenderTarget::offscreen(&device, 64, 64, "test_target").unwrap();
        //renders nothing, but must not fail
        renderer.present(&target).unwrap();
    }

    #[test]
    fn bounds_survive_until_finalize() {
        let device = device();
        let mut renderer = QuadRenderer::new(&device).unwrap();
        renderer.set_bounds(Rect::new(0.0, 0.0, 640.0, 480.0));

        let dir = std::env::temp_dir().join("billboard_renderer_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("solid.jpg");
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([0, 128, 255]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Jpeg,
        )
        .unwrap();
        std::fs::write(&path, bytes).unwrap();

        let finalized =
            spin_on(renderer.finalize_with_path(&path, async_file::Priority::unit_test()));
        assert!(finalized);
        let quad = renderer.textured_quad().unwrap();
        assert_eq!(quad.bounds().unwrap(), Rect::new(0.0, 0.0, 640.0, 480.0));

        let target = RenderTarget::offscreen(&device, 64, 64, "test_target").unwrap();
        renderer.present(&target).unwrap();
    }
}
