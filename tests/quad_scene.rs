#![cfg(all(feature = "testing", feature = "backend_wgpu"))]

//! End-to-end exercise of the real wgpu backend: acquire a device, finalize
//! a textured quad from a generated image, and present it into an offscreen
//! target. Skips (with a note) on machines where no adapter is available.

use billboard::bindings::software::image::{ImageSource, ResourceBundle};
use billboard::render::coordinates::Rect;
use billboard::render::device::BoundDevice;
use billboard::render::renderer::{QuadRenderer, RenderTarget};
use billboard::render::textured_quad::TexturedQuad;
use std::path::PathBuf;
use std::sync::Arc;

fn test_bundle() -> ResourceBundle {
    let dir = std::env::temp_dir().join("billboard_scene_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("checker.png");
    if !path.is_file() {
        write_checker_png(&path, 64, 64);
    }
    ResourceBundle::new(dir)
}

fn write_checker_png(path: &PathBuf, width: u32, height: u32) {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let mut rows = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let on = (x / 8 + y / 8) % 2 == 0;
                let v = if on { 255 } else { 0 };
                rows.extend_from_slice(&[v, v, v, 255]);
            }
        }
        writer.write_image_data(&rows).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

async fn acquire_device() -> Option<Arc<BoundDevice>> {
    match BoundDevice::system_default().await {
        Ok(device) => Some(device),
        Err(e) => {
            println!("skipping: no usable GPU adapter ({e})");
            None
        }
    }
}

#[test]
fn renders_a_textured_quad_offscreen() {
    test_executors::sleep_on(async {
        let Some(device) = acquire_device().await else {
            return;
        };

        let mut renderer =
            QuadRenderer::with_bundle(&device, test_bundle()).expect("create renderer");
        renderer.set_bounds(Rect::new(0.0, 0.0, 320.0, 240.0));

        let finalized = renderer
            .finalize_with_resource("checker", "png", async_file::Priority::unit_test())
            .await;
        assert!(finalized, "quad should finalize from the bundled png");

        let quad = renderer.textured_quad().expect("quad installed");
        assert_eq!(quad.width().unwrap(), 64);
        assert_eq!(quad.height().unwrap(), 64);
        assert!(!quad.is_flipped());

        let target = RenderTarget::offscreen(&device, 320, 240, "scene_target").expect("target");
        renderer.present(&target).expect("present");
        //second frame after a rotation-shaped bounds change
        renderer.set_bounds(Rect::new(0.0, 0.0, 240.0, 320.0));
        renderer.present(&target).expect("present after resize");
    });
}

#[test]
fn invalid_facade_presents_cleanly() {
    test_executors::sleep_on(async {
        let Some(device) = acquire_device().await else {
            return;
        };

        let quad = TexturedQuad::with_source(
            ImageSource::bundled("does_not_exist", "png"),
            &test_bundle(),
            &device,
            async_file::Priority::unit_test(),
        )
        .await;
        assert!(!quad.is_ready());

        let mut renderer =
            QuadRenderer::with_bundle(&device, test_bundle()).expect("create renderer");
        let finalized = renderer
            .finalize_with_resource("does_not_exist", "png", async_file::Priority::unit_test())
            .await;
        assert!(!finalized);

        let target = RenderTarget::offscreen(&device, 64, 64, "empty_target").expect("target");
        renderer.present(&target).expect("present empty frame");
    });
}
