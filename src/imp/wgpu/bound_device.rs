use crate::imp::Error;
use std::sync::Arc;
use wgpu::Trace;

/// Device/queue pair every GPU resource in the crate is created against.
#[derive(Debug)]
pub struct BoundDevice {
    pub(super) device: wgpu::Device,
    pub(super) queue: wgpu::Queue,
}

impl BoundDevice {
    pub(crate) async fn bind(
        unbound_device: crate::render::device::UnboundDevice,
        _entry_point: Arc<crate::entry_point::EntryPoint>,
    ) -> Result<Self, Error> {
        let label = wgpu::Label::from("Bound Device");
        let descriptor = wgpu::DeviceDescriptor {
            label,
            required_features: Default::default(),
            //downlevel limits keep us working on modest adapters; quads
            //don't need more
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: Default::default(),
            trace: Trace::Off,
        };
        let (device, queue) = unbound_device.0.adapter.request_device(&descriptor).await?;
        Ok(Self { device, queue })
    }

    pub(crate) fn max_texture_dimension_2d(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}
