use crate::bindings::sampler::SamplerType;
use crate::imp::Error;
use wgpu::{AddressMode, SamplerDescriptor};

#[derive(Debug)]
pub struct Sampler {
    pub(crate) sampler: wgpu::Sampler,
}

impl Sampler {
    pub fn new(device: &wgpu::Device, coordinate_type: SamplerType) -> Result<Self, Error> {
        let filter = match coordinate_type {
            SamplerType::Bilinear => wgpu::FilterMode::Linear,
            SamplerType::Nearest => wgpu::FilterMode::Nearest,
        };

        let s = SamplerDescriptor {
            label: None,
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            lod_min_clamp: 0.0,
            lod_max_clamp: 0.0,
            compare: None,
            anisotropy_clamp: 1,
            border_color: None,
        };
        let s = device.create_sampler(&s);
        Ok(Self { sampler: s })
    }
}
