#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("No such adapter")]
    NoSuchAdapter,
    #[error("{0}")]
    RequestDeviceError(#[from] wgpu::RequestDeviceError),
    #[error("texture {width}x{height} exceeds device limit {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },
    #[error("render target format {actual} is not the supported {expected}")]
    UnsupportedTargetFormat {
        expected: &'static str,
        actual: &'static str,
    },
}
