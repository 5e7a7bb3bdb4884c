pub struct UnboundDevice {
    pub(super) adapter: wgpu::Adapter,
}

impl UnboundDevice {
    pub async fn pick(
        entry_point: &crate::entry_point::EntryPoint,
    ) -> Result<UnboundDevice, super::Error> {
        //no presentation surface is in play; any adapter that can render
        //offscreen will do
        let options = wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: None,
        };
        let adapter = entry_point.0.0.request_adapter(&options).await;
        let adapter = adapter.map_err(|_| super::Error::NoSuchAdapter)?;

        Ok(UnboundDevice { adapter })
    }
}
