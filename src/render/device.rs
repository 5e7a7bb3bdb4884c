//!Cross-platform GPU device wrappers
//!
//! Devices are acquired in two steps: pick an adapter, then bind it into a
//! device/queue pair. The facade layer only ever sees the bound form.
use std::fmt::Formatter;
use std::sync::Arc;

use crate::entry_point::{EntryPoint, EntryPointError};
use crate::imp;

///Cross-platform unbound device: an adapter that has been picked but not
///yet bound.
pub(crate) struct UnboundDevice(pub(crate) crate::imp::UnboundDevice);
impl UnboundDevice {
    ///Pick a device suitable for quad rendering.
    pub async fn pick(entry_point: &EntryPoint) -> Result<UnboundDevice, PickError> {
        crate::imp::UnboundDevice::pick(entry_point)
            .await
            .map(UnboundDevice)
            .map_err(PickError)
    }
}

#[derive(Debug)]
pub struct PickError(imp::Error);
impl std::fmt::Display for PickError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for PickError {}

///Cross-platform bound device: the opaque context every texture and quad is
///constructed against.
///
/// The crate never creates one of these on its own; callers acquire it (for
/// example via [`BoundDevice::system_default`]) and pass it down.
#[derive(Debug)]
pub struct BoundDevice(pub(crate) imp::BoundDevice);

impl AsRef<imp::BoundDevice> for BoundDevice {
    fn as_ref(&self) -> &imp::BoundDevice {
        &self.0
    }
}

#[derive(Debug)]
pub struct BindError(imp::Error);
impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::error::Error for BindError {}

impl BoundDevice {
    pub(crate) async fn bind(
        unbound_device: UnboundDevice,
        entry_point: Arc<EntryPoint>,
    ) -> Result<Self, BindError> {
        let bind = crate::imp::BoundDevice::bind(unbound_device, entry_point)
            .await
            .map_err(BindError)?;
        logwise::info_sync!("bound GPU device");
        Ok(Self(bind))
    }

    /// Acquires the system's default device: entry point, adapter pick, and
    /// bind in one call.
    pub async fn system_default() -> Result<Arc<Self>, DeviceError> {
        let entry_point = Arc::new(EntryPoint::new().await?);
        let unbound = UnboundDevice::pick(&entry_point).await?;
        let bound = Self::bind(unbound, entry_point).await?;
        Ok(Arc::new(bound))
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DeviceError {
    #[error("Can't create entry point {0}")]
    EntryPoint(#[from] EntryPointError),
    #[error("Can't find a GPU {0}")]
    Gpu(#[from] PickError),
    #[error("Can't bind GPU {0}")]
    Bind(#[from] BindError),
}
