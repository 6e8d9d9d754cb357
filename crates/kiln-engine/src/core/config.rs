use crate::device::GpuInit;

/// Engine-wide settings, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Used when the first window brings up the GPU device.
    pub gpu: GpuInit,
}
