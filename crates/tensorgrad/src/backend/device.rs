//! Compute target selection.

use crate::error::TensorError;
use std::fmt;

/// A compute target a tensor can live on.
///
/// Only [`Device::Cpu`] is executable; the other variants exist so callers
/// can ask for them and get a proper error back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    /// The default target.
    #[default]
    Cpu,
    /// CUDA device by ordinal.
    Cuda(usize),
    /// Apple Metal.
    Metal,
}

impl Device {
    pub fn is_cpu(&self) -> bool {
        matches!(self, Device::Cpu)
    }

    /// Fail with `UnsupportedOperation` unless this is the default target.
    pub fn ensure_supported(&self) -> Result<(), TensorError> {
        if self.is_cpu() {
            Ok(())
        } else {
            Err(TensorError::UnsupportedOperation(format!(
                "device {self} is not available, only cpu is supported"
            )))
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
            Device::Metal => write!(f, "metal"),
        }
    }
}
