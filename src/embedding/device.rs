use candle_core::Device;
use tracing::{debug, info, warn};

/// GPU backends the encoders can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accelerator {
    Metal,
    Cuda,
}

impl Accelerator {
    fn open(self) -> candle_core::Result<Device> {
        match self {
            Accelerator::Metal => Device::new_metal(0),
            Accelerator::Cuda => Device::new_cuda(0),
        }
    }
}

/// Accelerators compiled into this build, in preference order.
pub fn compiled_accelerators() -> Vec<Accelerator> {
    #[allow(unused_mut)]
    let mut accelerators = Vec::new();
    #[cfg(feature = "metal")]
    accelerators.push(Accelerator::Metal);
    #[cfg(feature = "cuda")]
    accelerators.push(Accelerator::Cuda);
    accelerators
}

/// Picks the first accelerator that opens, falling back to CPU.
pub fn select_device() -> Device {
    let accelerators = compiled_accelerators();
    if accelerators.is_empty() {
        debug!("No GPU features enabled, using CPU");
        return Device::Cpu;
    }

    let mut failures = Vec::with_capacity(accelerators.len());
    for accelerator in accelerators {
        match accelerator.open() {
            Ok(device) => {
                info!(?accelerator, "Using GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(?accelerator, error = %e, "Accelerator unavailable");
                failures.push(format!("{accelerator:?}: {e}"));
            }
        }
    }

    warn!(reason = %failures.join("; "), "Falling back to CPU device");
    Device::Cpu
}
