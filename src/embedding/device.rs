use candle_core::Device;
use tracing::{debug, warn};

/// Picks the device the sentence encoder runs on.
///
/// Metal is tried before CUDA when both features are compiled in; any failure
/// falls through to the CPU so a missing driver never prevents startup.
pub fn select_device() -> Device {
    #[allow(unused_mut)]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            tracing::info!("Sentence encoder using Metal");
            return device;
        }
        Err(e) => failures.push(format!("metal: {e}")),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            tracing::info!("Sentence encoder using CUDA");
            return device;
        }
        Err(e) => failures.push(format!("cuda: {e}")),
    }

    if failures.is_empty() {
        debug!("No GPU backend compiled, sentence encoder using CPU");
    } else {
        warn!(reason = %failures.join("; "), "GPU unavailable, sentence encoder using CPU");
    }
    Device::Cpu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    #[test]
    fn test_cpu_without_gpu_features() {
        assert!(matches!(select_device(), Device::Cpu));
    }
}
