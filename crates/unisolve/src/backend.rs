//! Compute backend selection.
//!
//! Provides [`Backend`] for naming the build-time selected execution
//! target. The enum lives in the facade so applications can parse and
//! display a backend choice without touching backend crates; actual
//! availability probing is done by the application layer.

use std::fmt;

/// The backend a session dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Backend {
    /// Host reference backend (always available).
    #[default]
    Cpu,
    /// NVIDIA cuSOLVER dense backend.
    Cuda {
        /// CUDA device ordinal.
        device_id: usize,
    },
}

impl Backend {
    /// Parse a backend name from a CLI argument string.
    ///
    /// Accepts `"auto"`, `"cpu"`, or `"cuda"`. For `"auto"`, returns
    /// `Cpu` — the caller should probe GPU availability separately and
    /// upgrade the result.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "auto" | "cpu" => Some(Backend::Cpu),
            "cuda" => Some(Backend::Cuda { device_id: 0 }),
            _ => None,
        }
    }

    /// Short name for display.
    pub fn name(&self) -> &str {
        match self {
            Backend::Cpu => "CPU",
            Backend::Cuda { .. } => "CUDA",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cpu => write!(f, "CPU"),
            Backend::Cuda { device_id } => write!(f, "CUDA (device {device_id})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cpu() {
        assert_eq!(Backend::default(), Backend::Cpu);
    }

    #[test]
    fn from_name_auto_is_cpu() {
        assert_eq!(Backend::from_name("auto").unwrap(), Backend::Cpu);
    }

    #[test]
    fn from_name_case_insensitive() {
        assert_eq!(
            Backend::from_name("CUDA").unwrap(),
            Backend::Cuda { device_id: 0 }
        );
    }

    #[test]
    fn from_name_invalid() {
        assert!(Backend::from_name("opencl").is_none());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Backend::Cpu), "CPU");
        assert_eq!(format!("{}", Backend::Cuda { device_id: 1 }), "CUDA (device 1)");
    }
}
