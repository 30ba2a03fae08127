//! Level probes and the host facilities they inspect.
//!
//! A probe names the marker symbols its level depends on. The level counts
//! as supported only when the host exports every marker. Probing must never
//! abort startup: host errors and panics inside a check are logged and
//! reported as "not supported".

use crate::level::CapabilityLevel;
use std::io;
use std::panic::{self, AssertUnwindSafe};

/// Host facilities a probe can check for.
pub trait HostFacilities {
    /// Whether the running process image exports `name`.
    fn has_symbol(&self, name: &str) -> io::Result<bool>;
}

/// Looks symbols up in the running process with `dlsym(RTLD_DEFAULT, ..)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicSymbols;

impl HostFacilities for DynamicSymbols {
    #[cfg(unix)]
    fn has_symbol(&self, name: &str) -> io::Result<bool> {
        let symbol = std::ffi::CString::new(name).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("marker symbol contains a NUL byte: {name:?}"),
            )
        })?;
        // SAFETY: `symbol` is a valid NUL-terminated string and RTLD_DEFAULT
        // searches the already-loaded global scope without loading anything.
        let address = unsafe { libc::dlsym(libc::RTLD_DEFAULT, symbol.as_ptr()) };
        Ok(!address.is_null())
    }

    #[cfg(not(unix))]
    fn has_symbol(&self, _name: &str) -> io::Result<bool> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "dynamic symbol lookup is only available on unix hosts",
        ))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Probe {
    pub level: CapabilityLevel,
    pub markers: Vec<String>,
}

impl Probe {
    pub fn new<I, S>(level: CapabilityLevel, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            level,
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the probe. Never panics and never returns an error.
    ///
    /// The panic hook still runs for a panicking check, so the panic message
    /// reaches stderr before the probe is reported unsupported.
    pub fn is_supported(&self, host: &dyn HostFacilities) -> bool {
        if self.markers.is_empty() {
            tracing::debug!(level = %self.level, "probe has no markers; treating as unsupported");
            return false;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.check_markers(host)));
        match outcome {
            Ok(Ok(supported)) => supported,
            Ok(Err(err)) => {
                tracing::warn!(level = %self.level, error = %err, "probe failed; treating as unsupported");
                false
            }
            Err(_) => {
                tracing::warn!(level = %self.level, "probe panicked; treating as unsupported");
                false
            }
        }
    }

    fn check_markers(&self, host: &dyn HostFacilities) -> io::Result<bool> {
        for marker in &self.markers {
            if !host.has_symbol(marker)? {
                tracing::debug!(level = %self.level, marker = %marker, "marker facility missing");
                return Ok(false);
            }
        }
        Ok(true)
    }
}
