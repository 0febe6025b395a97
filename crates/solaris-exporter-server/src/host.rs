use std::fmt;
use std::sync::Arc;

use solaris_exporter_core::error::{ExporterError, Result};

/// Hostname used as the `host` label. Resolved once at startup, then shared
/// read-only by every sample source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity(Arc<str>);

impl HostIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    /// Ask the OS for this machine's hostname.
    pub fn resolve() -> Result<Self> {
        let name = hostname::get()
            .map_err(|e| ExporterError::Internal(format!("hostname lookup failed: {e}")))?
            .into_string()
            .map_err(|raw| ExporterError::Internal(format!("hostname is not utf-8: {raw:?}")))?;
        Ok(Self::new(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
