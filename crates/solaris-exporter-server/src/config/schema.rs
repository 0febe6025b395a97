use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;
use solaris_exporter_core::error::{ExporterError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    pub exporter: ExporterSection,

    /// Required. Plaintext needs an explicit `disabled: true`.
    pub tls: TlsSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::UnsupportedVersion);
        }
        self.exporter.validate()?;
        self.tls.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// The only peer address allowed to scrape.
    pub allowed_caller: String,

    /// Overrides the resolved hostname in the `host` label.
    #[serde(default)]
    pub host_label: Option<String>,
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        self.allowed_caller_ip()?;
        if let Some(h) = &self.host_label {
            if h.trim().is_empty() {
                return Err(ExporterError::InvalidConfig(
                    "exporter.host_label must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            ExporterError::InvalidConfig(format!(
                "exporter.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })
    }

    pub fn allowed_caller_ip(&self) -> Result<IpAddr> {
        self.allowed_caller.parse().map_err(|_| {
            ExporterError::InvalidConfig(format!(
                "exporter.allowed_caller must be an IP address: {}",
                self.allowed_caller
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9610".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsSection {
    /// Serve plaintext HTTP. Must be set explicitly; cert/key must then be absent.
    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub cert_path: Option<String>,

    #[serde(default)]
    pub key_path: Option<String>,
}

impl TlsSection {
    pub fn validate(&self) -> Result<()> {
        if self.disabled {
            if self.cert_path.is_some() || self.key_path.is_some() {
                return Err(ExporterError::InvalidConfig(
                    "tls.disabled is set; remove tls.cert_path and tls.key_path".into(),
                ));
            }
            return Ok(());
        }
        match (self.cert_path.as_deref(), self.key_path.as_deref()) {
            (Some(c), Some(k)) if !c.trim().is_empty() && !k.trim().is_empty() => Ok(()),
            _ => Err(ExporterError::InvalidConfig(
                "tls.cert_path and tls.key_path are required unless tls.disabled is true".into(),
            )),
        }
    }

    /// `(cert, key)` when TLS is on.
    pub fn pem_paths(&self) -> Option<(&str, &str)> {
        if self.disabled {
            return None;
        }
        Some((self.cert_path.as_deref()?, self.key_path.as_deref()?))
    }
}
