//! Certificate authorities used to validate server certificates.

use crate::base::neterror::NetError;
use boring::ssl::SslConnectorBuilder;
use boring::x509::X509;
use std::path::PathBuf;

/// Sources of trusted root certificates.
///
/// Applied once, when the [`TlsConnector`](super::TlsConnector) is built,
/// before any handshake runs.
#[derive(Debug, Clone)]
pub struct TrustStore {
    system_roots: bool,
    ca_files: Vec<PathBuf>,
    pem_bundles: Vec<Vec<u8>>,
}

impl Default for TrustStore {
    fn default() -> Self {
        Self::system()
    }
}

impl TrustStore {
    /// The platform's default verify paths.
    pub fn system() -> Self {
        Self {
            system_roots: true,
            ca_files: Vec::new(),
            pem_bundles: Vec::new(),
        }
    }

    /// No roots at all; every chain fails until roots are added.
    pub fn empty() -> Self {
        Self {
            system_roots: false,
            ca_files: Vec::new(),
            pem_bundles: Vec::new(),
        }
    }

    /// Also trust the PEM certificates in `path`.
    pub fn with_ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_files.push(path.into());
        self
    }

    /// Also trust the PEM certificates in `pem`.
    pub fn with_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.pem_bundles.push(pem.into());
        self
    }

    pub fn uses_system_roots(&self) -> bool {
        self.system_roots
    }

    /// Loads every source into the connector's certificate store.
    ///
    /// Returns the number of explicitly added certificates.
    pub fn apply_to_builder(&self, builder: &mut SslConnectorBuilder) -> Result<usize, NetError> {
        if self.system_roots {
            builder
                .set_default_verify_paths()
                .map_err(|e| NetError::TlsConfig(format!("default verify paths: {e}")))?;
        }

        let mut added = 0;
        for path in &self.ca_files {
            let pem = std::fs::read(path).map_err(|e| {
                NetError::TlsConfig(format!("reading CA file {}: {e}", path.display()))
            })?;
            added += add_pem(builder, &pem, &path.display().to_string())?;
        }
        for (index, pem) in self.pem_bundles.iter().enumerate() {
            added += add_pem(builder, pem, &format!("PEM bundle #{index}"))?;
        }

        tracing::debug!(
            system_roots = self.system_roots,
            added,
            "trust store initialized"
        );
        Ok(added)
    }
}

fn add_pem(builder: &mut SslConnectorBuilder, pem: &[u8], origin: &str) -> Result<usize, NetError> {
    let certs = X509::stack_from_pem(pem)
        .map_err(|e| NetError::TlsConfig(format!("parsing {origin}: {e}")))?;
    if certs.is_empty() {
        return Err(NetError::TlsConfig(format!("no certificates in {origin}")));
    }

    let count = certs.len();
    for cert in certs {
        builder
            .cert_store_mut()
            .add_cert(cert)
            .map_err(|e| NetError::TlsConfig(format!("adding certificate from {origin}: {e}")))?;
    }
    Ok(count)
}
