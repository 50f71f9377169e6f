//! Trust-store loading for the outbound transport.

use std::io;
use std::path::Path;

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use rustls::RootCertStore;

/// Load CA certificates from a PEM bundle into a fresh root store.
///
/// An unreadable bundle, a bundle with no certificates, or a certificate
/// rustls rejects are all errors; callers treat them as fatal at startup.
pub fn load_root_store(path: &Path) -> io::Result<RootCertStore> {
    let pem = std::fs::read(path)?;

    let mut store = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut pem.as_slice()) {
        store
            .add(cert?)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    }

    if store.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no CA certificates found in {}", path.display()),
        ));
    }

    Ok(store)
}

/// Build an HTTPS connector that trusts exactly the given roots.
pub fn https_connector(roots: RootCertStore) -> HttpsConnector<HttpConnector> {
    let tls = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_http1()
        .build()
}
