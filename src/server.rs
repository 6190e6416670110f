use std::io;
use std::net::TcpListener;
use std::path::PathBuf;

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::Config;
use crate::routes;

/// Binds the listening socket. A port conflict surfaces here, before any TLS
/// work happens.
pub fn bind_listener(config: &Config) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_addr())?;
    // The async acceptor takes this listener over; it must not block.
    listener.set_nonblocking(true)?;
    Ok(listener)
}

/// Loads the PEM certificate chain and private key. Missing or malformed
/// files fail here, before a single connection is accepted.
pub async fn load_tls(config: &Config) -> io::Result<RustlsConfig> {
    RustlsConfig::from_pem_file(&config.cert_path, &config.key_path).await
}

/// Serves until `handle.shutdown()` fires. axum-server runs each accepted
/// connection on its own task, so a stalled client never blocks the rest, and
/// per-connection errors are dropped without ending the loop.
pub async fn serve(
    listener: TcpListener,
    tls: RustlsConfig,
    root: PathBuf,
    handle: Handle,
) -> io::Result<()> {
    axum_server::from_tcp_rustls(listener, tls)
        .handle(handle)
        .serve(routes::router(root).into_make_service())
        .await
}
