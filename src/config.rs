use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Fixed settings for the development server. There are deliberately no CLI
/// flags and no environment overrides; edit the defaults and rebuild.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose tree is served, resolved against the working directory.
    pub root: PathBuf,
    /// Bind address. All interfaces, so LAN devices can reach the server.
    pub host: IpAddr,
    pub port: u16,
    /// PEM certificate chain and private key, read once at startup.
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    /// Shown in the banner when local IP discovery fails.
    pub fallback_ip: IpAddr,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8443,
            cert_path: PathBuf::from("cert.pem"),
            key_path: PathBuf::from("key.pem"),
            fallback_ip: IpAddr::V4(Ipv4Addr::new(192, 168, 0, 220)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serve_working_directory_on_8443() {
        let config = Config::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8443");
        assert_eq!(config.cert_path, PathBuf::from("cert.pem"));
        assert_eq!(config.key_path, PathBuf::from("key.pem"));
    }
}
