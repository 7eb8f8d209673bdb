//! Server configuration.
//!
//! Values come from CLI flags, then environment variables (a `.env` file is
//! loaded by `main` before parsing), then the defaults below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum request body size for uploads.
///
/// 32 MiB limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "MATRIXLOAD_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "MATRIXLOAD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Maximum accepted request body, in bytes
    #[arg(long, env = "MATRIXLOAD_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        config: ServerConfig,
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.max_upload_bytes, 32 * 1024 * 1024);
    }

    #[test]
    fn test_flags_override_defaults() {
        let harness = Harness::parse_from([
            "matrixload",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--max-upload-bytes",
            "1024",
        ]);
        assert_eq!(harness.config.socket_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(harness.config.max_upload_bytes, 1024);
    }
}
