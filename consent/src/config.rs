use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use consent_app::config::FrontendConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PKG_DIR: &str = "./target/site/pkg";

#[derive(Clone, Debug)]
pub(crate) struct ServerConfig {
    pub(crate) port: u16,
    pub(crate) pkg_dir: PathBuf,
    pub(crate) frontend: FrontendConfig,
}

impl ServerConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let pkg_dir: PathBuf = lookup("CONSENT_PKG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PKG_DIR.to_string())
            .into();
        Self {
            port,
            pkg_dir,
            frontend: FrontendConfig::from_lookup(lookup),
        }
    }

    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
