use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use i2cpanel_core::{Backend, BusConfig};

pub const DEFAULT_LISTEN: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8501));

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub listen: SocketAddr,
    pub bus: BusConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let backend = if cfg!(feature = "simulated") {
            Backend::Simulated
        } else {
            Backend::Ftdi
        };
        Self {
            listen: DEFAULT_LISTEN,
            bus: BusConfig {
                backend,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "simulated"))]
    #[test]
    fn drives_the_bridge_unless_simulation_is_built_in() {
        assert_eq!(PanelConfig::default().bus.backend, Backend::Ftdi);
    }

    #[cfg(feature = "simulated")]
    #[test]
    fn simulated_build_opts_in() {
        assert_eq!(PanelConfig::default().bus.backend, Backend::Simulated);
    }

    #[test]
    fn listens_on_loopback() {
        assert!(PanelConfig::default().listen.ip().is_loopback());
    }
}
