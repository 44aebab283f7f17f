//! Real port probe
//!
//! A port counts as in use when binding it fails with `AddrInUse` on any of
//! the IPv4 or IPv6 loopback and wildcard addresses. Hosts without IPv6 skip
//! those addresses.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener};

use crate::error::InstallerResult;
use crate::traits::PortProbe;
use shared::{InstallStage, stage_debug};

#[derive(Debug, Default)]
pub struct RealPortProbe;

impl RealPortProbe {
    pub fn new() -> Self {
        Self
    }

    fn bind_fails(addr: SocketAddr) -> InstallerResult<bool> {
        match TcpListener::bind(addr) {
            Ok(_listener) => Ok(false),
            Err(e) if e.kind() == ErrorKind::AddrInUse => Ok(true),
            // Privileged or unavailable addresses say nothing about other listeners
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::PermissionDenied | ErrorKind::AddrNotAvailable | ErrorKind::Unsupported
                ) =>
            {
                Ok(false)
            }
            // IPv6 disabled on this host
            Err(_) if addr.is_ipv6() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PortProbe for RealPortProbe {
    async fn is_in_use(&self, port: u16) -> InstallerResult<bool> {
        let candidates: [IpAddr; 4] = [
            Ipv4Addr::LOCALHOST.into(),
            Ipv4Addr::UNSPECIFIED.into(),
            Ipv6Addr::LOCALHOST.into(),
            Ipv6Addr::UNSPECIFIED.into(),
        ];
        for ip in candidates {
            let addr = SocketAddr::from((ip, port));
            if Self::bind_fails(addr)? {
                stage_debug!(InstallStage::CheckingPrereqs, "🔌 {} is bound by another process", addr);
                return Ok(true);
            }
        }
        Ok(false)
    }
}
