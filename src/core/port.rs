use crate::domain::ports::PortAllocator;
use std::net::{Ipv4Addr, TcpListener};

/// 拿不到空閒埠時的預設開發埠
pub const DEFAULT_DEV_PORT: u16 = 9006;

/// 綁定 127.0.0.1:0 讓作業系統配發臨時埠，讀出後立即釋放
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPortAllocator;

impl PortAllocator for OsPortAllocator {
    fn allocate(&self) -> Option<u16> {
        let listener = match TcpListener::bind((Ipv4Addr::LOCALHOST, 0)) {
            Ok(listener) => listener,
            Err(e) => {
                tracing::debug!("Ephemeral port bind failed: {}", e);
                return None;
            }
        };
        listener.local_addr().ok().map(|addr| addr.port())
    }
}

pub fn resolve_port<P: PortAllocator + ?Sized>(allocator: &P) -> u16 {
    match allocator.allocate() {
        Some(port) if port > 0 => {
            tracing::debug!("Allocated free port {}", port);
            port
        }
        _ => {
            tracing::warn!(
                "⚠️ Could not allocate a free port, falling back to {}",
                DEFAULT_DEV_PORT
            );
            DEFAULT_DEV_PORT
        }
    }
}
