//! Wired Ethernet link adapter.
//!
//! Implements [`LinkPort`] on top of a plain UDP socket — ESP-IDF exposes
//! std networking over lwIP, so the datagram path is shared between device
//! and host. What differs per target is address programming:
//!
//! - **`target_os = "espidf"`**: `reinit` reprograms the W5500 netif (MAC,
//!   static IP) via `esp_netif_*` sys calls before rebinding the socket.
//!   The Ethernet driver itself is brought up once by `drivers::hw_init`;
//!   ARP and ICMP echo are answered by lwIP without involving this adapter.
//! - **all other targets**: `reinit` records the addresses and rebinds on
//!   the loopback/any address, which is all a host test needs.
//!
//! Polling uses a short socket read timeout so the receive loop stays
//! cooperative without busy-spinning. While the single thread is busy
//! (notably during a sweep) inbound datagrams simply overflow the socket
//! buffer and are dropped — they are never queued or retried here.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

use log::{info, warn};

use crate::app::ports::{Datagram, LinkError, LinkPort, MAX_DATAGRAM, PeerAddr};

/// Socket read timeout for one poll pass.
const POLL_WINDOW: Duration = Duration::from_millis(20);

/// UDP link bound to the device's configured reply port.
pub struct EthLink {
    socket: Option<UdpSocket>,
    port: u16,
    mac: [u8; 6],
    ip: [u8; 4],
}

impl EthLink {
    /// Create an unbound link. Call [`LinkPort::reinit`] to bring it up —
    /// bring-up and the commit command share that one path.
    pub fn new(port: u16) -> Self {
        Self {
            socket: None,
            port,
            mac: [0; 6],
            ip: [0; 4],
        }
    }

    /// Addresses the link was last initialised with.
    pub fn addresses(&self) -> ([u8; 6], [u8; 4]) {
        (self.mac, self.ip)
    }

    fn bind_socket(&mut self) -> Result<(), LinkError> {
        // Drop any previous socket first so the port is free to rebind.
        self.socket = None;

        let addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, self.port);
        let socket = UdpSocket::bind(addr).map_err(|e| {
            warn!("eth: bind {} failed: {}", addr, e);
            LinkError::InitFailed
        })?;
        socket
            .set_read_timeout(Some(POLL_WINDOW))
            .map_err(|_| LinkError::InitFailed)?;
        self.socket = Some(socket);
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
fn program_netif(mac: &[u8; 6], ip: &[u8; 4]) -> Result<(), LinkError> {
    use esp_idf_svc::sys::*;

    // SAFETY: the netif is created once by hw_init before the receive loop
    // starts; all calls here run on the single main task.
    unsafe {
        let netif = esp_netif_get_handle_from_ifkey(b"ETH_DEF\0".as_ptr() as *const _);
        if netif.is_null() {
            return Err(LinkError::NotReady);
        }

        if esp_netif_set_mac(netif, mac.as_ptr() as *mut _) != ESP_OK {
            return Err(LinkError::InitFailed);
        }

        // Static addressing: the record's IP with a /24 mask, no gateway.
        esp_netif_dhcpc_stop(netif);
        let info = esp_netif_ip_info_t {
            ip: esp_ip4_addr_t {
                addr: u32::from_le_bytes(*ip),
            },
            netmask: esp_ip4_addr_t {
                addr: u32::from_le_bytes([255, 255, 255, 0]),
            },
            gw: esp_ip4_addr_t { addr: 0 },
        };
        if esp_netif_set_ip_info(netif, &info) != ESP_OK {
            return Err(LinkError::InitFailed);
        }
    }
    Ok(())
}

impl LinkPort for EthLink {
    fn poll(&mut self) -> Option<Datagram> {
        let socket = self.socket.as_ref()?;
        let mut buf = [0u8; MAX_DATAGRAM];
        match socket.recv_from(&mut buf) {
            Ok((len, SocketAddr::V4(src))) => {
                // Oversized datagrams are truncated at MAX_DATAGRAM; that can
                // never shrink a payload to a valid 11-byte command frame, so
                // the screen still rejects them.
                let mut payload = heapless::Vec::new();
                let _ = payload.extend_from_slice(&buf[..len]);
                Some(Datagram {
                    peer: PeerAddr {
                        ip: src.ip().octets(),
                        port: src.port(),
                    },
                    payload,
                })
            }
            Ok((_, SocketAddr::V6(_))) => None,
            Err(_) => None, // poll window elapsed with nothing inbound
        }
    }

    fn send(&mut self, peer: PeerAddr, payload: &[u8]) -> Result<(), LinkError> {
        let socket = self.socket.as_ref().ok_or(LinkError::NotReady)?;
        let dest = SocketAddrV4::new(Ipv4Addr::from(peer.ip), peer.port);
        match socket.send_to(payload, dest) {
            Ok(n) if n == payload.len() => Ok(()),
            Ok(_) => Err(LinkError::SendFailed),
            Err(e) => {
                warn!("eth: send to {} failed: {}", dest, e);
                Err(LinkError::SendFailed)
            }
        }
    }

    fn reinit(&mut self, mac: [u8; 6], ip: [u8; 4]) -> Result<(), LinkError> {
        self.mac = mac;
        self.ip = ip;

        #[cfg(target_os = "espidf")]
        program_netif(&mac, &ip)?;

        self.bind_socket()?;
        info!(
            "eth: link up, mac={:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X} ip={}.{}.{}.{} port={}",
            mac[0], mac[1], mac[2], mac[3], mac[4], mac[5], ip[0], ip[1], ip[2], ip[3], self.port
        );
        Ok(())
    }
}
