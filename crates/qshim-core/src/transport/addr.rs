//! Socket-address conversion at the C boundary.
//!
//! The engine hands peer addresses around as `sockaddr_storage`; the rest of
//! this stack speaks `std::net::SocketAddr`. Both directions live here so no
//! other module needs the libc layouts.

use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use crate::error::{Error, Result};

/// Encode a `SocketAddr` into a `sockaddr_storage` plus its effective length.
pub fn socket_addr_to_storage(addr: &SocketAddr) -> (libc::sockaddr_storage, libc::socklen_t) {
    let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
    match addr {
        SocketAddr::V4(v4) => {
            let sin = unsafe { &mut *(&mut storage as *mut _ as *mut libc::sockaddr_in) };
            sin.sin_family = libc::AF_INET as libc::sa_family_t;
            sin.sin_port = v4.port().to_be();
            sin.sin_addr.s_addr = u32::from_ne_bytes(v4.ip().octets());
            (storage, mem::size_of::<libc::sockaddr_in>() as libc::socklen_t)
        }
        SocketAddr::V6(v6) => {
            let sin6 = unsafe { &mut *(&mut storage as *mut _ as *mut libc::sockaddr_in6) };
            sin6.sin6_family = libc::AF_INET6 as libc::sa_family_t;
            sin6.sin6_port = v6.port().to_be();
            sin6.sin6_flowinfo = v6.flowinfo();
            sin6.sin6_addr.s6_addr = v6.ip().octets();
            sin6.sin6_scope_id = v6.scope_id();
            (storage, mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t)
        }
    }
}

/// Decode a `sockaddr_storage` the engine produced back into a `SocketAddr`.
///
/// Only `AF_INET` and `AF_INET6` are meaningful here; anything else is an
/// [`Error::Address`].
pub fn sockaddr_storage_to_socket_addr(storage: &libc::sockaddr_storage) -> Result<SocketAddr> {
    match storage.ss_family as libc::c_int {
        libc::AF_INET => {
            let sin = unsafe { &*(storage as *const _ as *const libc::sockaddr_in) };
            let ip = Ipv4Addr::from(sin.sin_addr.s_addr.to_ne_bytes());
            Ok(SocketAddr::V4(SocketAddrV4::new(ip, u16::from_be(sin.sin_port))))
        }
        libc::AF_INET6 => {
            let sin6 = unsafe { &*(storage as *const _ as *const libc::sockaddr_in6) };
            let ip = Ipv6Addr::from(sin6.sin6_addr.s6_addr);
            Ok(SocketAddr::V6(SocketAddrV6::new(
                ip,
                u16::from_be(sin6.sin6_port),
                sin6.sin6_flowinfo,
                sin6.sin6_scope_id,
            )))
        }
        family => Err(Error::Address {
            message: format!("unsupported address family: {family}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v4_round_trip() {
        let addr: SocketAddr = "127.0.0.1:4433".parse().unwrap();
        let (storage, len) = socket_addr_to_storage(&addr);
        assert_eq!(len as usize, mem::size_of::<libc::sockaddr_in>());
        assert_eq!(sockaddr_storage_to_socket_addr(&storage).unwrap(), addr);
    }

    #[test]
    fn v4_port_byte_order() {
        let addr: SocketAddr = "10.0.0.1:1".parse().unwrap();
        let (storage, _) = socket_addr_to_storage(&addr);
        let sin = unsafe { &*(&storage as *const _ as *const libc::sockaddr_in) };
        // Port 1 in network byte order.
        assert_eq!(sin.sin_port, 1u16.to_be());
    }

    #[test]
    fn v6_round_trip_keeps_scope_and_flowinfo() {
        let addr = SocketAddr::V6(SocketAddrV6::new(
            "fe80::1".parse().unwrap(),
            8443,
            7,
            3,
        ));
        let (storage, len) = socket_addr_to_storage(&addr);
        assert_eq!(len as usize, mem::size_of::<libc::sockaddr_in6>());
        assert_eq!(sockaddr_storage_to_socket_addr(&storage).unwrap(), addr);
    }

    #[test]
    fn unknown_family_rejected() {
        let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
        storage.ss_family = libc::AF_UNIX as libc::sa_family_t;
        let err = sockaddr_storage_to_socket_addr(&storage).unwrap_err();
        assert!(matches!(err, Error::Address { .. }));
    }
}
