//! Best-effort loopback address resolution.
//!
//! The system resolver is asked for the address of "no host", which by
//! contract is a loopback address. If that fails the literal `127.0.0.1` is
//! resolved instead. Neither failure reaches the caller; the worst outcome is
//! `None`, and a bad address then surfaces later when something binds to it.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};

/// Literal used when the unnamed-host lookup fails.
pub const FALLBACK_LOOPBACK: &str = "127.0.0.1";

/// Name resolution seam. `None` asks for the unnamed host.
pub trait NameResolver {
    fn resolve(&self, host: Option<&str>) -> io::Result<IpAddr>;
}

/// Resolver backed by the platform's `getaddrinfo`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl NameResolver for SystemResolver {
    fn resolve(&self, host: Option<&str>) -> io::Result<IpAddr> {
        match host {
            None => resolve_unnamed_host(),
            Some(name) => (name, 0)
                .to_socket_addrs()?
                .next()
                .map(|addr| addr.ip())
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, format!("no addresses for {name}"))
                }),
        }
    }
}

/// Resolve the loopback address through `resolver`, swallowing both failures.
pub fn loopback_address_with(resolver: &dyn NameResolver) -> Option<IpAddr> {
    match resolver.resolve(None) {
        Ok(addr) => return Some(addr),
        Err(err) => {
            tracing::debug!(error = %err, "unnamed host lookup failed; trying literal loopback");
        }
    }

    match resolver.resolve(Some(FALLBACK_LOOPBACK)) {
        Ok(addr) => Some(addr),
        Err(err) => {
            tracing::debug!(
                error = %err,
                literal = FALLBACK_LOOPBACK,
                "literal loopback lookup failed"
            );
            None
        }
    }
}

#[cfg(unix)]
fn resolve_unnamed_host() -> io::Result<IpAddr> {
    use std::ffi::CStr;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::ptr;

    // POSIX requires a service when the node is NULL.
    let service = c"0";
    // SAFETY: an all-zero addrinfo is the documented "no hints" value.
    let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
    hints.ai_family = libc::AF_UNSPEC;
    hints.ai_socktype = libc::SOCK_STREAM;

    let mut results: *mut libc::addrinfo = ptr::null_mut();
    // SAFETY: node is NULL (loopback by contract), service and hints are valid
    // for the duration of the call, and `results` receives an owned list.
    let status = unsafe { libc::getaddrinfo(ptr::null(), service.as_ptr(), &hints, &mut results) };
    if status != 0 {
        // SAFETY: gai_strerror returns a static NUL-terminated string.
        let message = unsafe { CStr::from_ptr(libc::gai_strerror(status)) };
        return Err(io::Error::other(format!(
            "getaddrinfo failed: {}",
            message.to_string_lossy()
        )));
    }

    let mut found = None;
    let mut cursor = results;
    while !cursor.is_null() {
        // SAFETY: cursor walks the list returned by getaddrinfo, which stays
        // alive until freeaddrinfo below.
        let entry = unsafe { &*cursor };
        if !entry.ai_addr.is_null() {
            match entry.ai_family {
                libc::AF_INET => {
                    // SAFETY: AF_INET entries carry a sockaddr_in.
                    let sin = unsafe { &*(entry.ai_addr as *const libc::sockaddr_in) };
                    found = Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr))));
                }
                libc::AF_INET6 => {
                    // SAFETY: AF_INET6 entries carry a sockaddr_in6.
                    let sin6 = unsafe { &*(entry.ai_addr as *const libc::sockaddr_in6) };
                    found = Some(IpAddr::V6(Ipv6Addr::from(sin6.sin6_addr.s6_addr)));
                }
                _ => {}
            }
        }
        if found.is_some() {
            break;
        }
        cursor = entry.ai_next;
    }

    // SAFETY: `results` came from a successful getaddrinfo and is freed once.
    unsafe { libc::freeaddrinfo(results) };

    found.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "getaddrinfo returned no inet addresses",
        )
    })
}

#[cfg(not(unix))]
fn resolve_unnamed_host() -> io::Result<IpAddr> {
    ("localhost", 0)
        .to_socket_addrs()?
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no addresses for localhost"))
}
