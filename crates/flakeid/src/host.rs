use crate::{FlakeId, HostResolutionError};
use core::fmt;
use rand::{TryRngCore, rngs::OsRng};
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

/// The 10-bit host identifier embedded in every [`FlakeId`].
///
/// Host IDs are intended, but not guaranteed, to be distinct across a
/// cluster. [`HostId::from_ipv4`] reduces an address modulo 1023, so two hosts
/// whose addresses are congruent collide. There is no coordination to detect
/// this.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostId(u16);

impl HostId {
    /// Validates an explicit host ID.
    ///
    /// # Errors
    ///
    /// Returns [`HostResolutionError::OutOfRange`] if `id` exceeds
    /// [`FlakeId::MAX_HOST_ID`].
    pub fn new(id: u16) -> Result<Self, HostResolutionError> {
        if u64::from(id) > FlakeId::MAX_HOST_ID {
            return Err(HostResolutionError::OutOfRange(u64::from(id)));
        }
        Ok(Self(id))
    }

    /// Derives a host ID from an IPv4 address: the address as a big-endian
    /// `u32`, modulo 1023.
    pub const fn from_ipv4(addr: Ipv4Addr) -> Self {
        Self((addr.to_bits() % FlakeId::MAX_HOST_ID as u32) as u16)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<HostId> for u64 {
    fn from(host: HostId) -> Self {
        u64::from(host.0)
    }
}

/// Produces the host ID a generator stamps into every ID.
///
/// A resolver runs exactly once, when the generator is built.
pub trait HostResolver {
    /// Resolves the host ID.
    ///
    /// # Errors
    ///
    /// Returns a [`HostResolutionError`] when no usable host ID can be
    /// produced. This is fatal for the generator being built.
    fn resolve(&self) -> Result<HostId, HostResolutionError>;
}

impl<R: HostResolver + ?Sized> HostResolver for &R {
    fn resolve(&self) -> Result<HostId, HostResolutionError> {
        (**self).resolve()
    }
}

/// Resolves a host ID from a static IPv4 address.
impl HostResolver for Ipv4Addr {
    fn resolve(&self) -> Result<HostId, HostResolutionError> {
        Ok(HostId::from_ipv4(*self))
    }
}

/// A resolver that always yields the same, caller-chosen host ID.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedHost(HostId);

impl FixedHost {
    pub const fn new(host: HostId) -> Self {
        Self(host)
    }
}

impl HostResolver for FixedHost {
    fn resolve(&self) -> Result<HostId, HostResolutionError> {
        Ok(self.0)
    }
}

/// Where [`NetworkResolver`] found the address it reduced into a host ID.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressSource {
    /// The first address the local hostname resolves to.
    Hostname,
    /// The first non-loopback IPv4 address on a local interface.
    Interface,
    /// Four bytes from the OS random number generator.
    Random,
}

/// Derives the host ID from the machine's IPv4 address.
///
/// Strategies are tried in order:
///
/// 1. Resolve the local hostname. Only the first resolved address is
///    considered, and only if it is IPv4.
/// 2. Scan the local interfaces for the first non-loopback IPv4 address.
/// 3. Draw four bytes from the OS random number generator. The result may not
///    be a routable address, but it only feeds the modulo reduction.
///
/// Only local system calls are made; nothing is sent over the network.
#[derive(Copy, Clone, Debug, Default)]
pub struct NetworkResolver;

impl NetworkResolver {
    /// Runs the strategy chain and reports which strategy won.
    ///
    /// # Errors
    ///
    /// Returns [`HostResolutionError::Entropy`] if both lookups fail and the
    /// OS random number generator is unavailable.
    pub fn resolve_address(&self) -> Result<(Ipv4Addr, AddressSource), HostResolutionError> {
        if let Some(addr) = hostname_ipv4() {
            return Ok((addr, AddressSource::Hostname));
        }
        if let Some(addr) = interface_ipv4() {
            return Ok((addr, AddressSource::Interface));
        }
        random_ipv4().map(|addr| (addr, AddressSource::Random))
    }
}

impl HostResolver for NetworkResolver {
    fn resolve(&self) -> Result<HostId, HostResolutionError> {
        let (addr, _source) = self.resolve_address()?;
        let host = HostId::from_ipv4(addr);
        #[cfg(feature = "tracing")]
        tracing::debug!(%addr, source = ?_source, %host, "resolved flake host id");
        Ok(host)
    }
}

fn hostname_ipv4() -> Option<Ipv4Addr> {
    let name = hostname::get().ok()?.into_string().ok()?;
    let first = (name.as_str(), 0).to_socket_addrs().ok()?.next()?;
    match first.ip() {
        IpAddr::V4(addr) => Some(addr),
        IpAddr::V6(_) => None,
    }
}

fn interface_ipv4() -> Option<Ipv4Addr> {
    let interfaces = if_addrs::get_if_addrs().ok()?;
    first_non_loopback_ipv4(interfaces.iter().map(if_addrs::Interface::ip))
}

fn first_non_loopback_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) if !v4.is_loopback() => Some(v4),
        _ => None,
    })
}

fn random_ipv4() -> Result<Ipv4Addr, HostResolutionError> {
    let mut octets = [0u8; 4];
    OsRng
        .try_fill_bytes(&mut octets)
        .map_err(HostResolutionError::Entropy)?;
    Ok(Ipv4Addr::from(octets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn from_ipv4_is_modulo_1023() {
        let addr = Ipv4Addr::new(192, 168, 1, 10);
        let expected = (u32::from(addr) % 1023) as u16;
        assert_eq!(HostId::from_ipv4(addr).get(), expected);
        assert_eq!(HostId::from_ipv4(Ipv4Addr::new(0, 0, 3, 255)).get(), 0);
        assert_eq!(HostId::from_ipv4(Ipv4Addr::new(0, 0, 4, 0)).get(), 1);
        assert_eq!(HostId::from_ipv4(Ipv4Addr::UNSPECIFIED).get(), 0);
    }

    #[test]
    fn from_ipv4_stays_in_host_field() {
        for addr in [Ipv4Addr::BROADCAST, Ipv4Addr::new(10, 0, 3, 254)] {
            assert!(u64::from(HostId::from_ipv4(addr)) <= FlakeId::MAX_HOST_ID);
        }
    }

    #[test]
    fn host_id_new_validates_range() {
        assert_eq!(HostId::new(1023).unwrap().get(), 1023);
        assert!(matches!(
            HostId::new(1024),
            Err(HostResolutionError::OutOfRange(1024))
        ));
    }

    #[test]
    fn fixed_and_static_resolvers() {
        let host = HostId::new(5).unwrap();
        assert_eq!(FixedHost::new(host).resolve().unwrap(), host);

        let addr = Ipv4Addr::new(10, 1, 2, 3);
        assert_eq!(addr.resolve().unwrap(), HostId::from_ipv4(addr));
        assert_eq!((&addr).resolve().unwrap(), HostId::from_ipv4(addr));
    }

    #[test]
    fn interface_scan_skips_loopback_and_ipv6() {
        let addrs = [
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::new(172, 16, 0, 4)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)),
        ];
        assert_eq!(
            first_non_loopback_ipv4(addrs),
            Some(Ipv4Addr::new(172, 16, 0, 4))
        );
        assert_eq!(
            first_non_loopback_ipv4([IpAddr::V4(Ipv4Addr::new(127, 0, 0, 2))]),
            None
        );
    }

    #[test]
    fn random_fallback_produces_an_address() {
        assert!(random_ipv4().is_ok());
    }

    #[test]
    fn network_resolver_always_yields_a_host_id() {
        let host = NetworkResolver.resolve().unwrap();
        assert!(u64::from(host) <= FlakeId::MAX_HOST_ID);
    }
}
