use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use core::str::FromStr;

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use tracing::{debug, warn};

use crate::chain::ChainEvaluator;
use crate::Error;

/// List of networks whose forwarded-address claims are accepted
///
/// By default (see [`TrustStore::new_local`]) it trusts the following:
///   - IPV4 Loopback
///   - IPV4 Private Networks
///   - IPV6 Loopback
///   - IPV6 Private Networks
///
/// The store is meant to be filled once, then only read: evaluations borrow it immutably, so it
/// can be shared between threads behind an `Arc` once setup is done. Adding ranges while
/// evaluations are running requires external synchronization.
///
/// # Example
/// ```
/// use proxy_chain::TrustStore;
///
/// let mut store = TrustStore::new_local();
/// store.add_trusted("168.10.0.0/16").unwrap();
///
/// assert!(store.is_trusted(&"168.10.4.2".parse().unwrap()).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustStore {
    trusted_nets: Vec<IpNet>,
}

impl TrustStore {
    /// Create an empty store, nothing is trusted
    pub fn new() -> Self {
        Self {
            trusted_nets: Vec::new(),
        }
    }

    /// Create a store with local and private networks trusted
    pub fn new_local() -> Self {
        Self {
            trusted_nets: vec![
                // IPV4 Loopback
                IpNet::V4(Ipv4Net::new_assert(Ipv4Addr::new(127, 0, 0, 0), 8)),
                // IPV4 Private Networks
                IpNet::V4(Ipv4Net::new_assert(Ipv4Addr::new(10, 0, 0, 0), 8)),
                IpNet::V4(Ipv4Net::new_assert(Ipv4Addr::new(172, 16, 0, 0), 12)),
                IpNet::V4(Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 0, 0), 16)),
                // IPV6 Loopback
                IpNet::V6(Ipv6Net::new_assert(Ipv6Addr::LOCALHOST, 128)),
                // IPV6 Private network
                IpNet::V6(Ipv6Net::new_assert(
                    Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 0),
                    8,
                )),
            ],
        }
    }

    /// Add a trusted proxy to the list
    ///
    /// `spec` can be an IP address or a CIDR. A bare address only trusts itself (`/32` or
    /// `/128`). On error the store is left unchanged, callers who prefer to skip malformed
    /// entries can simply discard the result.
    pub fn add_trusted(&mut self, spec: &str) -> Result<(), Error> {
        let spec = spec.trim();

        match spec.parse::<IpNet>() {
            Ok(net) => {
                self.add_trusted_net(net);

                Ok(())
            }
            Err(e) => match spec.parse::<IpAddr>() {
                Ok(ip) => {
                    self.add_trusted_net(IpNet::from(ip));

                    Ok(())
                }
                _ => {
                    warn!(spec, "ignoring invalid trusted proxy specification");

                    Err(Error::invalid_trust_spec(spec, e))
                }
            },
        }
    }

    /// Add an already parsed network to the list
    pub fn add_trusted_net(&mut self, net: IpNet) {
        let net = normalize(net);
        debug!(%net, "trusting network");

        self.trusted_nets.push(net);
    }

    /// Add every entry of a comma separated list of IPs and CIDRs
    ///
    /// Empty entries are skipped. Stops at the first invalid entry, the ones before it are kept.
    pub fn extend_from_list(&mut self, list: &str) -> Result<(), Error> {
        for spec in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            self.add_trusted(spec)?;
        }

        Ok(())
    }

    /// Return the first trusted network containing `ip`, in insertion order
    ///
    /// IPv4-mapped IPv6 addresses are compared as IPv4, an address never matches a network of
    /// the other family otherwise.
    pub fn is_trusted(&self, ip: &IpAddr) -> Option<&IpNet> {
        let ip = ip.to_canonical();

        self.trusted_nets.iter().find(|net| net.contains(&ip))
    }

    /// Trusted networks in insertion order
    pub fn ranges(&self) -> &[IpNet] {
        &self.trusted_nets
    }

    /// Number of trusted networks
    pub fn len(&self) -> usize {
        self.trusted_nets.len()
    }

    /// Whether nothing is trusted
    pub fn is_empty(&self) -> bool {
        self.trusted_nets.is_empty()
    }

    /// Borrow the store to evaluate forwarding chains
    pub fn evaluator(&self) -> ChainEvaluator<'_> {
        ChainEvaluator::new(self)
    }
}

/// Truncate host bits and store IPv4-mapped ranges as plain IPv4
fn normalize(net: IpNet) -> IpNet {
    let net = net.trunc();

    match net {
        IpNet::V6(v6) if v6.prefix_len() >= 96 => match v6.addr().to_ipv4_mapped() {
            Some(v4) => Ipv4Net::new(v4, v6.prefix_len() - 96)
                .map(IpNet::V4)
                .unwrap_or(net),
            None => net,
        },
        _ => net,
    }
}

impl FromStr for TrustStore {
    type Err = Error;

    fn from_str(list: &str) -> Result<Self, Self::Err> {
        let mut store = Self::new();
        store.extend_from_list(list)?;

        Ok(store)
    }
}

impl TryFrom<Vec<String>> for TrustStore {
    type Error = Error;

    fn try_from(specs: Vec<String>) -> Result<Self, Self::Error> {
        let mut store = Self::new();

        for spec in &specs {
            store.add_trusted(spec)?;
        }

        Ok(store)
    }
}

impl Extend<IpNet> for TrustStore {
    fn extend<T: IntoIterator<Item = IpNet>>(&mut self, iter: T) {
        for net in iter {
            self.add_trusted_net(net);
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TrustStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let specs = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;

        Self::try_from(specs).map_err(serde::de::Error::custom)
    }
}
