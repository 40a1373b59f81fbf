use core::mem;
use core::net::IpAddr;

use tracing::trace;

use crate::{Candidate, TrustStore};

/// Result of walking a forwarding chain back from the peer
///
/// Hops are kept in walk order: the peer comes first, the deduced client last. Every hop but the
/// client has been confirmed as a trusted proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedChain {
    proxies: Vec<Candidate>,
    client: Candidate,
}

impl TrustedChain {
    /// The deduced client, i.e. the first untrusted hop or the oldest known one
    pub fn client(&self) -> &Candidate {
        &self.client
    }

    /// The deduced client address, `None` when this hop could not be parsed
    pub fn client_ip(&self) -> Option<IpAddr> {
        self.client.ip()
    }

    /// Trusted proxies that were walked through, starting with the peer
    pub fn proxies(&self) -> &[Candidate] {
        &self.proxies
    }

    /// Every hop of the truncated chain in walk order, client included
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = &Candidate> {
        self.proxies.iter().chain(core::iter::once(&self.client))
    }

    /// Number of hops, never zero
    pub fn hop_count(&self) -> usize {
        self.proxies.len() + 1
    }

    /// Consume the chain, keeping only the deduced client
    pub fn into_client(self) -> Candidate {
        self.client
    }
}

/// Deduce client addresses from forwarding chains using a [`TrustStore`]
///
/// # Example
/// ```
/// use proxy_chain::TrustStore;
///
/// let mut store = TrustStore::new();
/// // our own proxy
/// store.add_trusted("10.10.10.10").unwrap();
/// // another proxy in front of it
/// store.add_trusted("20.20.20.20").unwrap();
///
/// let chain = store
///     .evaluator()
///     .evaluate("10.10.10.10".parse::<core::net::IpAddr>().unwrap(), "40.40.40.40, 30.30.30.30, 20.20.20.20");
///
/// assert_eq!(chain.client_ip(), Some("30.30.30.30".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChainEvaluator<'a> {
    store: &'a TrustStore,
}

impl<'a> ChainEvaluator<'a> {
    /// Create an evaluator borrowing `store`
    pub fn new(store: &'a TrustStore) -> Self {
        Self { store }
    }

    /// Split a forwarding header into hops, oldest first
    ///
    /// A blank header has no hop at all, while every other segment that is not an ip address
    /// keeps its slot as [`Candidate::Unparseable`].
    pub fn parse_header(header: &str) -> Vec<Candidate> {
        if header.trim().is_empty() {
            return Vec::new();
        }

        header
            .split(',')
            .map(|value| Candidate::parse(value.trim()))
            .collect()
    }

    /// Walk the chain `header` + `peer` backward until the first hop that is not a trusted proxy
    ///
    /// The peer is always part of the result, even when it is not trusted or not parseable.
    pub fn evaluate(&self, peer: impl Into<Candidate>, header: &str) -> TrustedChain {
        let mut client = peer.into();
        let mut hops = Self::parse_header(header).into_iter().rev();
        let mut proxies = Vec::new();

        while self.is_trusted(&client) {
            // header exhausted, the oldest hop is the best we know
            let Some(next) = hops.next() else {
                break;
            };

            trace!(proxy = %client, "walking through trusted proxy");
            proxies.push(mem::replace(&mut client, next));
        }

        trace!(%client, hops = proxies.len() + 1, "deduced client");

        TrustedChain { proxies, client }
    }

    /// Shorthand for the client address of [`ChainEvaluator::evaluate`]
    pub fn deduce_client_ip(&self, peer: impl Into<Candidate>, header: &str) -> Option<IpAddr> {
        self.evaluate(peer, header).client_ip()
    }

    fn is_trusted(&self, candidate: &Candidate) -> bool {
        match candidate {
            Candidate::Address(ip) => self.store.is_trusted(ip).is_some(),
            Candidate::Unparseable(_) => false,
        }
    }
}
