//! # Proxy chain
//!
//! This crate deduces a trustworthy client ip address from a forwarding chain such as the
//! `X-Forwarded-For` header.
//!
//! ## Usage
//!
//! ```rust
//! use proxy_chain::TrustStore;
//!
//! let mut store = TrustStore::new();
//! // our own reverse proxy
//! store.add_trusted("10.10.10.10").unwrap();
//! // a CDN in front of it
//! store.add_trusted("20.20.0.0/16").unwrap();
//!
//! let peer = core::net::IpAddr::from([10, 10, 10, 10]);
//! let chain = store.evaluator().evaluate(peer, "40.40.40.40, 30.30.30.30, 20.20.1.1");
//!
//! assert_eq!(chain.client_ip(), Some(core::net::IpAddr::from([30, 30, 30, 30])));
//! assert_eq!(chain.hop_count(), 3);
//! ```
//!
//! ## Implementation
//!
//! The chain is the header values followed by the peer address. It is walked backward starting
//! from the peer, every trusted hop lets the walk continue to the previous one. The first hop
//! that is not trusted, or cannot be parsed as an ip address, is the deduced client. When every
//! hop is trusted the oldest one is used.
//!
//! Anything before the deduced client is discarded, as it could have been forged by the client
//! itself.
//!
//! ## Features
//!
//!  * `http` (default): extract the chain from `http::Request` and `http::request::Parts`.
//!  * `serde`: deserialize a [`TrustStore`] from a list of IPs and CIDRs.

mod candidate;
mod chain;
mod error;
mod extract;
mod store;

pub use candidate::Candidate;
pub use chain::{ChainEvaluator, TrustedChain};
pub use error::Error;
pub use extract::ForwardedFor;
pub use ipnet::IpNet;
pub use store::TrustStore;
