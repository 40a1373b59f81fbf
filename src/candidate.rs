use core::fmt;
use core::net::IpAddr;

/// One hop of a forwarding chain
///
/// Header segments that are not ip addresses are kept in place as
/// [`Candidate::Unparseable`] with their trimmed raw text, so a malformed hop still occupies its
/// position in the chain and stops the trust walk when reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Candidate {
    Address(IpAddr),
    Unparseable(String),
}

impl Candidate {
    /// Parse a single, already trimmed, hop value
    pub fn parse(value: &str) -> Self {
        match value.parse::<IpAddr>() {
            Ok(ip) => Self::Address(ip),
            Err(_) => Self::Unparseable(value.to_string()),
        }
    }

    /// The parsed address, if any
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Self::Address(ip) => Some(*ip),
            Self::Unparseable(_) => None,
        }
    }

    /// Whether this hop is not an ip address
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::Unparseable(_))
    }
}

impl From<IpAddr> for Candidate {
    fn from(ip: IpAddr) -> Self {
        Self::Address(ip)
    }
}

/// A missing peer address is an unparseable hop with no text
impl From<Option<IpAddr>> for Candidate {
    fn from(ip: Option<IpAddr>) -> Self {
        match ip {
            Some(ip) => Self::Address(ip),
            None => Self::Unparseable(String::new()),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(ip) => fmt::Display::fmt(ip, f),
            Self::Unparseable(raw) => write!(f, "{raw:?}"),
        }
    }
}
