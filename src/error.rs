use ipnet::AddrParseError;

/// Errors raised while populating a [`TrustStore`](crate::TrustStore)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The trust specification is neither an ip address nor a CIDR
    #[error("invalid trust specification {spec:?}: {source}")]
    InvalidTrustSpec {
        spec: String,
        #[source]
        source: AddrParseError,
    },
}

impl Error {
    pub(crate) fn invalid_trust_spec(spec: &str, source: AddrParseError) -> Self {
        Self::InvalidTrustSpec {
            spec: spec.to_string(),
            source,
        }
    }

    /// The specification that was rejected
    pub fn spec(&self) -> &str {
        match self {
            Self::InvalidTrustSpec { spec, .. } => spec,
        }
    }
}
