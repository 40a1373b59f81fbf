use std::borrow::Cow;

use crate::chain::{ChainEvaluator, TrustedChain};
use crate::Candidate;

/// A trait to extract the forwarding chain from a request
pub trait ForwardedFor {
    /// Get the `X-Forwarded-For` header values
    ///
    /// Values are returned in the order they appear in the request, a proxy appending a new
    /// header line instead of extending the existing one is equivalent to a comma separated list.
    /// A value that is not valid UTF-8 must still be returned, lossily decoded, so it keeps its
    /// slot in the chain.
    fn x_forwarded_for(&self) -> impl DoubleEndedIterator<Item = Cow<'_, str>>;
}

impl ChainEvaluator<'_> {
    /// Evaluate the `X-Forwarded-For` chain of a request received from `peer`
    pub fn evaluate_request<T: ForwardedFor>(
        &self,
        peer: impl Into<Candidate>,
        request: &T,
    ) -> TrustedChain {
        let header = request.x_forwarded_for().collect::<Vec<_>>().join(",");

        self.evaluate(peer, &header)
    }
}

#[cfg(feature = "http")]
mod http {
    use std::borrow::Cow;

    use super::ForwardedFor;

    impl<T> ForwardedFor for http::Request<T> {
        fn x_forwarded_for(&self) -> impl DoubleEndedIterator<Item = Cow<'_, str>> {
            self.headers()
                .get_all("x-forwarded-for")
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()))
        }
    }

    impl ForwardedFor for http::request::Parts {
        fn x_forwarded_for(&self) -> impl DoubleEndedIterator<Item = Cow<'_, str>> {
            self.headers
                .get_all("x-forwarded-for")
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()))
        }
    }
}
