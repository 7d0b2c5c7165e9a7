//! Web search collaborators.
//!
//! The pipeline only sees the [`SearchClient`] trait: a query string in,
//! raw snippet strings out, in the order the service ranked them.

pub mod google;
pub mod retry;

pub use google::GoogleSearchClient;
pub use retry::RetryingSearchClient;

use crate::error::Result;

pub trait SearchClient {
    /// Runs one query and returns the raw snippet text of every result.
    ///
    /// Fails with `SearchUnavailable` on transport or HTTP errors,
    /// `NoResults` when the service returned nothing, and
    /// `MalformedResponse` when the payload cannot be read.
    fn query(&self, text: &str) -> Result<Vec<String>>;
}

impl<T: SearchClient + ?Sized> SearchClient for &T {
    fn query(&self, text: &str) -> Result<Vec<String>> {
        (**self).query(text)
    }
}

impl<T: SearchClient + ?Sized> SearchClient for Box<T> {
    fn query(&self, text: &str) -> Result<Vec<String>> {
        (**self).query(text)
    }
}
