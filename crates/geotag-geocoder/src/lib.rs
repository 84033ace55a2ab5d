pub mod client;
pub mod error;
pub mod rate_limit;
pub mod types;

use std::future::Future;

use geotag_core::Coordinate;

pub use client::NominatimClient;
pub use error::GeocodeError;
pub use rate_limit::RateLimiter;
pub use types::SearchResult;

/// Resolves a free-text location query to a coordinate.
///
/// `Ok(None)` means the provider had no match, which is not an error.
pub trait Geocode {
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, GeocodeError>> + Send;
}

impl Geocode for NominatimClient {
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, GeocodeError>> + Send {
        self.search(query)
    }
}
