//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! unknown or unsupported region tags, degenerate geometric queries, invalid shape
//! parameters, and the sequential vertex-table signals.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The region tag is not known, or not supported by this sampler.
    #[error("[{sampler}] unknown generation region: {region}")]
    UnknownRegion {
        sampler: &'static str,
        region: String,
    },

    /// A geometric query without a valid answer, e.g. a ray with no forward boundary crossing.
    #[error("[{sampler}] degenerate query: {reason}")]
    DegenerateQuery {
        sampler: &'static str,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The region is served sequentially and cannot be drawn from a stateless sampler.
    #[error("[{sampler}] region {region} is sequential; build a vertex table instead")]
    SequentialRegion {
        sampler: &'static str,
        region: String,
    },

    #[error("number of events too small: at least {required} events are needed, {configured} configured")]
    InsufficientEvents { required: usize, configured: usize },

    #[error("vertex table exhausted after {len} vertices")]
    TableExhausted { len: usize },
}
