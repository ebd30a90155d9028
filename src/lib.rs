//! Storelens - store analytics aggregation engine
//!
//! Transforms raw transactional records (catalog items, orders, customers)
//! into the derived datasets a commerce dashboard renders: histograms, age
//! distributions, monthly revenue series, popularity rankings and
//! lifetime-value leaderboards, plus the flattened context block an
//! assistant consumes.
//!
//! Every aggregation is a pure, synchronous function over in-memory
//! snapshots. Fetching, authentication, rendering and prompting live in
//! external layers; this crate starts at normalized records and a caller
//! supplied clock, and ends at plain data structures.

pub mod aggregate;
pub mod error;
pub mod export;
pub mod normalize;
pub mod types;

pub use error::{Result, StorelensError};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
