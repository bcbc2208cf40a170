//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod advisory;
pub mod posting;

pub use account::{AccountRepository, ResolvedReference};
pub use advisory::AdvisoryRepository;
pub use posting::{PostedBatch, PostingError, PostingRepository, ReversalResult};
