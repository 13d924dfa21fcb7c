//! Persistence module for the backdrop seed
//!
//! Provides snapshot export/import so a host can keep its background
//! stable across reloads.

mod snapshot;

pub use snapshot::BackdropSnapshot;
