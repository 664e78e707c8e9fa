//! In-memory registry and index helpers.

/// Helper index aliases.
pub mod indices;
/// Team/player registry façade and snapshot format.
pub mod registry;
