//! Concurrent session management for the chat mini-games.
//!
//! One [`Registry`] owns every live match. Sessions are independent: the
//! map is sharded, each session serializes its own moves behind its own
//! lock, and each session carries one cancellable eviction timer. The
//! hosting chat layer only ever talks to the registry surface.

pub mod ratings;
pub mod registry;

pub use ratings::{settle, MemoryRatingStore, RatingStore};
pub use registry::Registry;
