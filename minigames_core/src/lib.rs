//! Game logic for the chat mini-games: the three match state machines,
//! the Tic-Tac-Toe search engine, and the Elo rating functions.
//!
//! Everything here is synchronous and self-contained. Session lifecycles,
//! timers, and concurrency live in the `manager` crate.

pub mod engine;
pub mod games;
pub mod rating;
