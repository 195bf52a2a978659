// Library crate: the layout engine and its headless session.
// The binary only replays command batches against it.

pub mod command;
pub mod fixtures;
pub mod geometry;
pub mod interaction;
pub mod session;
pub mod snap;
pub mod state;
pub mod units;
pub mod validation;
