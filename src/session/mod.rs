pub mod controller;
mod state;

pub use controller::{SessionSnapshot, SwipeEngine, SwipeError, SwipeOutcome};
