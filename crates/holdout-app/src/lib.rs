//! Headless host for HOLDOUT: a fixed-rate game-loop thread, the shared
//! state collaborators talk to it through, and the error type of the
//! `holdout` binary.

pub mod error;
pub mod game_loop;
pub mod state;
