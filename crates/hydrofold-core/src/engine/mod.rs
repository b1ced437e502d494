//! # Engine Module
//!
//! The stateful layer that drives relaxation: configuration, the per-tick
//! force steps, and the seam to whatever draws the chain.
//!
//! - [`config`] - `RelaxationConfig`, its builder and the bond-length policy
//! - [`relaxation`] - `RelaxationEngine::tick`, the ordered force pass
//! - [`tasks`] - one module per force step
//! - [`scene`] - the `Scene` trait, a headless implementation and chain bindings
//! - [`clock`] - frame pacing
//! - [`control`] - cancellation and stop reasons
//! - [`progress`] - callback-based progress reporting
//! - [`error`] - the engine's error type

pub mod clock;
pub mod config;
pub mod control;
pub mod error;
pub mod progress;
pub mod relaxation;
pub mod scene;
pub mod tasks;
