//! # Workflows Module
//!
//! Top-level entry points for running a relaxation from a sequence.
//!
//! - **Relaxation Workflow** ([`relax`]) - build a chain, bind it to a scene and run the
//!   tick loop until the tick budget is spent or the run is cancelled.

pub mod relax;
