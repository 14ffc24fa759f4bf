//! Presentation read model
//!
//! Flattens a round into per-box instance data. Drawing itself (GPU setup,
//! camera, lights) belongs to whoever consumes these instances.

pub mod instance;

pub use instance::{BoxInstance, colors, collect_instances, instance_bytes};
