//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the owning process.
//!
//! # Tasks
//! - Expiry sweep: purges expired cache entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
