//! Shared worker primitives for the playground runtime.
//!
//! The playground actor, the preview server, clipboard copies and the stdin
//! reader are spawned through [`spawn`], [`spawn_blocking`] and
//! [`spawn_named_thread`] so they carry a [`TaskClass`] in traces. The async
//! variants work whether or not the caller already runs inside tokio.

mod class;
mod spawn;
mod token;

pub use class::TaskClass;
pub use spawn::{spawn, spawn_blocking, spawn_named_thread};
pub use token::{Generation, GenerationClock};
pub use tokio_util::sync::CancellationToken;
