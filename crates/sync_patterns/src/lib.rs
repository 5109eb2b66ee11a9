//! Classic blocking synchronization patterns, built so that their guarantees can be checked.
//!
//! Two patterns are provided, each over more than one primitive:
//!
//! - [channel]: a bounded FIFO channel between producers and consumers, as a monitor (mutex plus two condition
//!   variables) or over counting semaphores.
//! - [record]: a two-field record under a readers-preference readers/writers policy, over hand-off locks or binary
//!   semaphores, plus an unsynchronized control which demonstrably tears.
//!
//! The [harness] module runs either pattern with rosters of worker threads, injecting seeded random pauses to widen
//! interleavings, and reports what happened.  Runs are described by a [Config].
//!
//! Under `--cfg loom` the primitives are built on loom's, and their tests run as loom models.  The harness needs real
//! threads and is not available there.
pub mod channel;
pub mod config;
pub mod error;
#[cfg(not(loom))]
pub mod harness;
pub mod pause;
pub mod record;
pub mod semaphore;
mod sync;
pub mod worker;

pub use channel::{BoundedChannel, ChannelBackend, MonitorChannel, SemaphoreChannel};
pub use config::{Config, ConfigBuilder};
pub use error::{ConfigError, Error, Result, SetupError};
#[cfg(not(loom))]
pub use harness::{run_producer_consumer, run_readers_writers, ChannelReport, RecordReport};
pub use pause::Pauser;
pub use record::{Observation, RecordAccess, RecordVariant};
pub use semaphore::Semaphore;
