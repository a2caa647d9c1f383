//! Background job queue for forumpush.
//!
//! - **Queue**: [`RedisJobQueue`] stores push jobs in Redis via apalis
//! - **Workers**: the OneSignal delivery worker

pub mod redis_queue;
pub mod workers;

pub use redis_queue::{RedisJobQueue, storage};
pub use workers::*;
