//! Core business logic for forumpush.
//!
//! - **Dispatch gate**: [`PushDispatcher`] decides which delivery jobs a
//!   notification produces
//! - **Vendor delivery**: [`OnesignalClient`] performs the OneSignal request
//! - **Ports**: [`RecipientDirectory`] and [`JobQueue`] keep storage and the
//!   queue implementation out of the dispatch logic

pub mod services;

pub use services::*;
