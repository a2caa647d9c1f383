//! Common utilities and shared types for forumpush.
//!
//! This crate provides foundational components used across all forumpush crates:
//!
//! - **Configuration**: Application and site settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use forumpush_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("OneSignal endpoint: {}", config.onesignal.api_url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::{Config, ONESIGNAL_API_URL, OnesignalConfig, PushSettings};
pub use error::{AppError, AppResult};
