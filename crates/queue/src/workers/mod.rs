//! Job workers.

mod onesignal;

pub use onesignal::{OnesignalContext, onesignal_worker};
