//! OneSignal worker.

use apalis::prelude::*;
use forumpush_core::{DeliveryOutcome, OnesignalClient, OnesignalPushJob};
use tracing::debug;

/// Context for the OneSignal worker.
#[derive(Clone)]
pub struct OnesignalContext {
    pub client: OnesignalClient,
}

impl OnesignalContext {
    /// Create a new worker context.
    #[must_use]
    pub const fn new(client: OnesignalClient) -> Self {
        Self { client }
    }
}

/// Worker function for OneSignal deliveries.
///
/// Delivery is attempted once. Failures are logged by the client and the
/// job still completes, so it is never requeued.
///
/// # Errors
/// Never returns an error.
pub async fn onesignal_worker(job: OnesignalPushJob, ctx: Data<OnesignalContext>) -> Result<(), Error> {
    debug!(username = %job.username, "Delivering OneSignal push");

    let outcome = ctx.client.deliver(&job).await;
    if let DeliveryOutcome::Rejected { status, .. } = outcome {
        debug!(username = %job.username, status, "OneSignal rejected push");
    }

    Ok(())
}
