//! Redis-backed job queue.
//!
//! Each job kind is pushed to its own apalis storage, namespaced by the job
//! name, so the forum's runner and the OneSignal worker consume separate
//! queues.

use apalis::prelude::*;
use apalis_redis::{RedisStorage, Config as StorageConfig};
use async_trait::async_trait;
use forumpush_common::{AppError, AppResult};
use forumpush_core::{ClientPushJob, JobQueue, OnesignalPushJob, PushJob, SendPushNotificationJob};
use redis::aio::ConnectionManager;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Redis-backed [`JobQueue`].
#[derive(Clone)]
pub struct RedisJobQueue {
    browser: RedisStorage<SendPushNotificationJob>,
    onesignal: RedisStorage<OnesignalPushJob>,
    clients: RedisStorage<ClientPushJob>,
}

impl RedisJobQueue {
    /// Create a queue over a shared Redis connection.
    #[must_use]
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            browser: storage(conn.clone(), SendPushNotificationJob::NAME),
            onesignal: storage(conn.clone(), OnesignalPushJob::NAME),
            clients: storage(conn, ClientPushJob::NAME),
        }
    }

    /// Storage the OneSignal worker consumes.
    #[must_use]
    pub fn onesignal_storage(&self) -> RedisStorage<OnesignalPushJob> {
        self.onesignal.clone()
    }
}

/// Storage for one job kind, namespaced by its job name.
#[must_use]
pub fn storage<T>(conn: ConnectionManager, name: &str) -> RedisStorage<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static,
{
    RedisStorage::new_with_config(conn, StorageConfig::default().set_namespace(name))
}

async fn push<T>(mut storage: RedisStorage<T>, job: T, name: &str) -> AppResult<()>
where
    T: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static,
{
    storage
        .push(job)
        .await
        .map_err(|e| AppError::Queue(format!("Failed to queue {name}: {e}")))?;

    tracing::debug!(job = %name, "Queued push job");
    Ok(())
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn submit(&self, job: PushJob) -> AppResult<()> {
        let name = job.name();
        match job {
            PushJob::SendPushNotification(job) => push(self.browser.clone(), job, name).await,
            PushJob::OnesignalPushNotification(job) => {
                push(self.onesignal.clone(), job, name).await
            }
            PushJob::ClientPush(job) => push(self.clients.clone(), job, name).await,
        }
    }
}
