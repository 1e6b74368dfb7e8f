use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::events::EventPublisher;
use crate::stripe::StripeClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub stripe: StripeClient,
    pub config: Config,
    /// Pluggable domain-event bus. Production: Redis pub/sub. Tests swap in
    /// a recording publisher.
    pub events: Arc<dyn EventPublisher>,
}
