use async_trait::async_trait;
use peopledesk_application::SessionPersistence;
use peopledesk_core::{AppError, AppResult};
use redis::AsyncCommands;

/// Session persistence backed by Redis string keys.
#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    client: redis::Client,
    key_prefix: String,
    ttl_seconds: Option<u64>,
}

impl RedisSessionStore {
    /// Creates a store writing keys under `key_prefix`, without expiry.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
            ttl_seconds: None,
        }
    }

    /// Opens a client for `redis_url` and creates a store on it.
    pub fn open(redis_url: &str, key_prefix: impl Into<String>) -> AppResult<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|error| AppError::Validation(format!("invalid redis url: {error}")))?;
        Ok(Self::new(client, key_prefix))
    }

    /// Returns the store with sessions expiring after `ttl_seconds`.
    ///
    /// Zero disables expiry.
    #[must_use]
    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = (ttl_seconds > 0).then_some(ttl_seconds);
        self
    }

    fn key_for(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
    }
}

#[async_trait]
impl SessionPersistence for RedisSessionStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut connection = self.connection().await?;
        connection
            .get::<_, Option<String>>(self.key_for(key))
            .await
            .map_err(|error| AppError::Internal(format!("failed to read session: {error}")))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut connection = self.connection().await?;
        let redis_key = self.key_for(key);

        let result = match self.ttl_seconds {
            Some(ttl_seconds) => {
                connection
                    .set_ex::<_, _, ()>(redis_key, value, ttl_seconds)
                    .await
            }
            None => connection.set::<_, _, ()>(redis_key, value).await,
        };

        result.map_err(|error| AppError::Internal(format!("failed to write session: {error}")))
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut connection = self.connection().await?;
        connection
            .del::<_, i64>(self.key_for(key))
            .await
            .map_err(|error| AppError::Internal(format!("failed to clear session: {error}")))?;

        Ok(())
    }
}
