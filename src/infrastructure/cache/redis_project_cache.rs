use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::auth::errors::RepositoryError;
use crate::domain::project::{ProjectAggregate, ProjectCache};

const KEY_PREFIX: &str = "oppm:project";

fn cache_key(project_id: Uuid) -> String {
  format!("{}:{}", KEY_PREFIX, project_id)
}

/// Stores project aggregates as JSON with a fixed TTL
#[derive(Clone)]
pub struct RedisProjectCache {
  conn: ConnectionManager,
  ttl: Duration,
}

impl RedisProjectCache {
  pub fn new(conn: ConnectionManager, ttl: Duration) -> Self {
    Self { conn, ttl }
  }
}

#[async_trait]
impl ProjectCache for RedisProjectCache {
  async fn get(&self, project_id: Uuid) -> Result<Option<ProjectAggregate>, RepositoryError> {
    let key = cache_key(project_id);
    let mut conn = self.conn.clone();

    let data: Option<String> = conn
      .get(&key)
      .await
      .map_err(|e| RepositoryError::QueryFailed(format!("Redis GET failed: {e}")))?;

    match data {
      Some(json) => {
        tracing::debug!("Cache HIT: {}", key);
        let aggregate = serde_json::from_str(&json)
          .map_err(|e| RepositoryError::CorruptedRow(format!("Cached project: {e}")))?;
        Ok(Some(aggregate))
      }
      None => {
        tracing::debug!("Cache MISS: {}", key);
        Ok(None)
      }
    }
  }

  async fn put(&self, aggregate: &ProjectAggregate) -> Result<(), RepositoryError> {
    let key = cache_key(aggregate.project.id);
    let json = serde_json::to_string(aggregate)
      .map_err(|e| RepositoryError::QueryFailed(format!("Failed to serialize project: {e}")))?;
    let mut conn = self.conn.clone();

    conn
      .set_ex::<_, _, ()>(&key, json, self.ttl.as_secs())
      .await
      .map_err(|e| RepositoryError::QueryFailed(format!("Redis SETEX failed: {e}")))?;

    Ok(())
  }

  async fn invalidate(&self, project_id: Uuid) -> Result<(), RepositoryError> {
    let key = cache_key(project_id);
    tracing::debug!("Cache DELETE: {}", key);
    let mut conn = self.conn.clone();

    conn
      .del::<_, ()>(&key)
      .await
      .map_err(|e| RepositoryError::QueryFailed(format!("Redis DEL failed: {e}")))?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cache_key_is_namespaced() {
    let id = Uuid::nil();
    assert_eq!(
      cache_key(id),
      "oppm:project:00000000-0000-0000-0000-000000000000"
    );
  }
}
