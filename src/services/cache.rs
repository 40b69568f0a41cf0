use crate::models::FindMatchesResponse;
use redis::aio::ConnectionManager;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Which stored record a ranking was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankedFor {
    /// Workers ranked for a job posting
    Job,
    /// Open jobs ranked for a worker profile
    Worker,
}

/// Identifies one ranking: the fixed side and its id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankingKey {
    pub ranked_for: RankedFor,
    pub id: String,
}

impl RankingKey {
    pub fn job(job_id: &str) -> Self {
        Self {
            ranked_for: RankedFor::Job,
            id: job_id.to_string(),
        }
    }

    pub fn worker(worker_id: &str) -> Self {
        Self {
            ranked_for: RankedFor::Worker,
            id: worker_id.to_string(),
        }
    }
}

/// Redis key, e.g. `matches:job:j1`
impl fmt::Display for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.ranked_for {
            RankedFor::Job => "job",
            RankedFor::Worker => "worker",
        };
        write!(f, "matches:{}:{}", side, self.id)
    }
}

/// Store for rankings served by the lookup endpoints
///
/// Rankings are kept in-process (moka) and in Redis so other instances can
/// reuse them. Both tiers expire entries after `ttl_secs`, which bounds how
/// far a served ranking can lag behind the tables it was computed from.
pub struct RankingCache {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    local: moka::future::Cache<RankingKey, Arc<FindMatchesResponse>>,
    ttl_secs: u64,
}

impl RankingCache {
    pub async fn connect(redis_url: &str, local_capacity: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let local = moka::future::CacheBuilder::new(local_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            local,
            ttl_secs,
        })
    }

    /// Previously stored ranking, or `None` when neither tier has it
    pub async fn get_ranking(&self, key: &RankingKey) -> Result<Option<FindMatchesResponse>, CacheError> {
        if let Some(ranking) = self.local.get(key).await {
            tracing::trace!("Local ranking hit: {}", key);
            return Ok(Some(ranking.as_ref().clone()));
        }

        let mut conn = self.redis.lock().await;
        let stored: Option<String> = redis::cmd("GET")
            .arg(key.to_string())
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        let Some(json) = stored else {
            tracing::trace!("Ranking not cached: {}", key);
            return Ok(None);
        };

        let ranking: FindMatchesResponse = serde_json::from_str(&json)?;
        tracing::trace!("Redis ranking hit: {}", key);
        self.local.insert(key.clone(), Arc::new(ranking.clone())).await;

        Ok(Some(ranking))
    }

    pub async fn put_ranking(&self, key: &RankingKey, ranking: &FindMatchesResponse) -> Result<(), CacheError> {
        let json = serde_json::to_string(ranking)?;

        self.local.insert(key.clone(), Arc::new(ranking.clone())).await;

        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("SETEX")
            .arg(key.to_string())
            .arg(self.ttl_secs)
            .arg(json)
            .query_async(&mut *conn)
            .await?;

        Ok(())
    }

    /// Drop a ranking whose fixed side no longer exists
    pub async fn evict(&self, key: &RankingKey) -> Result<(), CacheError> {
        self.local.invalidate(key).await;

        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("DEL")
            .arg(key.to_string())
            .query_async(&mut *conn)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchResult;

    fn ranking() -> FindMatchesResponse {
        FindMatchesResponse {
            matches: vec![MatchResult {
                subject_id: "worker_1".to_string(),
                score: 85,
                reasons: vec!["Same city location".to_string()],
            }],
            total_candidates: 12,
        }
    }

    #[test]
    fn test_ranking_key_format() {
        assert_eq!(RankingKey::job("job123").to_string(), "matches:job:job123");
        assert_eq!(RankingKey::worker("w9").to_string(), "matches:worker:w9");
    }

    #[test]
    fn test_job_and_worker_keys_never_collide() {
        assert_ne!(RankingKey::job("42"), RankingKey::worker("42"));
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_put_get_evict() {
        let cache = RankingCache::connect("redis://127.0.0.1:6379", 100, 60)
            .await
            .expect("Failed to connect to Redis");
        let key = RankingKey::job("cache_test_job");

        cache.put_ranking(&key, &ranking()).await.unwrap();
        assert_eq!(cache.get_ranking(&key).await.unwrap(), Some(ranking()));

        cache.evict(&key).await.unwrap();
        assert_eq!(cache.get_ranking(&key).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_ranking_shared_through_redis() {
        let writer = RankingCache::connect("redis://127.0.0.1:6379", 100, 60)
            .await
            .expect("Failed to connect to Redis");
        let reader = RankingCache::connect("redis://127.0.0.1:6379", 100, 60)
            .await
            .expect("Failed to connect to Redis");
        let key = RankingKey::worker("cache_test_worker");

        writer.put_ranking(&key, &ranking()).await.unwrap();
        assert_eq!(reader.get_ranking(&key).await.unwrap(), Some(ranking()));

        writer.evict(&key).await.unwrap();
    }
}
