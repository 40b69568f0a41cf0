use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ScoreRequest, RankWorkersRequest, RankJobsRequest, MatchLookupQuery, FindMatchesResponse,
    HealthResponse, ErrorResponse,
};
use crate::services::{PostgresClient, PostgresError, RankingCache, RankingKey};
use crate::core::{Matcher, RankedMatches};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    /// `None` when Redis was unreachable at startup
    pub cache: Option<Arc<RankingCache>>,
    pub matcher: Matcher,
    pub candidate_limit: usize,
}

impl AppState {
    async fn cached(&self, key: &RankingKey) -> Option<FindMatchesResponse> {
        let cache = self.cache.as_ref()?;
        cache.get_ranking(key).await.unwrap_or_else(|e| {
            tracing::warn!("Cache read failed for {}: {}", key, e);
            None
        })
    }

    async fn store(&self, key: &RankingKey, response: &FindMatchesResponse) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put_ranking(key, response).await {
                tracing::warn!("Failed to cache {}: {}", key, e);
            }
        }
    }

    async fn forget(&self, key: &RankingKey) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.evict(key).await {
                tracing::warn!("Failed to invalidate {}: {}", key, e);
            }
        }
    }
}

/// Configure all match-related routes
///
/// The inline scoring routes only need `web::Data<Matcher>`; the health and
/// lookup routes need `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_match))
        .route("/matches/rank/workers", web::post().to(rank_workers))
        .route("/matches/rank/jobs", web::post().to(rank_jobs))
        .route("/jobs/{job_id}/matches", web::get().to(job_matches))
        .route("/workers/{worker_id}/matches", web::get().to(worker_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one job against one worker
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "job": { "id": "j1", "requiredSkills": ["Cooking"], "salaryAmount": 15000, "workType": "FULL_TIME" },
///   "worker": { "id": "w1", "skills": ["Cooking"], "hourlyRate": 15000, "isAvailable": true }
/// }
/// ```
async fn score_match(
    matcher: web::Data<Matcher>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let result = matcher.score(&req.job, &req.worker);
    tracing::debug!(
        "Scored job {} against worker {}: {}",
        req.job.id,
        req.worker.id,
        result.score
    );

    HttpResponse::Ok().json(result)
}

/// Rank inline worker candidates for an inline job
///
/// POST /api/v1/matches/rank/workers
async fn rank_workers(
    matcher: web::Data<Matcher>,
    req: web::Json<RankWorkersRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let result = matcher.rank_workers(&req.job, &req.candidates);
    HttpResponse::Ok().json(to_response(result))
}

/// Rank inline job candidates for an inline worker
///
/// POST /api/v1/matches/rank/jobs
async fn rank_jobs(
    matcher: web::Data<Matcher>,
    req: web::Json<RankJobsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let result = matcher.rank_jobs(&req.worker, &req.candidates);
    HttpResponse::Ok().json(to_response(result))
}

/// Rank stored workers for a stored job
///
/// GET /api/v1/jobs/{job_id}/matches?fresh=true
async fn job_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchLookupQuery>,
) -> impl Responder {
    let job_id = path.into_inner();
    let cache_key = RankingKey::job(&job_id);

    let job = match state.postgres.get_job_posting(&job_id).await {
        Ok(job) => job,
        Err(e) => {
            if matches!(e, PostgresError::NotFound(_)) {
                state.forget(&cache_key).await;
            }
            return lookup_failed("job posting", &job_id, e);
        }
    };

    if !query.fresh {
        if let Some(cached) = state.cached(&cache_key).await {
            tracing::debug!("Serving cached matches for job {}", job_id);
            return HttpResponse::Ok().json(cached);
        }
    }

    let candidates = match state.postgres.list_worker_profiles(state.candidate_limit).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to load worker candidates for job {}: {}", job_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to load candidates",
                e.to_string(),
                500,
            ));
        }
    };

    let response = to_response(state.matcher.rank_workers(&job, &candidates));

    tracing::info!(
        "Returning {} worker matches for job {} (from {} candidates)",
        response.matches.len(),
        job_id,
        response.total_candidates
    );

    state.store(&cache_key, &response).await;
    HttpResponse::Ok().json(response)
}

/// Rank open jobs for a stored worker
///
/// GET /api/v1/workers/{worker_id}/matches?fresh=true
async fn worker_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<MatchLookupQuery>,
) -> impl Responder {
    let worker_id = path.into_inner();
    let cache_key = RankingKey::worker(&worker_id);

    let worker = match state.postgres.get_worker_profile(&worker_id).await {
        Ok(worker) => worker,
        Err(e) => {
            if matches!(e, PostgresError::NotFound(_)) {
                state.forget(&cache_key).await;
            }
            return lookup_failed("worker profile", &worker_id, e);
        }
    };

    if !query.fresh {
        if let Some(cached) = state.cached(&cache_key).await {
            tracing::debug!("Serving cached matches for worker {}", worker_id);
            return HttpResponse::Ok().json(cached);
        }
    }

    let candidates = match state.postgres.list_open_jobs(state.candidate_limit).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to load job candidates for worker {}: {}", worker_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to load candidates",
                e.to_string(),
                500,
            ));
        }
    };

    let response = to_response(state.matcher.rank_jobs(&worker, &candidates));

    tracing::info!(
        "Returning {} job matches for worker {} (from {} candidates)",
        response.matches.len(),
        worker_id,
        response.total_candidates
    );

    state.store(&cache_key, &response).await;
    HttpResponse::Ok().json(response)
}

fn to_response(result: RankedMatches) -> FindMatchesResponse {
    FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: {}", errors);
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Validation failed",
        errors.to_string(),
        400,
    ))
}

fn lookup_failed(kind: &str, id: &str, error: PostgresError) -> HttpResponse {
    match error {
        PostgresError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Not found",
            format!("No {} with id {}", kind, id),
            404,
        )),
        other => {
            tracing::error!("Failed to fetch {} {}: {}", kind, id, other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                format!("Failed to fetch {}", kind),
                other.to_string(),
                500,
            ))
        }
    }
}
