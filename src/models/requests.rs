use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{JobPosting, WorkerProfile};

/// Request to score one job against one worker
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(nested)]
    pub job: JobPosting,
    #[validate(nested)]
    pub worker: WorkerProfile,
}

/// Request to rank workers for a job supplied inline
///
/// At most 1000 candidates are accepted per request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankWorkersRequest {
    #[validate(nested)]
    pub job: JobPosting,
    #[validate(length(max = 1000), nested)]
    #[serde(default)]
    pub candidates: Vec<WorkerProfile>,
}

/// Request to rank jobs for a worker supplied inline
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankJobsRequest {
    #[validate(nested)]
    pub worker: WorkerProfile,
    #[validate(length(max = 1000), nested)]
    #[serde(default)]
    pub candidates: Vec<JobPosting>,
}

/// Query string for the stored-entity match endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchLookupQuery {
    /// Skip the cached ranking and recompute
    #[serde(default)]
    pub fresh: bool,
}
