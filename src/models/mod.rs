// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{JobPosting, WorkerProfile, WorkType, WorkTypeParseError, SkillName, MatchResult, ScoringWeights, MatchingLimits};
pub use requests::{ScoreRequest, RankWorkersRequest, RankJobsRequest, MatchLookupQuery};
pub use responses::{FindMatchesResponse, HealthResponse, ErrorResponse};
