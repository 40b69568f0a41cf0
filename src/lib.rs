//! helpmatch - job and worker matching for the HelpHub domestic work marketplace
//!
//! The core scores a job posting against a worker profile with a fixed set of
//! weighted factors and ranks candidates of either side. The service layer
//! exposes the core over HTTP and loads stored jobs and workers from PostgreSQL.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Matcher, RankedMatches, calculate_match_score};
pub use models::{JobPosting, WorkerProfile, WorkType, MatchResult, ScoringWeights, MatchingLimits};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.limits(), MatchingLimits::default());
    }
}
