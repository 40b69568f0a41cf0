use crate::models::{JobPosting, WorkerProfile, MatchResult, ScoringWeights, MatchingLimits};
use crate::core::scoring::calculate_match_score;

/// Result of the ranking process
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatches {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Scores candidates against a fixed job or worker and ranks them
///
/// # Pipeline Stages
/// 1. Score every candidate
/// 2. Drop results at or below the threshold
/// 3. Stable sort by score, highest first
/// 4. Truncate to the result cap
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    weights: ScoringWeights,
    limits: MatchingLimits,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, limits: MatchingLimits) -> Self {
        Self { weights, limits }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), MatchingLimits::default())
    }

    pub fn limits(&self) -> MatchingLimits {
        self.limits
    }

    /// Score one worker for a job; the worker is the subject
    pub fn score(&self, job: &JobPosting, worker: &WorkerProfile) -> MatchResult {
        let (score, reasons) = calculate_match_score(job, worker, &self.weights);

        MatchResult {
            subject_id: worker.id.clone(),
            score,
            reasons,
        }
    }

    /// Score one job for a worker; the job is the subject
    pub fn score_job(&self, worker: &WorkerProfile, job: &JobPosting) -> MatchResult {
        let (score, reasons) = calculate_match_score(job, worker, &self.weights);

        MatchResult {
            subject_id: job.id.clone(),
            score,
            reasons,
        }
    }

    /// Rank candidate workers for a job
    pub fn rank_workers(&self, job: &JobPosting, candidates: &[WorkerProfile]) -> RankedMatches {
        self.rank(candidates, |worker| self.score(job, worker))
    }

    /// Rank candidate jobs for a worker
    pub fn rank_jobs(&self, worker: &WorkerProfile, candidates: &[JobPosting]) -> RankedMatches {
        self.rank(candidates, |job| self.score_job(worker, job))
    }

    fn rank<C, F>(&self, candidates: &[C], score: F) -> RankedMatches
    where
        F: Fn(&C) -> MatchResult,
    {
        let total_candidates = candidates.len();

        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .map(score)
            .filter(|result| result.score > self.limits.min_score)
            .collect();

        // sort_by is stable: equal scores keep candidate order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(self.limits.max_results);

        tracing::trace!(
            "Ranked {} of {} candidates above score {}",
            matches.len(),
            total_candidates,
            self.limits.min_score
        );

        RankedMatches {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
