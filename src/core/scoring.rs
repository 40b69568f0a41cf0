use crate::models::{JobPosting, WorkerProfile, ScoringWeights};
use crate::core::factors::{
    availability_factor, experience_factor, location_factor, salary_factor, skills_factor,
    work_type_factor, FactorHit,
};

type Factor = fn(&JobPosting, &WorkerProfile, &ScoringWeights) -> Option<FactorHit>;

/// Evaluation order; reasons are reported in this order
const FACTORS: [Factor; 6] = [
    skills_factor,
    salary_factor,
    location_factor,
    experience_factor,
    work_type_factor,
    availability_factor,
];

/// Calculate a match score (0-100) between a job and a worker
///
/// Scoring formula (default weights):
/// score = round(
///     skills        40 * covered / required
///   + salary        25 in [rate, rate * 1.5], else 15 if rate <= salary * 1.2
///   + location      20 same city, else 10 same state
///   + experience    10 meets minimum, else 5 within 80% of it
///   + work type      5 job type is preferred
///   + availability   5 worker is available
/// ) clamped to [0, 100]
///
/// Returns the score and the reasons of every factor that contributed.
pub fn calculate_match_score(
    job: &JobPosting,
    worker: &WorkerProfile,
    weights: &ScoringWeights,
) -> (u8, Vec<String>) {
    let mut total = 0.0;
    let mut reasons = Vec::new();

    for hit in FACTORS.iter().filter_map(|factor| factor(job, worker, weights)) {
        total += hit.points;
        reasons.push(hit.reason);
    }

    (clamp_score(total), reasons)
}

/// Round to the nearest integer and clamp to 0-100
#[inline]
fn clamp_score(total: f64) -> u8 {
    if total.is_nan() {
        return 0;
    }
    total.round().clamp(0.0, 100.0) as u8
}
