use crate::models::{JobPosting, WorkerProfile, ScoringWeights};

/// Contribution of a single factor to the match score
#[derive(Debug, Clone, PartialEq)]
pub struct FactorHit {
    pub points: f64,
    pub reason: String,
}

impl FactorHit {
    fn new(points: f64, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: reason.into(),
        }
    }
}

/// Skills overlap, proportional to the share of required skills covered
#[inline]
pub fn skills_factor(
    job: &JobPosting,
    worker: &WorkerProfile,
    weights: &ScoringWeights,
) -> Option<FactorHit> {
    if job.required_skills.is_empty() {
        return None;
    }

    let common = job.required_skills.intersection(&worker.skills).count();
    if common == 0 {
        return None;
    }

    let points = weights.skills * common as f64 / job.required_skills.len() as f64;
    Some(FactorHit::new(points, format!("Has {} required skills", common)))
}

/// Salary offered against the worker's rate band `[rate, rate * 1.5]`
///
/// Needs both a salary and a rate; either one missing scores nothing.
#[inline]
pub fn salary_factor(
    job: &JobPosting,
    worker: &WorkerProfile,
    weights: &ScoringWeights,
) -> Option<FactorHit> {
    let (Some(salary), Some(lower_bound)) = (job.salary_amount, worker.hourly_rate) else {
        return None;
    };
    let upper_bound = lower_bound * 1.5;

    if lower_bound <= salary && salary <= upper_bound {
        Some(FactorHit::new(weights.salary_match, "Salary expectations match"))
    } else if lower_bound <= salary * 1.2 {
        Some(FactorHit::new(weights.salary_acceptable, "Salary within acceptable range"))
    } else {
        None
    }
}

/// Same city beats same state
#[inline]
pub fn location_factor(
    job: &JobPosting,
    worker: &WorkerProfile,
    weights: &ScoringWeights,
) -> Option<FactorHit> {
    if same_place(job.city.as_deref(), worker.city.as_deref()) {
        Some(FactorHit::new(weights.same_city, "Same city location"))
    } else if same_place(job.state.as_deref(), worker.state.as_deref()) {
        Some(FactorHit::new(weights.same_state, "Same state location"))
    } else {
        None
    }
}

/// Full credit at the minimum, partial credit from 80% of it
#[inline]
pub fn experience_factor(
    job: &JobPosting,
    worker: &WorkerProfile,
    weights: &ScoringWeights,
) -> Option<FactorHit> {
    let min_years = job.min_experience_years?;

    if worker.experience_years >= min_years {
        Some(FactorHit::new(weights.experience_met, "Meets experience requirements"))
    } else if worker.experience_years as f64 >= 0.8 * min_years as f64 {
        Some(FactorHit::new(weights.experience_close, "Close to experience requirements"))
    } else {
        None
    }
}

#[inline]
pub fn work_type_factor(
    job: &JobPosting,
    worker: &WorkerProfile,
    weights: &ScoringWeights,
) -> Option<FactorHit> {
    let work_type = job.work_type?;

    worker
        .preferred_work_types
        .contains(&work_type)
        .then(|| FactorHit::new(weights.work_type, "Preferred work type matches"))
}

#[inline]
pub fn availability_factor(
    _job: &JobPosting,
    worker: &WorkerProfile,
    weights: &ScoringWeights,
) -> Option<FactorHit> {
    worker
        .is_available
        .then(|| FactorHit::new(weights.availability, "Currently available"))
}

/// Case-insensitive comparison where a missing or blank value never matches
fn same_place(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
            a.to_lowercase() == b.to_lowercase()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkType;
    use std::collections::BTreeSet;

    fn skills(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_job() -> JobPosting {
        JobPosting {
            id: "job_1".to_string(),
            required_skills: skills(&["Cleaning", "Cooking"]),
            salary_amount: Some(15000.0),
            city: Some("Mumbai".to_string()),
            state: Some("Maharashtra".to_string()),
            min_experience_years: Some(5),
            work_type: Some(WorkType::FullTime),
        }
    }

    fn create_test_worker() -> WorkerProfile {
        WorkerProfile {
            id: "worker_1".to_string(),
            skills: skills(&["Cleaning"]),
            hourly_rate: Some(15000.0),
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            experience_years: 4,
            preferred_work_types: [WorkType::PartTime].into_iter().collect(),
            is_available: false,
        }
    }

    #[test]
    fn test_skills_partial_overlap() {
        let hit = skills_factor(&create_test_job(), &create_test_worker(), &ScoringWeights::default())
            .unwrap();

        assert_eq!(hit.points, 20.0);
        assert_eq!(hit.reason, "Has 1 required skills");
    }

    #[test]
    fn test_skills_empty_requirements() {
        let mut job = create_test_job();
        job.required_skills.clear();

        assert!(skills_factor(&job, &create_test_worker(), &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_salary_bands() {
        let weights = ScoringWeights::default();
        let mut job = create_test_job();
        let worker = create_test_worker();

        // Top of the band is inclusive
        job.salary_amount = Some(22500.0);
        assert_eq!(salary_factor(&job, &worker, &weights).unwrap().points, 25.0);

        // 12500 * 1.2 = 15000 reaches the rate
        job.salary_amount = Some(12500.0);
        let hit = salary_factor(&job, &worker, &weights).unwrap();
        assert_eq!(hit.points, 15.0);
        assert_eq!(hit.reason, "Salary within acceptable range");

        job.salary_amount = Some(10000.0);
        assert!(salary_factor(&job, &worker, &weights).is_none());
    }

    #[test]
    fn test_salary_above_band_is_acceptable() {
        let mut job = create_test_job();
        job.salary_amount = Some(40000.0);

        let hit = salary_factor(&job, &create_test_worker(), &ScoringWeights::default()).unwrap();
        assert_eq!(hit.points, 15.0);
    }

    #[test]
    fn test_salary_needs_both_sides() {
        let weights = ScoringWeights::default();
        let mut job = create_test_job();
        let mut worker = create_test_worker();

        job.salary_amount = None;
        assert!(salary_factor(&job, &worker, &weights).is_none());

        job.salary_amount = Some(15000.0);
        worker.hourly_rate = None;
        assert!(salary_factor(&job, &worker, &weights).is_none());
    }

    #[test]
    fn test_location_falls_back_to_state() {
        let hit = location_factor(&create_test_job(), &create_test_worker(), &ScoringWeights::default())
            .unwrap();

        assert_eq!(hit.points, 10.0);
        assert_eq!(hit.reason, "Same state location");
    }

    #[test]
    fn test_location_blank_city_never_matches() {
        let mut job = create_test_job();
        let mut worker = create_test_worker();
        job.city = Some("  ".to_string());
        worker.city = Some("".to_string());
        job.state = None;

        assert!(location_factor(&job, &worker, &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_experience_close() {
        // 4 >= 0.8 * 5
        let hit = experience_factor(&create_test_job(), &create_test_worker(), &ScoringWeights::default())
            .unwrap();

        assert_eq!(hit.points, 5.0);
        assert_eq!(hit.reason, "Close to experience requirements");
    }

    #[test]
    fn test_experience_without_requirement() {
        let mut job = create_test_job();
        job.min_experience_years = None;

        assert!(experience_factor(&job, &create_test_worker(), &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_work_type_and_availability() {
        let weights = ScoringWeights::default();
        let job = create_test_job();
        let mut worker = create_test_worker();

        assert!(work_type_factor(&job, &worker, &weights).is_none());
        assert!(availability_factor(&job, &worker, &weights).is_none());

        worker.preferred_work_types.insert(WorkType::FullTime);
        worker.is_available = true;

        assert_eq!(work_type_factor(&job, &worker, &weights).unwrap().points, 5.0);
        assert_eq!(availability_factor(&job, &worker, &weights).unwrap().reason, "Currently available");
    }

    #[test]
    fn test_missing_work_type_never_matches() {
        let mut job = create_test_job();
        job.work_type = None;
        let mut worker = create_test_worker();
        worker.preferred_work_types = WorkType::ALL.into_iter().collect();

        assert!(work_type_factor(&job, &worker, &ScoringWeights::default()).is_none());
    }
}
