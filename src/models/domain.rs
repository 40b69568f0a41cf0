use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// Skill label as stored on jobs and workers (e.g. "Cleaning", "Cooking")
pub type SkillName = String;

/// Employment arrangement offered by a job or preferred by a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    FullTime,
    PartTime,
    LiveIn,
    LiveOut,
    Temporary,
}

impl WorkType {
    pub const ALL: [WorkType; 5] = [
        WorkType::FullTime,
        WorkType::PartTime,
        WorkType::LiveIn,
        WorkType::LiveOut,
        WorkType::Temporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::FullTime => "FULL_TIME",
            WorkType::PartTime => "PART_TIME",
            WorkType::LiveIn => "LIVE_IN",
            WorkType::LiveOut => "LIVE_OUT",
            WorkType::Temporary => "TEMPORARY",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown work type: {0:?}")]
pub struct WorkTypeParseError(pub String);

impl FromStr for WorkType {
    type Err = WorkTypeParseError;

    /// Accepts `FULL_TIME`, `full-time`, `Full Time` and similar spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        WorkType::ALL
            .into_iter()
            .find(|work_type| work_type.as_str() == normalized)
            .ok_or_else(|| WorkTypeParseError(s.to_string()))
    }
}

/// Job posting fields read by the scorer
///
/// Only `id` is required; an absent field contributes nothing to its factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct JobPosting {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: BTreeSet<SkillName>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "salaryAmount", default)]
    pub salary_amount: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "minExperienceYears", default)]
    pub min_experience_years: Option<u32>,
    #[serde(rename = "workType", default)]
    pub work_type: Option<WorkType>,
}

/// Worker profile fields read by the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WorkerProfile {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub skills: BTreeSet<SkillName>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "experienceYears", default)]
    pub experience_years: u32,
    #[serde(rename = "preferredWorkTypes", default)]
    pub preferred_work_types: BTreeSet<WorkType>,
    #[serde(rename = "isAvailable", default)]
    pub is_available: bool,
}

/// Scored outcome for one candidate
///
/// `subject_id` names the side that was ranked: the worker when ranking
/// workers for a job, the job when ranking jobs for a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Points awarded by each scoring factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub salary_match: f64,
    pub salary_acceptable: f64,
    pub same_city: f64,
    pub same_state: f64,
    pub experience_met: f64,
    pub experience_close: f64,
    pub work_type: f64,
    pub availability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            salary_match: 25.0,
            salary_acceptable: 15.0,
            same_city: 20.0,
            same_state: 10.0,
            experience_met: 10.0,
            experience_close: 5.0,
            work_type: 5.0,
            availability: 5.0,
        }
    }
}

/// Filter threshold and result cap applied when ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingLimits {
    /// Results must score strictly above this value
    pub min_score: u8,
    pub max_results: usize,
}

impl Default for MatchingLimits {
    fn default() -> Self {
        Self {
            min_score: 50,
            max_results: 10,
        }
    }
}
