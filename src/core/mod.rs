// Core algorithm exports
pub mod factors;
pub mod matcher;
pub mod scoring;

pub use factors::{FactorHit, skills_factor, salary_factor, location_factor, experience_factor, work_type_factor, availability_factor};
pub use matcher::{Matcher, RankedMatches};
pub use scoring::calculate_match_score;
