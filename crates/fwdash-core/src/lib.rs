pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod filters;
pub mod postings;
pub mod state;
pub mod table;

pub use aggregate::{
    postings_per_day, postings_per_locality, rates_by_level, top_skills, DashboardStats,
    DateCount, LevelRate, LocalityCount, SkillCount, TOP_SKILLS_LIMIT,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{
    filter_by_experience, parse_min_rate, ExperienceFilter, MinRateInput, SearchFilters,
};
pub use postings::{Company, ExperienceLevel, JobCategory, JobPosting, Location, RemoteMode, Skill};
pub use state::{DashboardState, RequestKind, StateUpdate, Ticket};
pub use table::{detail_url, humanize_age, JobRow};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod test_support;
