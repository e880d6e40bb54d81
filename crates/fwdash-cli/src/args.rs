//! Filter arguments shared by every subcommand.

use clap::{Args, ValueEnum};
use fwdash_core::{parse_min_rate, ExperienceFilter, ExperienceLevel, SearchFilters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RemoteArg {
    Full,
    Partial,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Junior,
    Intermediate,
    Expert,
    Senior,
}

impl From<LevelArg> for ExperienceLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Junior => ExperienceLevel::Junior,
            LevelArg::Intermediate => ExperienceLevel::Intermediate,
            LevelArg::Expert => ExperienceLevel::Expert,
            LevelArg::Senior => ExperienceLevel::Senior,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search keywords
    #[arg(long, default_value = "")]
    pub keywords: String,
    /// Accepted remote modes (repeatable); none means any mode
    #[arg(long, value_enum)]
    pub remote: Vec<RemoteArg>,
    /// Minimum daily rate; blank, 0 or non-numeric means no minimum
    #[arg(long)]
    pub min_rate: Option<String>,
}

impl FilterArgs {
    pub fn search_filters(&self) -> SearchFilters {
        SearchFilters {
            remote_full: self.remote.contains(&RemoteArg::Full),
            remote_partial: self.remote.contains(&RemoteArg::Partial),
            remote_none: self.remote.contains(&RemoteArg::None),
            min_rate: self.min_rate.as_deref().and_then(parse_min_rate),
        }
    }
}

pub fn experience_filter(levels: &[LevelArg]) -> ExperienceFilter {
    levels
        .iter()
        .fold(ExperienceFilter::default(), |flags, level| {
            flags.with_level(&ExperienceLevel::from(*level))
        })
}
