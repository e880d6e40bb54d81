//! Search filters pushed to the API and the experience filter applied locally.

use serde::{Deserialize, Serialize};

use crate::postings::{ExperienceLevel, JobPosting, RemoteMode};

/// Filters sent upstream as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub remote_full: bool,
    pub remote_partial: bool,
    pub remote_none: bool,
    /// Minimum daily rate. `Some(0)` means no filter, same as `None`.
    pub min_rate: Option<u32>,
}

impl SearchFilters {
    /// Enabled remote modes in `full, partial, none` order.
    ///
    /// An empty result means no `remoteMode` parameter at all, which the
    /// API reads as "any mode".
    #[must_use]
    pub fn remote_modes(&self) -> Vec<RemoteMode> {
        [
            (self.remote_full, RemoteMode::Full),
            (self.remote_partial, RemoteMode::Partial),
            (self.remote_none, RemoteMode::None),
        ]
        .into_iter()
        .filter_map(|(enabled, mode)| enabled.then_some(mode))
        .collect()
    }

    #[must_use]
    pub fn effective_min_rate(&self) -> Option<u32> {
        self.min_rate.filter(|rate| *rate > 0)
    }
}

/// Minimum-rate value as typed by a user: either a number or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinRateInput {
    Number(u32),
    Text(String),
}

impl MinRateInput {
    #[must_use]
    pub fn into_min_rate(self) -> Option<u32> {
        match self {
            MinRateInput::Number(0) => None,
            MinRateInput::Number(n) => Some(n),
            MinRateInput::Text(text) => parse_min_rate(&text),
        }
    }
}

/// Parses the minimum-rate text field.
///
/// Blank input, `0` and anything that is not a non-negative integer mean
/// "no filter".
#[must_use]
pub fn parse_min_rate(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(0) => None,
        Ok(rate) => Some(rate),
        Err(e) => {
            tracing::warn!(input = trimmed, error = %e, "ignoring unparseable minimum rate");
            None
        }
    }
}

/// Experience-level checkboxes. No box ticked means "show everything".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceFilter {
    pub junior: bool,
    pub intermediate: bool,
    pub expert: bool,
    pub senior: bool,
}

impl ExperienceFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.junior || self.intermediate || self.expert || self.senior)
    }

    /// Ticks the box matching `level`; unranked levels have no box.
    #[must_use]
    pub fn with_level(mut self, level: &ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::Junior => self.junior = true,
            ExperienceLevel::Intermediate => self.intermediate = true,
            ExperienceLevel::Expert => self.expert = true,
            ExperienceLevel::Senior => self.senior = true,
            ExperienceLevel::Other(_) => {}
        }
        self
    }

    #[must_use]
    pub fn allows(&self, level: Option<&ExperienceLevel>) -> bool {
        if self.is_empty() {
            return true;
        }
        match level {
            Some(ExperienceLevel::Junior) => self.junior,
            Some(ExperienceLevel::Intermediate) => self.intermediate,
            Some(ExperienceLevel::Expert) => self.expert,
            Some(ExperienceLevel::Senior) => self.senior,
            Some(ExperienceLevel::Other(_)) | None => false,
        }
    }
}

/// Keeps the postings whose level matches any ticked box, preserving order.
#[must_use]
pub fn filter_by_experience<'a, I>(postings: I, flags: &ExperienceFilter) -> Vec<&'a JobPosting>
where
    I: IntoIterator<Item = &'a JobPosting>,
{
    postings
        .into_iter()
        .filter(|p| flags.allows(p.experience_level.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::posting;

    fn sample() -> Vec<JobPosting> {
        vec![
            posting("1").level(ExperienceLevel::Junior).build(),
            posting("2").level(ExperienceLevel::Senior).build(),
            posting("3").level(ExperienceLevel::Expert).build(),
            posting("4")
                .level(ExperienceLevel::Other("lead".into()))
                .build(),
            posting("5").build(),
            posting("6").level(ExperienceLevel::Intermediate).build(),
        ]
    }

    fn ids(postings: &[&JobPosting]) -> Vec<String> {
        postings.iter().map(|p| p.id.clone()).collect()
    }

    fn all_flag_combinations() -> Vec<ExperienceFilter> {
        (0u8..16)
            .map(|bits| ExperienceFilter {
                junior: bits & 1 != 0,
                intermediate: bits & 2 != 0,
                expert: bits & 4 != 0,
                senior: bits & 8 != 0,
            })
            .collect()
    }

    #[test]
    fn no_flags_is_identity() {
        let postings = sample();
        let kept = filter_by_experience(&postings, &ExperienceFilter::default());
        assert_eq!(ids(&kept), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn flags_are_combined_with_or() {
        let postings = sample();
        let flags = ExperienceFilter {
            junior: true,
            senior: true,
            ..ExperienceFilter::default()
        };
        let kept = filter_by_experience(&postings, &flags);
        assert_eq!(ids(&kept), vec!["1", "2"]);
    }

    #[test]
    fn unranked_and_missing_levels_are_dropped_once_a_flag_is_set() {
        let postings = sample();
        let flags = ExperienceFilter::default().with_level(&ExperienceLevel::Expert);
        let kept = filter_by_experience(&postings, &flags);
        assert_eq!(ids(&kept), vec!["3"]);
    }

    #[test]
    fn filtering_is_idempotent_for_every_flag_combination() {
        let postings = sample();
        for flags in all_flag_combinations() {
            let once = filter_by_experience(&postings, &flags);
            let twice = filter_by_experience(once.iter().copied(), &flags);
            assert_eq!(ids(&once), ids(&twice), "not idempotent for {flags:?}");
        }
    }

    #[test]
    fn remote_modes_follow_fixed_order() {
        let filters = SearchFilters {
            remote_none: true,
            remote_full: true,
            ..SearchFilters::default()
        };
        assert_eq!(
            filters.remote_modes(),
            vec![RemoteMode::Full, RemoteMode::None]
        );
        assert!(SearchFilters::default().remote_modes().is_empty());
    }

    #[test]
    fn zero_min_rate_is_no_filter() {
        let filters = SearchFilters {
            min_rate: Some(0),
            ..SearchFilters::default()
        };
        assert_eq!(filters.effective_min_rate(), None);
    }

    #[test]
    fn parse_min_rate_treats_blank_and_zero_as_no_filter() {
        assert_eq!(parse_min_rate(""), None);
        assert_eq!(parse_min_rate("   "), None);
        assert_eq!(parse_min_rate("0"), None);
        assert_eq!(parse_min_rate("abc"), None);
        assert_eq!(parse_min_rate(" 450 "), Some(450));
    }

    #[test]
    fn min_rate_input_accepts_numbers_and_text() {
        let number: MinRateInput = serde_json::from_str("500").unwrap();
        assert_eq!(number.into_min_rate(), Some(500));
        let zero: MinRateInput = serde_json::from_str("0").unwrap();
        assert_eq!(zero.into_min_rate(), None);
        let text: MinRateInput = serde_json::from_str("\"\"").unwrap();
        assert_eq!(text.into_min_rate(), None);
        let text: MinRateInput = serde_json::from_str("\"650\"").unwrap();
        assert_eq!(text.into_min_rate(), Some(650));
    }
}
