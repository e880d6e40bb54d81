//! Chart series computed from a fetched posting list.
//!
//! Each reducer is a single pass over the slice and is recomputed from
//! scratch after every successful fetch. Grouped counts do not depend on
//! input order; only the documented tie-breaks do.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::postings::JobPosting;

/// Number of skills kept for the skills chart.
pub const TOP_SKILLS_LIMIT: usize = 10;

/// Label of the bucket holding postings without an experience level.
pub const UNSPECIFIED_LEVEL: &str = "unspecified";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    /// Calendar day formatted `DD/MM/YYYY`.
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRate {
    pub level: String,
    /// Every posting of the level, rated or not.
    pub count: usize,
    /// `None` when no posting of the level advertises both bounds.
    pub avg_min_rate: Option<f64>,
    pub avg_max_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalityCount {
    pub locality: String,
    pub count: usize,
}

/// All dashboard series for one posting list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub postings_per_day: Vec<DateCount>,
    pub top_skills: Vec<SkillCount>,
    pub rates_by_level: Vec<LevelRate>,
    pub localities: Vec<LocalityCount>,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(postings: &[JobPosting]) -> Self {
        Self {
            postings_per_day: postings_per_day(postings),
            top_skills: top_skills(postings, TOP_SKILLS_LIMIT),
            rates_by_level: rates_by_level(postings),
            localities: postings_per_locality(postings),
        }
    }
}

/// Postings per publication day, oldest day first.
///
/// The day is taken in the offset carried by `publishedAt`, so a posting
/// published at 00:30+01:00 counts for that local day.
#[must_use]
pub fn postings_per_day(postings: &[JobPosting]) -> Vec<DateCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for posting in postings {
        *per_day.entry(posting.published_at.date_naive()).or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .map(|(day, count)| DateCount {
            date: day.format("%d/%m/%Y").to_string(),
            count,
        })
        .collect()
}

/// Most requested skills, highest count first.
///
/// A posting counts once for each skill it lists. Equal counts keep the
/// order in which the skills were first met.
#[must_use]
pub fn top_skills(postings: &[JobPosting], limit: usize) -> Vec<SkillCount> {
    let names = postings
        .iter()
        .flat_map(|p| p.skills.iter())
        .map(|skill| skill.name.as_str())
        .filter(|name| !name.is_empty());

    count_in_encounter_order(names)
        .into_iter()
        .take(limit)
        .map(|(name, count)| SkillCount {
            name: name.to_owned(),
            count,
        })
        .collect()
}

/// Postings per locality for the map, highest count first.
///
/// Postings without a locality are not placed on the map.
#[must_use]
pub fn postings_per_locality(postings: &[JobPosting]) -> Vec<LocalityCount> {
    count_in_encounter_order(postings.iter().filter_map(JobPosting::locality))
        .into_iter()
        .map(|(locality, count)| LocalityCount {
            locality: locality.to_owned(),
            count,
        })
        .collect()
}

#[derive(Default)]
struct LevelAccumulator {
    rank: Option<usize>,
    count: usize,
    rated: usize,
    min_sum: f64,
    max_sum: f64,
}

/// Average advertised rate range per experience level.
///
/// Only postings with both `minDailySalary` and `maxDailySalary` feed the
/// averages; the divisor is the number of such postings, not the bucket
/// size. Levels come out junior, intermediate, expert, senior, then any
/// unranked level in first-seen order.
#[must_use]
pub fn rates_by_level(postings: &[JobPosting]) -> Vec<LevelRate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(&str, LevelAccumulator)> = Vec::new();

    for posting in postings {
        let (label, rank) = match &posting.experience_level {
            Some(level) => (level.as_str(), level.rank()),
            None => (UNSPECIFIED_LEVEL, None),
        };

        let slot = *index.entry(label).or_insert_with(|| {
            buckets.push((
                label,
                LevelAccumulator {
                    rank,
                    ..LevelAccumulator::default()
                },
            ));
            buckets.len() - 1
        });

        let acc = &mut buckets[slot].1;
        acc.count += 1;
        if let Some((min, max)) = posting.rate_range() {
            acc.rated += 1;
            acc.min_sum += min;
            acc.max_sum += max;
        }
    }

    // Stable: unranked buckets keep their first-seen order after the ranked ones.
    buckets.sort_by_key(|(_, acc)| acc.rank.unwrap_or(usize::MAX));

    buckets
        .into_iter()
        .map(|(label, acc)| LevelRate {
            level: label.to_owned(),
            count: acc.count,
            avg_min_rate: average(acc.min_sum, acc.rated),
            avg_max_rate: average(acc.max_sum, acc.rated),
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn average(sum: f64, n: usize) -> Option<f64> {
    (n > 0).then(|| (sum / n as f64).round())
}

/// Counts keys, then orders by descending count with a stable sort so ties
/// stay in first-encounter order.
fn count_in_encounter_order<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for key in keys {
        if let Some(&slot) = index.get(key) {
            counts[slot].1 += 1;
        } else {
            index.insert(key, counts.len());
            counts.push((key, 1));
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
