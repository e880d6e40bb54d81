//! Job posting records returned by the Free-Work `job_postings` endpoint.
//!
//! ## Observed shape
//!
//! ### Rates
//! `dailySalary`, `minDailySalary` and `maxDailySalary` are usually JSON
//! numbers or `null`, but older postings carry numeric strings (`"450"`).
//! Anything that is neither becomes `None` instead of failing the page.
//!
//! ### `remoteMode` / `experienceLevel`
//! Lowercase enum strings. Unknown remote modes are treated as absent.
//! Unknown experience levels are kept verbatim in
//! [`ExperienceLevel::Other`] so they still get their own chart bucket;
//! non-string levels are treated as absent.
//!
//! ### `skills` / `softSkills`
//! Arrays of `{ "name": ... }`. Missing and `null` both default to empty,
//! and `null` entries inside the array are skipped.
//!
//! ### `publishedAt`
//! The only field a posting cannot do without. A record lacking it fails
//! to parse on its own; the client drops such records from the page.
//!
//! ### `id`
//! Numeric on the wire today; held as a string so a switch to IRIs or
//! UUIDs does not break parsing.

use chrono::{DateTime, FixedOffset};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

/// One mission posting, read-only once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,

    /// Publication timestamp with the offset the API reported it in.
    pub published_at: DateTime<FixedOffset>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Advertised daily rate (TJM).
    #[serde(default, deserialize_with = "lenient_number")]
    pub daily_salary: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub min_daily_salary: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub max_daily_salary: Option<f64>,

    /// Mission length in months.
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,

    #[serde(default, deserialize_with = "lenient_remote_mode")]
    pub remote_mode: Option<RemoteMode>,

    #[serde(default, deserialize_with = "lenient_level")]
    pub experience_level: Option<ExperienceLevel>,

    #[serde(default, deserialize_with = "skip_null_entries")]
    pub skills: Vec<Skill>,

    #[serde(default, deserialize_with = "skip_null_entries")]
    pub soft_skills: Vec<Skill>,

    #[serde(default)]
    pub company: Option<Company>,

    #[serde(default)]
    pub location: Option<Location>,

    /// Job category; only its slug is used, to build the detail URL.
    #[serde(default)]
    pub job: Option<JobCategory>,

    #[serde(default)]
    pub slug: Option<String>,
}

impl JobPosting {
    /// Returns both rate bounds when the posting advertises a full range.
    #[must_use]
    pub fn rate_range(&self) -> Option<(f64, f64)> {
        self.min_daily_salary.zip(self.max_daily_salary)
    }

    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        self.location
            .as_ref()
            .and_then(|l| l.locality.as_deref())
            .filter(|l| !l.trim().is_empty())
    }

    #[must_use]
    pub fn company_name(&self) -> Option<&str> {
        self.company
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub locality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    #[serde(default)]
    pub slug: Option<String>,
}

/// Work-location policy of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteMode {
    Full,
    Partial,
    /// On-site only.
    None,
}

impl RemoteMode {
    /// Value understood by the `remoteMode` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteMode::Full => "full",
            RemoteMode::Partial => "partial",
            RemoteMode::None => "none",
        }
    }

    /// French label used in the missions table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RemoteMode::Full => "Full",
            RemoteMode::Partial => "Partiel",
            RemoteMode::None => "Non précisé",
        }
    }
}

impl std::str::FromStr for RemoteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(RemoteMode::Full),
            "partial" => Ok(RemoteMode::Partial),
            "none" => Ok(RemoteMode::None),
            other => Err(format!("unknown remote mode '{other}'")),
        }
    }
}

/// Seniority requested by a posting.
///
/// The four known levels have a fixed display rank; anything else the API
/// sends is preserved as `Other` and sorts after them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExperienceLevel {
    Junior,
    Intermediate,
    Expert,
    Senior,
    Other(String),
}

impl ExperienceLevel {
    /// Known levels in chart order.
    pub const RANKED: [ExperienceLevel; 4] = [
        ExperienceLevel::Junior,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Expert,
        ExperienceLevel::Senior,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Expert => "expert",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Other(raw) => raw,
        }
    }

    /// Position in [`Self::RANKED`], or `None` for unrecognised levels.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        Self::RANKED.iter().position(|level| level == self)
    }
}

impl From<String> for ExperienceLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "junior" => ExperienceLevel::Junior,
            "intermediate" => ExperienceLevel::Intermediate,
            "expert" => ExperienceLevel::Expert,
            "senior" => ExperienceLevel::Senior,
            _ => ExperienceLevel::Other(raw),
        }
    }
}

impl From<ExperienceLevel> for String {
    fn from(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(n)) if n.is_finite() => Some(n),
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

fn lenient_level<'de, D>(deserializer: D) -> Result<Option<ExperienceLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Text(s)) => Some(ExperienceLevel::from(s)),
        _ => None,
    })
}

fn skip_null_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<Option<T>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect())
}

fn lenient_remote_mode<'de, D>(deserializer: D) -> Result<Option<RemoteMode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Text(s)) => s.parse().ok(),
        _ => None,
    })
}
