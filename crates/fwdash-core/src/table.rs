//! Display projection of postings for the missions table.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::postings::JobPosting;

const NOT_SPECIFIED: &str = "Non précisé";

/// One row of the missions table, every column already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRow {
    pub id: String,
    pub published_at: String,
    /// Relative age, e.g. `"il y a 3 jours"`.
    pub published: String,
    pub title: String,
    pub daily_rate: String,
    pub remote: String,
    pub duration: String,
    pub experience: String,
    pub skills: String,
    pub soft_skills: String,
    pub company: String,
    pub city: String,
    pub link: Option<String>,
}

impl JobRow {
    #[must_use]
    pub fn from_posting(posting: &JobPosting, detail_base: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: posting.id.clone(),
            published_at: posting.published_at.to_rfc3339(),
            published: humanize_age(posting.published_at, now),
            title: posting.title.clone(),
            daily_rate: posting
                .daily_salary
                .map_or_else(|| NOT_SPECIFIED.to_string(), format_number),
            remote: posting
                .remote_mode
                .map_or(NOT_SPECIFIED, |m| m.label())
                .to_string(),
            duration: posting.duration.filter(|months| *months > 0.0).map_or_else(
                || NOT_SPECIFIED.to_string(),
                |months| format!("{} mois", format_number(months)),
            ),
            experience: posting
                .experience_level
                .as_ref()
                .map_or(NOT_SPECIFIED, |l| l.as_str())
                .to_string(),
            skills: join_names(posting.skills.iter().map(|s| s.name.as_str())),
            soft_skills: join_names(posting.soft_skills.iter().map(|s| s.name.as_str())),
            company: posting.company_name().unwrap_or_default().to_string(),
            city: posting.locality().unwrap_or_default().to_string(),
            link: detail_url(detail_base, posting),
        }
    }
}

/// Public mission page: `<detail_base>/<job.slug>/job-mission/<slug>`.
///
/// Returns `None` when either slug is missing.
#[must_use]
pub fn detail_url(detail_base: &str, posting: &JobPosting) -> Option<String> {
    let job_slug = posting
        .job
        .as_ref()
        .and_then(|job| job.slug.as_deref())
        .filter(|s| !s.is_empty())?;
    let slug = posting.slug.as_deref().filter(|s| !s.is_empty())?;
    Some(format!(
        "{}/{job_slug}/job-mission/{slug}",
        detail_base.trim_end_matches('/')
    ))
}

/// French relative age of a publication date, e.g. `"il y a 2 heures"`.
///
/// Timestamps in the future read as "quelques secondes".
#[must_use]
pub fn humanize_age(published: DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
    let seconds = (now - published.with_timezone(&Utc)).num_seconds().max(0);
    let minutes = rounded_div(seconds, 60);
    let hours = rounded_div(seconds, 3_600);
    let days = rounded_div(seconds, 86_400);

    let phrase = if seconds < 45 {
        "quelques secondes".to_string()
    } else if seconds < 90 {
        "une minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "une heure".to_string()
    } else if hours < 22 {
        format!("{hours} heures")
    } else if hours < 36 {
        "un jour".to_string()
    } else if days < 26 {
        format!("{days} jours")
    } else if days < 45 {
        "un mois".to_string()
    } else if days < 320 {
        format!("{} mois", rounded_div(days * 10, 304))
    } else if days < 548 {
        "un an".to_string()
    } else {
        format!("{} ans", rounded_div(days * 100, 36_525))
    };

    format!("il y a {phrase}")
}

fn rounded_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.filter(|n| !n.is_empty()).collect::<Vec<_>>().join(", ")
}
