//! Command handlers for the CLI.
//!
//! `fetch` drives the same ticketed state transitions as the server: count,
//! then the paginated fetch, each completion applied through
//! [`DashboardState::apply`].

use anyhow::Context;
use chrono::{DateTime, Utc};
use fwdash_client::{build_query, JobBoardClient};
use fwdash_core::{
    AppConfig, DashboardState, DashboardStats, JobRow, RequestKind, StateUpdate,
};
use serde::Serialize;

use crate::args::{experience_filter, FilterArgs, LevelArg};

/// Serialized output of `fetch --json`.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    mission_count: Option<u64>,
    fetched_at: Option<DateTime<Utc>>,
    stats: &'a DashboardStats,
    rows: Vec<JobRow>,
}

pub(crate) fn run_url(config: &AppConfig, filters: &FilterArgs) -> anyhow::Result<()> {
    let query = build_query(
        &config.api_base_url,
        &filters.keywords,
        &filters.search_filters(),
    )?;
    println!("{query}");
    Ok(())
}

/// Print the number of missions matching the filters.
///
/// # Errors
///
/// Returns an error if the query cannot be built or the count request fails.
pub(crate) async fn run_count(config: &AppConfig, filters: &FilterArgs) -> anyhow::Result<()> {
    let client = JobBoardClient::from_config(config)?;
    let query = build_query(
        &config.api_base_url,
        &filters.keywords,
        &filters.search_filters(),
    )?;

    let total = client
        .fetch_count(&query)
        .await
        .context("failed to fetch mission count")?;
    tracing::info!(total, query = %query, "mission count fetched");
    println!("{total}");
    Ok(())
}

/// Fetch every matching mission, aggregate, and print.
///
/// # Errors
///
/// Returns an error if the count or any page request fails. Nothing is
/// printed in that case.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    filters: &FilterArgs,
    levels: &[LevelArg],
    json: bool,
) -> anyhow::Result<()> {
    let client = JobBoardClient::from_config(config)?;
    let query = build_query(
        &config.api_base_url,
        &filters.keywords,
        &filters.search_filters(),
    )?;

    let (state, ticket) = DashboardState::default().issue(RequestKind::Count);
    let total = client
        .fetch_count(&query)
        .await
        .context("failed to fetch mission count")?;
    let state = state.apply(StateUpdate::CountLoaded { ticket, total });

    let (state, ticket) = state.issue(RequestKind::Fetch);
    let state = match client.fetch_all(&query, total).await {
        Ok(postings) => state.apply(StateUpdate::PostingsLoaded {
            ticket,
            postings,
            fetched_at: Utc::now(),
        }),
        Err(e) => {
            tracing::error!(error = %e, query = %query, "mission fetch failed");
            let state = state.apply(StateUpdate::FetchFailed {
                ticket,
                message: e.to_string(),
            });
            anyhow::bail!(
                "failed to fetch missions: {}",
                state.last_error().unwrap_or_default()
            );
        }
    };

    let now = Utc::now();
    let flags = experience_filter(levels);
    tracing::info!(
        total,
        fetched = state.postings().len(),
        "missions fetched"
    );
    let rows: Vec<JobRow> = state
        .visible_postings(&flags)
        .into_iter()
        .map(|p| JobRow::from_posting(p, &config.detail_base_url, now))
        .collect();

    if json {
        let snapshot = Snapshot {
            mission_count: state.mission_count(),
            fetched_at: state.fetched_at(),
            stats: state.stats(),
            rows,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_report(state.mission_count().unwrap_or_default(), state.stats(), &rows);
    }

    Ok(())
}

fn print_report(total: u64, stats: &DashboardStats, rows: &[JobRow]) {
    println!("{total} missions");

    println!("\nPUBLISHED PER DAY");
    for day in &stats.postings_per_day {
        println!("  {:<12}{}", day.date, day.count);
    }

    println!("\nTOP SKILLS");
    for skill in &stats.top_skills {
        println!("  {:<24}{}", skill.name, skill.count);
    }

    println!("\nAVERAGE DAILY RATE BY LEVEL");
    println!("  {:<16}{:<8}{:<10}MAX", "LEVEL", "COUNT", "MIN");
    for level in &stats.rates_by_level {
        println!(
            "  {:<16}{:<8}{:<10}{}",
            level.level,
            level.count,
            fmt_rate(level.avg_min_rate),
            fmt_rate(level.avg_max_rate)
        );
    }

    println!("\nLOCALITIES");
    for locality in &stats.localities {
        println!("  {:<24}{}", locality.locality, locality.count);
    }

    println!(
        "\n{:<24}{:<52}{:<8}{:<14}{:<14}{:<24}{:<16}SKILLS",
        "PUBLISHED", "TITLE", "TJM", "REMOTE", "EXPERIENCE", "COMPANY", "CITY"
    );
    for row in rows {
        println!(
            "{:<24}{:<52}{:<8}{:<14}{:<14}{:<24}{:<16}{}",
            row.published,
            truncate(&row.title, 50),
            row.daily_rate,
            row.remote,
            row.experience,
            truncate(&row.company, 22),
            truncate(&row.city, 14),
            row.skills
        );
    }
}

fn fmt_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "\u{2014}".to_string(), |r| format!("{r:.0}"))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars - 3).collect::<String>())
    } else {
        text.to_string()
    }
}
