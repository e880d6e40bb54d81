use super::*;
use crate::postings::ExperienceLevel;
use crate::test_support::posting;

#[test]
fn postings_per_day_sorts_days_ascending() {
    let postings = vec![
        posting("a").published("2024-01-02T09:00:00+01:00").build(),
        posting("b").published("2024-01-01T18:00:00+01:00").build(),
        posting("c").published("2024-01-01T08:00:00+01:00").build(),
    ];

    assert_eq!(
        postings_per_day(&postings),
        vec![
            DateCount {
                date: "01/01/2024".to_string(),
                count: 2
            },
            DateCount {
                date: "02/01/2024".to_string(),
                count: 1
            },
        ]
    );
}

#[test]
fn postings_per_day_orders_by_calendar_not_by_string() {
    // "31/12/2023" sorts after "01/01/2024" as text.
    let postings = vec![
        posting("a").published("2024-01-01T09:00:00Z").build(),
        posting("b").published("2023-12-31T09:00:00Z").build(),
    ];

    let days: Vec<String> = postings_per_day(&postings)
        .into_iter()
        .map(|d| d.date)
        .collect();
    assert_eq!(days, vec!["31/12/2023", "01/01/2024"]);
}

#[test]
fn postings_per_day_uses_the_offset_of_the_timestamp() {
    // 00:30 local on the 2nd is still the 1st in UTC.
    let postings = vec![posting("a").published("2024-01-02T00:30:00+01:00").build()];
    assert_eq!(postings_per_day(&postings)[0].date, "02/01/2024");
}

#[test]
fn postings_per_day_is_empty_for_no_postings() {
    assert!(postings_per_day(&[]).is_empty());
}

#[test]
fn top_skills_breaks_ties_by_first_occurrence() {
    // 12 postings: Go x5 listed first, Python x5, Rust x3.
    let mut postings = Vec::new();
    for i in 0..5 {
        postings.push(posting(&format!("go-{i}")).skills(&["Go"]).build());
    }
    for i in 0..4 {
        postings.push(posting(&format!("py-{i}")).skills(&["Python"]).build());
    }
    postings.push(posting("py-rs").skills(&["Python", "Rust"]).build());
    postings.push(posting("rs-0").skills(&["Rust"]).build());
    postings.push(posting("rs-1").skills(&["Rust"]).build());
    assert_eq!(postings.len(), 12);

    let top = top_skills(&postings, TOP_SKILLS_LIMIT);
    let ranked: Vec<(&str, usize)> = top.iter().map(|s| (s.name.as_str(), s.count)).collect();
    assert_eq!(ranked, vec![("Go", 5), ("Python", 5), ("Rust", 3)]);
}

#[test]
fn top_skills_tie_order_follows_input_order() {
    let postings = vec![
        posting("a").skills(&["Python"]).build(),
        posting("b").skills(&["Go"]).build(),
    ];
    let top = top_skills(&postings, TOP_SKILLS_LIMIT);
    assert_eq!(top[0].name, "Python");
    assert_eq!(top[1].name, "Go");
}

#[test]
fn top_skills_counts_every_skill_of_a_posting() {
    let postings = vec![
        posting("a").skills(&["Rust", "SQL"]).build(),
        posting("b").skills(&["SQL"]).build(),
    ];
    let top = top_skills(&postings, TOP_SKILLS_LIMIT);
    assert_eq!(top[0], SkillCount { name: "SQL".into(), count: 2 });
    assert_eq!(top[1], SkillCount { name: "Rust".into(), count: 1 });
}

#[test]
fn top_skills_truncates_to_limit() {
    let names: Vec<String> = (0..15).map(|i| format!("skill-{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let postings = vec![posting("a").skills(&refs).build()];

    let top = top_skills(&postings, TOP_SKILLS_LIMIT);
    assert_eq!(top.len(), 10);
    assert_eq!(top[0].name, "skill-0");
    assert_eq!(top[9].name, "skill-9");
}

#[test]
fn top_skills_keeps_highest_counts_even_when_seen_late() {
    let mut postings: Vec<_> = (0..10)
        .map(|i| posting(&format!("p{i}")).skills(&[&format!("rare-{i}")]).build())
        .collect();
    postings.push(posting("x").skills(&["Java"]).build());
    postings.push(posting("y").skills(&["Java"]).build());

    let top = top_skills(&postings, TOP_SKILLS_LIMIT);
    assert_eq!(top[0].name, "Java");
    assert_eq!(top.len(), 10);
    assert!(top.iter().all(|s| s.name != "rare-9"));
}

#[test]
fn rates_by_level_excludes_unrated_postings_from_the_average() {
    let postings = vec![
        posting("a")
            .level(ExperienceLevel::Senior)
            .rates(Some(400.0), Some(600.0))
            .build(),
        posting("b")
            .level(ExperienceLevel::Senior)
            .rates(None, None)
            .build(),
    ];

    let rates = rates_by_level(&postings);
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].level, "senior");
    assert_eq!(rates[0].count, 2);
    assert_eq!(rates[0].avg_min_rate, Some(400.0));
    assert_eq!(rates[0].avg_max_rate, Some(600.0));
}

#[test]
fn rates_by_level_requires_both_bounds() {
    let postings = vec![
        posting("a")
            .level(ExperienceLevel::Junior)
            .rates(Some(300.0), None)
            .build(),
        posting("b")
            .level(ExperienceLevel::Junior)
            .rates(Some(350.0), Some(450.0))
            .build(),
    ];

    let rates = rates_by_level(&postings);
    assert_eq!(rates[0].avg_min_rate, Some(350.0));
    assert_eq!(rates[0].avg_max_rate, Some(450.0));
}

#[test]
fn rates_by_level_without_rated_postings_has_no_average() {
    let postings = vec![posting("a").level(ExperienceLevel::Expert).build()];
    let rates = rates_by_level(&postings);
    assert_eq!(rates[0].count, 1);
    assert_eq!(rates[0].avg_min_rate, None);
    assert_eq!(rates[0].avg_max_rate, None);
}

#[test]
fn rates_by_level_rounds_averages() {
    let postings = vec![
        posting("a")
            .level(ExperienceLevel::Intermediate)
            .rates(Some(400.0), Some(500.0))
            .build(),
        posting("b")
            .level(ExperienceLevel::Intermediate)
            .rates(Some(401.0), Some(500.0))
            .build(),
    ];
    let rates = rates_by_level(&postings);
    assert_eq!(rates[0].avg_min_rate, Some(401.0));
}

#[test]
fn rates_by_level_orders_by_rank_regardless_of_input_order() {
    let postings = vec![
        posting("s").level(ExperienceLevel::Senior).build(),
        posting("e").level(ExperienceLevel::Expert).build(),
        posting("j").level(ExperienceLevel::Junior).build(),
        posting("i").level(ExperienceLevel::Intermediate).build(),
    ];

    let levels: Vec<String> = rates_by_level(&postings)
        .into_iter()
        .map(|r| r.level)
        .collect();
    assert_eq!(levels, vec!["junior", "intermediate", "expert", "senior"]);
}

#[test]
fn rates_by_level_places_unranked_levels_last_in_first_seen_order() {
    let postings = vec![
        posting("l").level(ExperienceLevel::Other("lead".into())).build(),
        posting("n").build(),
        posting("s").level(ExperienceLevel::Senior).build(),
        posting("p")
            .level(ExperienceLevel::Other("principal".into()))
            .build(),
        posting("j").level(ExperienceLevel::Junior).build(),
    ];

    let levels: Vec<String> = rates_by_level(&postings)
        .into_iter()
        .map(|r| r.level)
        .collect();
    assert_eq!(
        levels,
        vec!["junior", "senior", "lead", UNSPECIFIED_LEVEL, "principal"]
    );
}

#[test]
fn postings_per_locality_skips_missing_localities() {
    let postings = vec![
        posting("a").locality("Paris").build(),
        posting("b").locality("Lyon").build(),
        posting("c").build(),
        posting("d").locality("Lyon").build(),
        posting("e").locality("  ").build(),
    ];

    assert_eq!(
        postings_per_locality(&postings),
        vec![
            LocalityCount {
                locality: "Lyon".into(),
                count: 2
            },
            LocalityCount {
                locality: "Paris".into(),
                count: 1
            },
        ]
    );
}

#[test]
fn dashboard_stats_bundles_every_series() {
    let postings = vec![posting("a")
        .level(ExperienceLevel::Junior)
        .skills(&["Rust"])
        .locality("Nantes")
        .build()];

    let stats = DashboardStats::compute(&postings);
    assert_eq!(stats.postings_per_day.len(), 1);
    assert_eq!(stats.top_skills.len(), 1);
    assert_eq!(stats.rates_by_level.len(), 1);
    assert_eq!(stats.localities.len(), 1);
}
