use super::*;

fn client(page_size: u32, max_concurrent_pages: usize) -> JobBoardClient {
    JobBoardClient::new(5, "fwdash-test/0.1", page_size, max_concurrent_pages)
        .expect("failed to build test JobBoardClient")
}

#[test]
fn new_clamps_concurrency_to_one() {
    assert_eq!(client(300, 0).max_concurrent_pages, 1);
}

#[test]
fn new_keeps_page_size() {
    assert_eq!(client(50, 4).page_size(), 50);
}

#[test]
fn from_config_uses_configured_values() {
    let config = AppConfig {
        env: fwdash_core::Environment::Test,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "info".to_string(),
        api_base_url: "https://example.test/api/job_postings".to_string(),
        detail_base_url: "https://example.test/fr/tech-it".to_string(),
        page_size: 120,
        max_concurrent_pages: 3,
        request_timeout_secs: 5,
        user_agent: "fwdash-test/0.1".to_string(),
    };
    let client = JobBoardClient::from_config(&config).unwrap();
    assert_eq!(client.page_size(), 120);
    assert_eq!(client.max_concurrent_pages, 3);
}

#[test]
fn decode_postings_skips_malformed_records() {
    let records = vec![
        serde_json::json!({"id": 1, "publishedAt": "2024-03-05T09:12:00Z"}),
        serde_json::json!({"id": 2, "publishedAt": null}),
        serde_json::json!("not an object"),
        serde_json::json!({"id": 3, "publishedAt": "2024-03-06T09:12:00Z", "skills": [null]}),
    ];

    let ids: Vec<String> = decode_postings(1, records)
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["1", "3"]);
}
