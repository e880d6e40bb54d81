use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the CLI and the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Collection endpoint of the job API, e.g. `https://www.free-work.com/api/job_postings`.
    pub api_base_url: String,
    /// Prefix of the public mission pages, joined with `<job.slug>/job-mission/<slug>`.
    pub detail_base_url: String,
    /// `itemsPerPage` sent with every page request.
    pub page_size: u32,
    pub max_concurrent_pages: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
