pub mod client;
pub mod error;
pub mod pagination;
pub mod query;

pub use client::JobBoardClient;
pub use error::ClientError;
pub use pagination::{page_count, page_url};
pub use query::build_query;
