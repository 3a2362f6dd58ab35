use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
