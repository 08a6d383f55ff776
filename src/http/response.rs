use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// `false` only when the server declared a non-HTML content type.
    pub fn looks_like_html(&self) -> bool {
        self.content_type()
            .map_or(true, |ct| ct.to_ascii_lowercase().contains("text/html"))
    }

    /// Time since the request was sent.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.timestamp)
    }
}
