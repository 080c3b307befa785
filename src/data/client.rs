//! HTTP client for the `/download` endpoints.
//!
//! Every endpoint answers with a JSON object mapping `yyyymmdd` strings to
//! integer counts. Multi-endpoint sources are fetched one after another and
//! merged by summing counts per date.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::domain::{Count, Source};
use crate::error::AppError;
use crate::series::Series;

pub const DEFAULT_BASE_URL: &str = "https://e-players6814.an.r.appspot.com";
pub const BASE_URL_ENV: &str = "MILK_STATS_BASE_URL";

const USER_PATHS: [&str; 1] = ["/api/user/download"];

const TOURNAMENT_PATHS: [&str; 5] = [
    "/api/tournament/download",
    "/api/tournament_log/download",
    "/api/bracket/download",
    "/api/bracket_log/download",
    "/api/bracket_archive/download",
];

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Resolve the base URL from `base_override`, then `MILK_STATS_BASE_URL`
    /// (`.env` is honoured), then [`DEFAULT_BASE_URL`].
    pub fn from_env(base_override: Option<&str>, timeout_secs: u64) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = match base_override {
            Some(url) => url.to_string(),
            None => std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        Self::new(base_url, timeout_secs)
    }

    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, AppError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::usage("Base URL must not be empty."));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|source| AppError::Http {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    /// Full URLs for `source`, in request order.
    pub fn endpoints(&self, source: &Source) -> Vec<String> {
        match source {
            Source::User => self.join_all(&USER_PATHS),
            Source::Tournament => self.join_all(&TOURNAMENT_PATHS),
            Source::Urls(urls) => urls.clone(),
        }
    }

    fn join_all(&self, paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| format!("{}{p}", self.base_url)).collect()
    }

    /// Fetch every endpoint of `source` sequentially and merge the results.
    pub fn fetch(&self, source: &Source) -> Result<Series, AppError> {
        let urls = self.endpoints(source);
        if urls.is_empty() {
            return Err(AppError::usage("No endpoint URLs to fetch."));
        }

        let mut parts = Vec::with_capacity(urls.len());
        for url in &urls {
            parts.push(self.fetch_url(url)?);
        }
        let merged = Series::merge(parts)?;
        info!(
            source = source.display_name(),
            endpoints = urls.len(),
            dates = merged.len(),
            "fetched series"
        );
        Ok(merged)
    }

    pub fn fetch_url(&self, url: &str) -> Result<Series, AppError> {
        debug!(url, "GET");
        let resp = self.client.get(url).send().map_err(|source| AppError::Http {
            url: url.to_string(),
            source,
        })?;

        if !resp.status().is_success() {
            return Err(AppError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }

        let raw: BTreeMap<String, Count> = resp.json().map_err(|e| {
            if e.is_decode() {
                AppError::payload(url, format!("expected an object of integer counts ({e})"))
            } else {
                AppError::Http {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;
        Series::from_raw(raw).map_err(|e| AppError::payload(url, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_user(body: &str) -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/user/download")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();
        (server, mock)
    }

    #[test]
    fn rejects_non_objects_and_floats() {
        for body in ["[1, 2]", r#"{"20210101": 1.5}"#, "not json"] {
            let (server, _mock) = serve_user(body);
            let client = ApiClient::new(server.url(), 5).unwrap();
            let err = client.fetch(&Source::User).unwrap_err();
            assert!(matches!(err, AppError::Payload { .. }), "{body}: {err}");
            assert_eq!(err.exit_code(), 4);
        }
    }

    #[test]
    fn rejects_malformed_date_keys() {
        let (server, _mock) = serve_user(r#"{"Jan 1": 1}"#);
        let client = ApiClient::new(server.url(), 5).unwrap();
        let err = client.fetch(&Source::User).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("Jan 1"));
    }

    #[test]
    fn endpoints_follow_source() {
        let client = ApiClient::new("http://localhost:4000/", 5).unwrap();
        assert_eq!(
            client.endpoints(&Source::User),
            ["http://localhost:4000/api/user/download"]
        );
        let tournament = client.endpoints(&Source::Tournament);
        assert_eq!(tournament.len(), 5);
        assert_eq!(tournament[0], "http://localhost:4000/api/tournament/download");
        assert_eq!(tournament[4], "http://localhost:4000/api/bracket_archive/download");
    }

    #[test]
    fn fetch_single_endpoint() {
        let (server, mock) = serve_user(r#"{"20210102": 3, "20210101": 5}"#);

        let client = ApiClient::new(server.url(), 5).unwrap();
        let series = client.fetch(&Source::User).unwrap();

        mock.assert();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].1, 5);
    }

    #[test]
    fn fetch_tournament_merges_all_tables() {
        let mut server = mockito::Server::new();
        let mut mocks = Vec::new();
        for (i, path) in TOURNAMENT_PATHS.iter().enumerate() {
            mocks.push(
                server
                    .mock("GET", *path)
                    .with_status(200)
                    .with_body(format!(r#"{{"20210101": {}, "2021010{}": 1}}"#, i + 1, i + 2))
                    .create(),
            );
        }

        let client = ApiClient::new(server.url(), 5).unwrap();
        let series = client.fetch(&Source::Tournament).unwrap();

        for mock in &mocks {
            mock.assert();
        }
        // 20210101 appears in all five tables: 1 + 2 + 3 + 4 + 5.
        assert_eq!(series.points()[0].1, 15);
        assert_eq!(series.len(), 6);
    }

    #[test]
    fn fetch_reports_http_status() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/api/user/download").with_status(500).create();

        let client = ApiClient::new(server.url(), 5).unwrap();
        let err = client.fetch(&Source::User).unwrap_err();
        assert!(matches!(err, AppError::Status { .. }));
        assert_eq!(err.exit_code(), 4);
    }
}
