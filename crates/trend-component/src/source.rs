// File: crates/trend-component/src/source.rs
// Summary: Async CSV sources (HTTP, local file, in-memory) feeding the loader.

use std::future::Future;
use std::path::PathBuf;

use reqwest::Client;
use tracing::debug;
use trend_core::{ChartError, ChartResult};

/// Something that can produce the raw CSV text of a series.
pub trait SeriesSource: Send + Sync {
    /// Human-readable origin, used in errors and logs.
    fn name(&self) -> String;

    fn fetch_text(&self) -> impl Future<Output = ChartResult<String>> + Send;
}

/// `GET` a CSV resource over HTTP(S). Non-2xx responses are fetch failures.
#[derive(Clone, Debug)]
pub struct HttpCsvSource {
    client: Client,
    url: String,
}

impl HttpCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SeriesSource for HttpCsvSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn fetch_text(&self) -> ChartResult<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ChartError::fetch(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::fetch(&self.url, format!("HTTP {status}")));
        }
        let text = response.text().await.map_err(|e| ChartError::fetch(&self.url, e))?;
        debug!(url = %self.url, bytes = text.len(), "fetched CSV");
        Ok(text)
    }
}

/// Read a CSV file from disk.
#[derive(Clone, Debug)]
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeriesSource for FileCsvSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> ChartResult<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ChartError::fetch(self.name(), e))
    }
}

/// CSV text held in memory.
#[derive(Clone, Debug)]
pub struct StaticCsvSource {
    name: String,
    text: String,
}

impl StaticCsvSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

impl SeriesSource for StaticCsvSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch_text(&self) -> ChartResult<String> {
        Ok(self.text.clone())
    }
}

/// Source chosen from a location string: `http(s)://` URLs go over the
/// network, anything else is a file path.
#[derive(Clone, Debug)]
pub enum CsvSource {
    Http(HttpCsvSource),
    File(FileCsvSource),
    Static(StaticCsvSource),
}

impl CsvSource {
    pub fn from_location(location: &str) -> Self {
        let lower = location.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CsvSource::Http(HttpCsvSource::new(location.trim()))
        } else {
            CsvSource::File(FileCsvSource::new(location.trim()))
        }
    }
}

impl SeriesSource for CsvSource {
    fn name(&self) -> String {
        match self {
            CsvSource::Http(s) => s.name(),
            CsvSource::File(s) => s.name(),
            CsvSource::Static(s) => s.name(),
        }
    }

    async fn fetch_text(&self) -> ChartResult<String> {
        match self {
            CsvSource::Http(s) => s.fetch_text().await,
            CsvSource::File(s) => s.fetch_text().await,
            CsvSource::Static(s) => s.fetch_text().await,
        }
    }
}
