// src/exchange/client.rs
use crate::exchange::models::{ReportSource, SettlementReport};
use crate::utils::error::FetchError;
use reqwest::header;
use std::path::Path;

const USER_AGENT: &str = concat!("settle_extractor/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client configured for the exchange site.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
}

/// Downloads the report body. One attempt, no retry.
pub async fn download_report(url: &str) -> Result<String, FetchError> {
    // reqwest only speaks http(s); the exchange publishes the same file on an https mirror
    let scheme = url.split_once("://").map_or("", |(scheme, _)| scheme);
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return Err(FetchError::UnsupportedScheme {
            scheme: scheme.to_string(),
            url: url.to_string(),
        });
    }

    let client = build_client()?; // Propagate client build error if any

    tracing::info!("Downloading settlement report from: {}", url);
    tracing::debug!("Using User-Agent: {}", USER_AGENT);

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/plain,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(FetchError::Http { status, url: url.to_string() });
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}

/// Reads a report saved on disk.
pub async fn read_report_file(path: &Path) -> Result<String, FetchError> {
    tracing::info!("Reading settlement report from: {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::File { path: path.display().to_string(), source })
}

/// Pulls the raw report from its source and splits it into lines.
pub async fn load_report(source: &ReportSource) -> Result<SettlementReport, FetchError> {
    let text = match source {
        ReportSource::Remote(url) => download_report(url).await?,
        ReportSource::File(path) => read_report_file(path).await?,
    };
    Ok(SettlementReport::from_text(source.clone(), &text))
}
