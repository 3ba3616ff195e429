use crate::config::ScrapeConfig;
use crate::parser::{ParseError, parse_municipality_list, parse_results};
use crate::types::{MunicipalityRef, ResultRecord, ScrapeFailure, ScrapeReport};

use reqwest::blocking::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Blocking scraper for the election result pages. Fetches happen one at a
/// time, in listing order.
#[derive(Debug)]
pub struct ElectionScraper {
    client: Client,
    config: ScrapeConfig,
}

impl ElectionScraper {
    pub fn new(config: ScrapeConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetches a page as UTF-8 text. The source pages occasionally declare a
    /// different charset than they serve, so decoding is forced to UTF-8
    /// rather than trusting the response headers.
    fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .send()
            .inspect_err(|e| log::error!("HTTP error for {url}: {e:?}"))?
            .error_for_status()?;
        let bytes = response.bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fetches the index page and lists its municipalities in document order.
    pub fn fetch_municipalities(
        &self,
        index_url: &str,
    ) -> Result<Vec<MunicipalityRef>, ScraperError> {
        log::info!("Fetching municipality index from {index_url}...");
        let html = self.fetch_text(index_url)?;
        let municipalities = parse_municipality_list(&html, &self.config)?;
        Ok(municipalities)
    }

    /// Fetches one municipality's detail page and extracts its record.
    pub fn fetch_results(
        &self,
        municipality: &MunicipalityRef,
    ) -> Result<ResultRecord, ScraperError> {
        let html = self.fetch_text(&municipality.detail_url)?;
        Ok(parse_results(
            &html,
            &municipality.code,
            &municipality.name,
            &self.config,
        ))
    }

    /// Best-effort batch run over an already-fetched listing: a failed
    /// municipality is recorded in the report and the run continues.
    pub fn scrape_all(&self, municipalities: &[MunicipalityRef]) -> ScrapeReport {
        let total = municipalities.len();
        let mut report = ScrapeReport::default();

        for (i, municipality) in municipalities.iter().enumerate() {
            log::info!("[{}/{}] Processing {}", i + 1, total, municipality);

            match self.fetch_results(municipality) {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    log::warn!("Failed to process {}: {}", municipality, e);
                    report.failures.push(ScrapeFailure {
                        code: municipality.code.clone(),
                        name: municipality.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}
