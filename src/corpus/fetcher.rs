//! The corpus fetcher: retrieves the set of laws matching an
//! exact-phrase search from `law.go.kr`'s DRF endpoints and parses
//! each into a `LawDocument`.
//!
//! Out of scope per spec.md — this exists only so `amend()`/`search()`
//! have something to run against outside of tests. Grounded on the
//! teacher's NLIC client: same connection pool, same retry/backoff
//! loop, same cache-check/store wrapping, generalized from JSON to
//! this crate's single XML response shape.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::Client;
use tokio::time::sleep;

use crate::cache::key::CacheKeyGenerator;
use crate::cache::CacheStore;
use crate::core::model::LawDocument;
use crate::error::{AmendError, Result};

use super::http_client::create_http_client;
use super::xml::parse_law_xml;

const SEARCH_URL: &str = "https://www.law.go.kr/DRF/lawSearch.do";
const SERVICE_URL: &str = "https://www.law.go.kr/DRF/lawService.do";
const PAGE_SIZE: u32 = 100;
const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Corpus fetcher configuration.
pub struct FetcherConfig {
    pub api_key: String,
    pub cache: Option<Arc<CacheStore>>,
    pub bypass_cache: bool,
    pub timeout: Duration,
}

pub struct CorpusFetcher {
    config: FetcherConfig,
    http_client: Client,
}

/// One hit from the law-name search, before its full text is fetched.
struct LawRef {
    name: String,
    mst: String,
}

impl CorpusFetcher {
    pub fn new(config: FetcherConfig) -> Self {
        let http_client = create_http_client(config.timeout);
        Self { config, http_client }
    }

    async fn execute_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;
        let mut retry_delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                sleep(retry_delay).await;
                retry_delay *= 2;
            }

            match self.http_client.get(url).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.text().await.map_err(AmendError::Network);
                    } else if response.status().as_u16() == 429 {
                        last_error = Some(AmendError::RateLimit);
                    } else if response.status().is_server_error() {
                        last_error = Some(AmendError::ServerError(format!("Server returned status {}", response.status())));
                    } else {
                        return Err(AmendError::ApiError {
                            code: response.status().to_string(),
                            message: format!("API request failed with status {}", response.status()),
                            hint: None,
                        });
                    }
                }
                Err(e) => last_error = Some(AmendError::Network(e)),
            }
        }

        Err(last_error.unwrap_or_else(|| AmendError::Other("Request failed after all retries".to_string())))
    }

    async fn cached_get(&self, cache_key: &str, url: &str) -> Result<String> {
        if let Some(ref cache) = self.config.cache {
            if !self.config.bypass_cache {
                if let Some(cached) = cache.get(cache_key).await? {
                    debug!("cache hit for {cache_key}");
                    return Ok(String::from_utf8_lossy(&cached).to_string());
                }
            }
        }

        let body = self.execute_with_retry(url).await?;

        if let Some(ref cache) = self.config.cache {
            if !self.config.bypass_cache {
                if let Err(e) = cache.put(cache_key, body.clone().into_bytes(), None).await {
                    warn!("failed to store response in cache: {e}");
                }
            }
        }

        Ok(body)
    }

    /// Search for laws matching `query` by exact phrase, following
    /// pagination (100 per page) until a page returns fewer than the
    /// full page size.
    async fn search_all(&self, query: &str) -> Result<Vec<LawRef>> {
        let mut refs = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{SEARCH_URL}?OC={}&target=law&type=XML&query=\"{}\"&display={PAGE_SIZE}&page={page}",
                self.config.api_key, query
            );
            let cache_key = CacheKeyGenerator::search_key(query, page, PAGE_SIZE);
            let body = self.cached_get(&cache_key, &url).await?;

            let page_refs = parse_search_page(&body)?;
            let count = page_refs.len();
            refs.extend(page_refs);

            if count < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        info!("found {} candidate laws for '{}'", refs.len(), query);
        Ok(refs)
    }

    /// Fetch one law's full text by MST and parse it.
    async fn fetch_law(&self, law_ref: &LawRef) -> Result<LawDocument> {
        let url = format!("{SERVICE_URL}?OC={}&target=law&type=XML&MST={}", self.config.api_key, law_ref.mst);
        let cache_key = CacheKeyGenerator::law_text_key(&law_ref.mst);
        let body = self.cached_get(&cache_key, &url).await?;
        parse_law_xml(&law_ref.name, &body)
    }

    /// Build the corpus of `LawDocument`s matching `query`. Laws whose
    /// XML fails to parse are skipped with a logged diagnostic rather
    /// than aborting the whole fetch, matching spec.md §7's
    /// malformed-document contract.
    pub async fn fetch_corpus(&self, query: &str) -> Result<Vec<LawDocument>> {
        let refs = self.search_all(query).await?;
        let mut corpus = Vec::with_capacity(refs.len());

        for law_ref in &refs {
            match self.fetch_law(law_ref).await {
                Ok(doc) => corpus.push(doc),
                Err(e) => warn!("skipping {}: {e}", law_ref.name),
            }
        }

        Ok(corpus)
    }
}

fn parse_search_page(xml: &str) -> Result<Vec<LawRef>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut refs = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_mst: Option<String> = None;
    let mut path: Vec<String> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == "law" {
                    current_name = None;
                    current_mst = None;
                }
                path.push(tag);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| AmendError::Xml(err.to_string()))?.to_string();
                match path.last().map(String::as_str) {
                    Some("법령명한글") => current_name = Some(text.trim().to_string()),
                    Some("법령일련번호") => current_mst = Some(text.trim().to_string()),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                path.pop();
                if tag == "law" {
                    if let (Some(name), Some(mst)) = (current_name.take(), current_mst.take()) {
                        refs.push(LawRef { name, mst });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AmendError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_search_page() {
        let xml = r#"
            <LawSearch>
              <law>
                <법령명한글>샘플법</법령명한글>
                <법령일련번호>12345</법령일련번호>
              </law>
            </LawSearch>
        "#;
        let refs = parse_search_page(xml).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "샘플법");
        assert_eq!(refs[0].mst, "12345");
    }
}
