use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::corpus::{CorpusFetcher, FetcherConfig};
use crate::error::{AmendError, Result};
use crate::search::{render_html_block, search};

/// Execute `amendlaw search <query>`.
pub async fn execute(query: String, html: bool, no_cache: bool) -> Result<()> {
    if query.trim().is_empty() {
        return Err(AmendError::InvalidInput("search query cannot be empty".to_string()));
    }

    let config = Config::load()?;
    let api_key = config.get_law_api_key().ok_or(AmendError::NoApiKey)?;

    let cache = if config.cache.enabled && !no_cache {
        let cache_config = config.cache.to_cache_config();
        Some(Arc::new(CacheStore::new(cache_config).await?))
    } else {
        None
    };

    let fetcher = CorpusFetcher::new(FetcherConfig {
        api_key,
        cache,
        bypass_cache: no_cache,
        timeout: Duration::from_secs(30),
    });

    let corpus = fetcher.fetch_corpus(&query).await?;
    let results = search(&query, &corpus);

    if results.is_empty() {
        println!("No results found for '{query}'.");
        return Ok(());
    }

    for (law_name, snippets) in results {
        println!("## {law_name}");
        if html {
            println!("{}", render_html_block(&snippets));
        } else {
            for snippet in &snippets {
                println!("{snippet}");
            }
        }
        println!();
    }

    Ok(())
}
