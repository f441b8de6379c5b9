use std::sync::Arc;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::core::amend;
use crate::corpus::{CorpusFetcher, FetcherConfig};
use crate::error::{AmendError, Result};

/// Execute `amendlaw amend <find> <replace>`.
pub async fn execute(find: String, replace: String, no_cache: bool) -> Result<()> {
    if find.trim().is_empty() {
        return Err(AmendError::InvalidInput("search word cannot be empty".to_string()));
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

    let corpus = fetcher.fetch_corpus(&find).await?;
    let clauses = amend(&find, &replace, &corpus);

    for clause in clauses {
        println!("{clause}\n");
    }

    Ok(())
}
