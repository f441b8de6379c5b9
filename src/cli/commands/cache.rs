use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;

#[derive(clap::Subcommand, Debug)]
pub enum CacheCommand {
    /// Show cache statistics
    Stats,
    /// Remove all cache entries
    Clear,
    /// Remove expired cache entries
    Cleanup,
}

pub async fn execute(command: CacheCommand) -> Result<()> {
    let config = Config::load()?;
    let cache = CacheStore::new(config.cache.to_cache_config()).await?;

    match command {
        CacheCommand::Stats => {
            let stats = cache.stats().await?;
            println!("Entries: {}", stats.total_entries);
            println!("Expired: {}", stats.expired_entries);
            println!(
                "Size: {} / {} bytes ({:.1}%)",
                stats.total_size,
                stats.max_size,
                stats.utilization_percent()
            );
        }
        CacheCommand::Clear => {
            cache.clear().await?;
            println!("Cache cleared.");
        }
        CacheCommand::Cleanup => {
            let removed = cache.cleanup_expired().await?;
            println!("Removed {removed} expired entries.");
        }
    }
    Ok(())
}
