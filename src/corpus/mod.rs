//! Out-of-scope external collaborator: fetches and parses the corpus
//! of `LawDocument`s the core engine runs against. None of this module
//! is exercised by spec.md's testable properties; it exists only so
//! the CLI has something to hand `core::amend`/`search` in practice.

pub mod fetcher;
pub mod http_client;
pub mod xml;

pub use fetcher::{CorpusFetcher, FetcherConfig};
