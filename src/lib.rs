//! # amendlaw - Korean Statutory Amendment Drafter
//!
//! Given a word to replace and the corpus of laws that mention it,
//! drafts the formal Korean legislative amendment clauses a human
//! drafter would write by hand: "「◯◯」을 「◯◯」로 한다." for every
//! article/paragraph/item/sub-item the word appears in, consolidated
//! across matching loci and phrased with the correct particle
//! allomorph for the replacement word's batchim.
//!
//! ## Quick Start
//!
//! ```no_run
//! use amendlaw::core::{amend, LawDocument};
//!
//! let corpus: Vec<LawDocument> = Vec::new(); // built from a parsed XML corpus
//! let clauses = amend("지방법원", "지역법원", &corpus);
//! for clause in clauses {
//!     println!("{clause}");
//! }
//! ```
//!
//! ## Layout
//!
//! - `core`: the pure, synchronous amendment engine (morphology,
//!   classifier, rule engine, location aggregator, per-law and batch
//!   drivers). No I/O.
//! - `search`: the companion `search(find, corpus)` entry point.
//! - `corpus`: out-of-scope network/XML collaborator that builds a
//!   `Vec<LawDocument>` from `law.go.kr`.
//! - `cache`, `config`: ambient infrastructure shared by the corpus
//!   fetcher and CLI.
//! - `cli`: the `amendlaw` binary's argument parsing and dispatch.

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod search;
