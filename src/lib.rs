//! # Lawbot
//!
//! Retrieval of prior legal question/answer cases for free-text questions.
//!
//! A fixed corpus of cases is loaded once at startup and indexed with TF-IDF
//! term weights. Each question is projected into the same term space and the
//! cases with the highest cosine similarity above a relevance floor are
//! returned, ready to be rendered into a prompt context or report.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐
//! │ Corpus file  │──▶│  CaseService   │──▶│ CLI / HTTP   │
//! │ JSON / JSONL │   │ corpus + index │   │ (lawbot)     │
//! └──────────────┘   └────────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! lawbot stats
//! lawbot search "can I get bail before arrest" --top-k 5 --explain
//! lawbot get 42
//! lawbot serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Corpus loader |
//! | [`service`] | Shared retrieval service |
//! | [`context`] | Prompt context and report rendering |
//! | [`search`] | `search` command |
//! | [`get`] | `get` command |
//! | [`stats`] | `stats` command |
//! | [`server`] | JSON HTTP server |
//!
//! The index, tokenizer and ranking live in the `lawbot-core` crate.

pub mod config;
pub mod context;
pub mod corpus;
pub mod get;
pub mod search;
pub mod server;
pub mod service;
pub mod stats;
