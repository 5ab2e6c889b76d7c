//! # Lawbot Core
//!
//! Shared, I/O-free logic for lawbot: the case data model, stop words,
//! tokenization, TF-IDF vectorization, the relevance index and ranking.
//!
//! This crate contains no tokio, filesystem or network code. The application
//! crate is responsible for loading the corpus and exposing it to callers.

pub mod index;
pub mod models;
pub mod search;
pub mod stop_words;
pub mod tokenize;
pub mod vectorizer;
