//! Integration tests for Movie-Harvest
//!
//! These tests drive the full pipeline with an in-memory page fetcher.

mod pipeline_tests;
