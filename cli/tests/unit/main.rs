//! Unit tests for convoy CLI
//!
//! These tests drive application services through mocked ports and a fake
//! clock, so they run fast without a cluster, docker, or real waiting.

mod create_service;
mod image_fetcher;
mod remove_service;
mod routes_service;
mod task_service;
