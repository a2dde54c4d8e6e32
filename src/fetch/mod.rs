// src/fetch/mod.rs
pub mod client;

pub use client::{DocumentFetcher, HttpFetcher, DEFAULT_USER_AGENT};
