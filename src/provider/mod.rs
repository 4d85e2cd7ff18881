//! Hosted provider plumbing shared by all pipeline stages.
//!
//! One [`ProviderClient`] is built per pipeline assembly; every stage
//! adapter clones it, so authentication and timeout policy live here and
//! nowhere else.

pub mod client;

pub use client::{resolve_api_key, CredentialError, ProviderClient, ProviderError, API_KEY_ENV};
