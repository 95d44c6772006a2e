#![doc = include_str!("../README.md")]
//! tidemark-middleware
//!
//! Re-exports for provider wrappers.

mod builder;
mod cache;
mod quota;

pub use crate::builder::ProviderBuilder;
pub use crate::cache::{CacheMiddleware, CachingProvider};
pub use crate::quota::{QuotaAwareProvider, QuotaMiddleware};
