//! Guarded lazy-resource caching
//!
//! [`ResourceCache`] builds each key at most once across concurrent callers
//! and keeps the result until it is explicitly invalidated.

pub mod resource;

pub use resource::ResourceCache;
