//! # Varykey Core
//!
//! Core types of the varykey output-cache key composer.
//!
//! Given a renderable unit and a snapshot of request facts, a [`KeyComposer`]
//! deterministically builds the single string key that identifies one
//! cacheable variant of the unit's output, or returns `None` when the unit
//! cannot be cached.
//!
//! ## Features
//!
//! - **Deterministic**: the key depends only on the unit and the request facts
//! - **Fixed axis order**: segments always appear in [`Axis::DEFAULT_ORDER`]
//! - **Lazy context reads**: only enabled axes query the [`VarySource`]
//! - **Swappable derivations**: every axis has its own [`SegmentResolver`]
//! - **Lock-free**: composing never blocks and never takes a lock
//! - **Statistics**: optional composed/skipped counters (`stats` feature)
//!
//! ## Module Organization
//!
//! - [`axis`] - Vary-by axes, their tags and the default order
//! - [`cache_spec`] - Per-unit vary-by flags
//! - [`unit`] - The renderable unit being keyed
//! - [`context`] - Request facts and the owned snapshot
//! - [`segment`] - Per-axis resolvers and canonical pair serialization
//! - [`composer`] - The key composer and its builder
//! - [`pipeline`] - Guarded, write-once key assignment for a render pass
//! - [`config`] - Serde-loadable composer settings
//!
mod axis;
mod cache_spec;
mod composer;
mod config;
mod context;
mod error;
mod keys;
mod pipeline;
mod unit;

pub mod segment;

#[cfg(feature = "stats")]
mod stats;

#[cfg(feature = "stats")]
pub mod stats_registry;

pub use axis::Axis;
pub use cache_spec::CacheSpec;
pub use composer::{KeyComposer, KeyComposerBuilder};
pub use config::ComposerConfig;
pub use context::{VaryContext, VarySource};
pub use error::ConfigError;
pub use keys::CacheKey;
pub use pipeline::RenderPass;
pub use segment::{canonical_pairs, resolver_fn, SegmentResolver};
pub use unit::RenderableUnit;

#[cfg(feature = "stats")]
pub use stats::ComposeStats;
