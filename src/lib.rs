//! # Varykey
//!
//! Deterministic variant cache keys for rendered output.
//!
//! An output cache stores one payload per *variant* of a renderable unit: the
//! same sidebar may render differently per language, device, signed-in user
//! or query string. Varykey turns a unit's base key plus the request facts it
//! varies by into one readable key such as
//! `hero_#lang:EN_#dev:Default_#user:extranet\alice`.
//!
//! ## Features
//!
//! - **Deterministic**: two requests that should share output always get the same key
//! - **Collision-free segments**: every axis writes its own `_#<tag>:` segment
//! - **No base key, no cache**: vary-by axes refine a key, they never invent one
//! - **Explicit context**: request facts are passed in, never read from globals
//! - **Pluggable**: swap the derivation of any single axis
//!
//! ## Quick Start
//!
//! ```rust
//! use varykey::{compose_key, CacheSpec, RenderableUnit, VaryContext};
//!
//! let unit = RenderableUnit::new("list")
//!     .with_spec(CacheSpec::none().with_data(true))
//!     .with_data_identity("/sitecore/content/home");
//! let ctx = VaryContext::new("da");
//!
//! let key = compose_key(&unit, &ctx).unwrap();
//! assert_eq!(key, "list_#lang:DA_#data:/sitecore/content/home");
//! ```
//!
//! ## Key Layout
//!
//! Segments are appended to the base key in a fixed order:
//!
//! | Axis | Tag | Included when |
//! |------|-----|---------------|
//! | Language | `lang` | always (upper-cased) |
//! | Area | `area` | the route carries an area |
//! | Data | `data` | `vary_by_data` and the unit is data-bound |
//! | Device | `dev` | `vary_by_device` |
//! | Login | `login` | `vary_by_login` |
//! | User | `user` | `vary_by_user` |
//! | Parameters | `parm` | `vary_by_parameters` and the unit has parameters |
//! | Query string | `qs` | `vary_by_query_string` and a request with a query string is active |
//!
//! The order and the tags are a compatibility contract: changing them makes
//! every key already in the cache unreachable.
//!
//! ## Custom Resolvers
//!
//! ```rust
//! use varykey::{resolver_fn, Axis, CacheSpec, KeyComposer, RenderableUnit, VaryContext, VarySource};
//!
//! // Treat tablets as desktops
//! let composer = KeyComposer::builder()
//!     .resolver(
//!         Axis::Device,
//!         resolver_fn(|_, ctx| match &*ctx.device_name() {
//!             "Tablet" => Some("Default".to_string()),
//!             other => Some(other.to_string()),
//!         }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let unit = RenderableUnit::new("hero").with_spec(CacheSpec::none().with_device(true));
//! let key = composer
//!     .compose_key(&unit, &VaryContext::new("en").with_device("Tablet"))
//!     .unwrap();
//! assert_eq!(key, "hero_#lang:EN_#dev:Default");
//! ```

use once_cell::sync::Lazy;

pub use varykey_core::*;

static DEFAULT_COMPOSER: Lazy<KeyComposer> = Lazy::new(|| {
    tracing::debug!("initializing default key composer");
    KeyComposer::new()
});

/// Composes a key with the shared default composer.
///
/// Uses [`Axis::DEFAULT_ORDER`] and the built-in resolvers. Returns `None`
/// when the unit has neither its own nor a renderer-level base key; callers
/// must then render without caching.
///
/// # Examples
///
/// ```rust
/// use varykey::{compose_key, CacheSpec, RenderableUnit, VaryContext};
///
/// let unit = RenderableUnit::new("hero").with_spec(CacheSpec::none().with_device(true));
/// let ctx = VaryContext::new("en").with_device("Default");
/// assert_eq!(compose_key(&unit, &ctx).unwrap(), "hero_#lang:EN_#dev:Default");
///
/// let anonymous = RenderableUnit::new("");
/// assert!(compose_key(&anonymous, &ctx).is_none());
/// ```
pub fn compose_key(unit: &RenderableUnit, ctx: &dyn VarySource) -> Option<CacheKey> {
    DEFAULT_COMPOSER.compose_key(unit, ctx)
}

/// Runs the key assignment step for one render pass with the default composer.
///
/// See [`KeyComposer::process`].
pub fn process(pass: &mut RenderPass, unit: &RenderableUnit, ctx: &dyn VarySource) -> bool {
    DEFAULT_COMPOSER.process(pass, unit, ctx)
}

/// Returns the shared default composer.
pub fn default_composer() -> &'static KeyComposer {
    &DEFAULT_COMPOSER
}
