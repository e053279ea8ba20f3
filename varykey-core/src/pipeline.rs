//! Key assignment step of a render pipeline.
//!
//! Hosts that drive rendering through a pipeline of processors can call
//! [`KeyComposer::process`] once per unit. It applies the guards a render
//! pass needs before a key is composed and writes the key at most once.

use tracing::debug;

use crate::{CacheKey, KeyComposer, RenderableUnit, VarySource};

/// Per-unit state of one render pass, owned by the host.
///
/// # Fields
///
/// * `rendered` - Output was already produced, e.g. served from the cache
/// * `cacheable` - The host decided this unit may be cached
/// * `cache_key` - Key assigned for this pass, written at most once
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderPass {
    pub rendered: bool,
    pub cacheable: bool,
    pub cache_key: Option<CacheKey>,
}

impl RenderPass {
    /// A pass for a unit the host marked cacheable.
    pub fn cacheable() -> Self {
        Self {
            cacheable: true,
            ..Self::default()
        }
    }

    /// Returns true if the pass already carries a non-empty key.
    pub fn has_key(&self) -> bool {
        self.cache_key.as_ref().is_some_and(|key| !key.is_empty())
    }
}

impl KeyComposer {
    /// Assigns a cache key to `pass` if the pass still needs one.
    ///
    /// Nothing happens when the unit was already rendered, is not cacheable,
    /// or already has a key. Otherwise the composed key is stored in
    /// `pass.cache_key`; a unit without a base key leaves it `None`, which
    /// the host must treat as "do not cache this render".
    ///
    /// Returns true if a key was assigned by this call.
    ///
    /// # Examples
    ///
    /// ```
    /// use varykey_core::{KeyComposer, RenderPass, RenderableUnit, VaryContext};
    ///
    /// let composer = KeyComposer::new();
    /// let unit = RenderableUnit::new("footer");
    /// let ctx = VaryContext::new("en");
    ///
    /// let mut pass = RenderPass::cacheable();
    /// assert!(composer.process(&mut pass, &unit, &ctx));
    /// assert_eq!(pass.cache_key.as_ref().unwrap(), "footer_#lang:EN");
    ///
    /// // The key is written once
    /// assert!(!composer.process(&mut pass, &unit, &VaryContext::new("da")));
    /// assert_eq!(pass.cache_key.as_ref().unwrap(), "footer_#lang:EN");
    /// ```
    pub fn process(
        &self,
        pass: &mut RenderPass,
        unit: &RenderableUnit,
        ctx: &dyn VarySource,
    ) -> bool {
        if pass.rendered {
            return false;
        }

        if !pass.cacheable || pass.has_key() {
            debug!(
                cacheable = pass.cacheable,
                has_key = pass.has_key(),
                "skipping cache key generation"
            );
            return false;
        }

        pass.cache_key = self.compose_key(unit, ctx);
        pass.cache_key.is_some()
    }
}
