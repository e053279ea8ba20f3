use std::collections::BTreeMap;

use crate::CacheSpec;

/// The smallest piece of output eligible for independent caching.
///
/// A unit is owned by the host for the duration of one request pass; the
/// composer only ever borrows it.
///
/// # Fields
///
/// * `cache_key` - Base key supplied by the unit itself; may be empty
/// * `renderer_cache_key` - Renderer-level default key, used when `cache_key` is empty
/// * `cache_spec` - Vary-by flags
/// * `data_identity` - Stable path of the bound data item, if the unit is data-bound
/// * `parameters` - Invocation parameters, kept sorted by name
///
/// # Examples
///
/// ```
/// use varykey_core::{CacheSpec, RenderableUnit};
///
/// let unit = RenderableUnit::new("list")
///     .with_spec(CacheSpec::none().with_data(true))
///     .with_data_identity("/sitecore/content/home")
///     .with_parameter("page", "2");
///
/// assert_eq!(unit.base_cache_key(), Some("list"));
/// assert_eq!(unit.parameters.get("page").map(String::as_str), Some("2"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableUnit {
    pub cache_key: String,
    pub renderer_cache_key: Option<String>,
    pub cache_spec: CacheSpec,
    pub data_identity: Option<String>,
    pub parameters: BTreeMap<String, String>,
}

impl RenderableUnit {
    /// Creates a unit with the given base key and no vary-by flags.
    pub fn new(cache_key: impl Into<String>) -> Self {
        Self {
            cache_key: cache_key.into(),
            ..Self::default()
        }
    }

    pub fn with_renderer_cache_key(mut self, key: impl Into<String>) -> Self {
        self.renderer_cache_key = Some(key.into());
        self
    }

    pub fn with_spec(mut self, spec: CacheSpec) -> Self {
        self.cache_spec = spec;
        self
    }

    pub fn with_data_identity(mut self, path: impl Into<String>) -> Self {
        self.data_identity = Some(path.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Resolves the effective base key.
    ///
    /// The unit's own key wins; the renderer's default key is the fallback.
    /// Returns `None` when both are empty, meaning the unit cannot be cached
    /// no matter which vary-by flags it carries.
    ///
    /// ```
    /// use varykey_core::RenderableUnit;
    ///
    /// let unit = RenderableUnit::new("").with_renderer_cache_key("sidebar");
    /// assert_eq!(unit.base_cache_key(), Some("sidebar"));
    ///
    /// assert_eq!(RenderableUnit::new("").base_cache_key(), None);
    /// ```
    pub fn base_cache_key(&self) -> Option<&str> {
        if !self.cache_key.is_empty() {
            return Some(&self.cache_key);
        }

        self.renderer_cache_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }
}
