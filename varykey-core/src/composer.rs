use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::segment::default_resolver;
use crate::{Axis, CacheKey, ConfigError, RenderableUnit, SegmentResolver, VarySource};

#[cfg(feature = "stats")]
use crate::{stats_registry, ComposeStats};

const AXIS_COUNT: usize = Axis::DEFAULT_ORDER.len();

/// Composes variant cache keys for renderable units.
///
/// A composer takes a unit's base key and appends one tagged segment per
/// contributing axis, `"_#<tag>:<value>"`, in a fixed axis order:
///
/// 1. `lang` - always, upper-cased
/// 2. `area` - always, when the route carries an area
/// 3. `data`, `dev`, `login`, `user`, `parm`, `qs` - each only when the
///    unit's [`CacheSpec`](crate::CacheSpec) enables it
///
/// An axis whose value is absent or empty contributes nothing, not even its
/// tag. A unit without a base key gets no key at all.
///
/// # Compatibility
///
/// The axis order is part of every key's identity. Reordering axes, or
/// replacing a resolver with one that renders values differently, makes
/// every previously cached entry unreachable. The default order is
/// [`Axis::DEFAULT_ORDER`]; only [`KeyComposerBuilder::order`] changes it.
///
/// # Thread Safety
///
/// A composer holds no mutable state besides relaxed atomic counters (with
/// the `stats` feature) and can be shared freely across threads. Each call
/// reads only its arguments and never blocks.
///
/// # Examples
///
/// ```
/// use varykey_core::{CacheSpec, KeyComposer, RenderableUnit, VaryContext};
///
/// let composer = KeyComposer::new();
///
/// let unit = RenderableUnit::new("hero").with_spec(CacheSpec::none().with_device(true));
/// let ctx = VaryContext::new("en").with_device("Default");
///
/// let key = composer.compose_key(&unit, &ctx).unwrap();
/// assert_eq!(key, "hero_#lang:EN_#dev:Default");
///
/// // No base key, no cache
/// assert!(composer.compose_key(&RenderableUnit::new(""), &ctx).is_none());
/// ```
#[derive(Clone)]
pub struct KeyComposer {
    name: Option<String>,
    order: [Axis; AXIS_COUNT],
    resolvers: [Arc<dyn SegmentResolver>; AXIS_COUNT],
    #[cfg(feature = "stats")]
    stats: Arc<ComposeStats>,
}

impl KeyComposer {
    /// Creates a composer with the default order and built-in resolvers.
    pub fn new() -> Self {
        Self {
            name: None,
            order: Axis::DEFAULT_ORDER,
            resolvers: Axis::DEFAULT_ORDER.map(default_resolver),
            #[cfg(feature = "stats")]
            stats: Arc::new(ComposeStats::new()),
        }
    }

    pub fn builder() -> KeyComposerBuilder {
        KeyComposerBuilder::new()
    }

    /// Composes the key for one unit, or `None` if the unit has no base key.
    ///
    /// The result depends only on `unit` and `ctx`: repeated calls return
    /// byte-identical keys. `ctx` is consulted only for axes the unit enables.
    pub fn compose_key(&self, unit: &RenderableUnit, ctx: &dyn VarySource) -> Option<CacheKey> {
        let Some(base) = unit.base_cache_key() else {
            debug!(composer = self.label(), "unit has no base cache key, not cacheable");
            #[cfg(feature = "stats")]
            self.stats.record_skipped();
            return None;
        };

        let mut key = String::with_capacity(base.len() + 64);
        key.push_str(base);

        for axis in self.order {
            if !axis.is_enabled(&unit.cache_spec) {
                continue;
            }
            if let Some(value) = self.resolvers[axis.index()].resolve(unit, ctx) {
                push_segment(&mut key, axis, &value);
            }
        }

        trace!(composer = self.label(), key = %key, "composed variant cache key");
        #[cfg(feature = "stats")]
        self.stats.record_composed();

        Some(CacheKey::from(key))
    }

    /// Returns the full `"_#<tag>:<value>"` segment one axis would contribute,
    /// ignoring whether the unit's spec enables that axis.
    ///
    /// ```
    /// use varykey_core::{Axis, KeyComposer, RenderableUnit, VaryContext};
    ///
    /// let composer = KeyComposer::new();
    /// let unit = RenderableUnit::new("list");
    /// let ctx = VaryContext::new("da").with_area("shop");
    ///
    /// assert_eq!(composer.segment(Axis::Area, &unit, &ctx).as_deref(), Some("_#area:shop"));
    /// assert_eq!(composer.segment(Axis::Data, &unit, &ctx), None);
    /// ```
    pub fn segment(
        &self,
        axis: Axis,
        unit: &RenderableUnit,
        ctx: &dyn VarySource,
    ) -> Option<String> {
        let value = self.resolvers[axis.index()].resolve(unit, ctx)?;
        let mut segment = String::new();
        push_segment(&mut segment, axis, &value);
        if segment.is_empty() {
            None
        } else {
            Some(segment)
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The axis order this composer appends segments in.
    pub fn order(&self) -> &[Axis] {
        &self.order
    }

    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &ComposeStats {
        &self.stats
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("default")
    }
}

impl Default for KeyComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyComposer")
            .field("name", &self.name)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

fn push_segment(key: &mut String, axis: Axis, value: &str) {
    if value.is_empty() {
        return;
    }
    key.push_str("_#");
    key.push_str(axis.tag());
    key.push(':');
    key.push_str(value);
}

/// Builder for a [`KeyComposer`] with swapped resolvers or a custom order.
///
/// # Examples
///
/// ```
/// use varykey_core::{resolver_fn, Axis, CacheSpec, KeyComposer, RenderableUnit, VaryContext, VarySource};
///
/// let composer = KeyComposer::builder()
///     .name("mobile_site")
///     .resolver(Axis::Device, resolver_fn(|_, ctx| Some(ctx.device_name().to_lowercase())))
///     .build()
///     .unwrap();
///
/// let unit = RenderableUnit::new("hero").with_spec(CacheSpec::none().with_device(true));
/// let ctx = VaryContext::new("en").with_device("Mobile");
///
/// assert_eq!(composer.compose_key(&unit, &ctx).unwrap(), "hero_#lang:EN_#dev:mobile");
/// ```
pub struct KeyComposerBuilder {
    name: Option<String>,
    order: Vec<Axis>,
    resolvers: [Arc<dyn SegmentResolver>; AXIS_COUNT],
}

impl KeyComposerBuilder {
    fn new() -> Self {
        Self {
            name: None,
            order: Axis::DEFAULT_ORDER.to_vec(),
            resolvers: Axis::DEFAULT_ORDER.map(default_resolver),
        }
    }

    /// Names the composer. Named composers register their statistics in the
    /// global stats registry when built.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the axis order. The order must list every axis exactly once.
    ///
    /// This changes the identity of every key the composer produces.
    pub fn order<I>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = Axis>,
    {
        self.order = order.into_iter().collect();
        self
    }

    /// Replaces the resolver of one axis.
    pub fn resolver<R>(self, axis: Axis, resolver: R) -> Self
    where
        R: SegmentResolver + 'static,
    {
        self.shared_resolver(axis, Arc::new(resolver))
    }

    /// Replaces the resolver of one axis with an already shared instance.
    pub fn shared_resolver(mut self, axis: Axis, resolver: Arc<dyn SegmentResolver>) -> Self {
        self.resolvers[axis.index()] = resolver;
        self
    }

    pub fn build(self) -> Result<KeyComposer, ConfigError> {
        let order = validate_order(&self.order)?;

        #[cfg(feature = "stats")]
        let stats = {
            let stats = Arc::new(ComposeStats::new());
            if let Some(name) = &self.name {
                stats_registry::register(name, Arc::clone(&stats));
            }
            stats
        };

        Ok(KeyComposer {
            name: self.name,
            order,
            resolvers: self.resolvers,
            #[cfg(feature = "stats")]
            stats,
        })
    }
}

/// Checks that `order` is a permutation of all axes.
fn validate_order(order: &[Axis]) -> Result<[Axis; AXIS_COUNT], ConfigError> {
    let mut seen = [false; AXIS_COUNT];
    for &axis in order {
        if std::mem::replace(&mut seen[axis.index()], true) {
            return Err(ConfigError::DuplicateAxis(axis));
        }
    }

    if let Some(missing) = Axis::DEFAULT_ORDER
        .into_iter()
        .find(|axis| !seen[axis.index()])
    {
        return Err(ConfigError::MissingAxis(missing));
    }

    let mut validated = Axis::DEFAULT_ORDER;
    validated.copy_from_slice(order);
    Ok(validated)
}
