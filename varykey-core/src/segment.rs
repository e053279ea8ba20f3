//! Per-axis segment derivation.
//!
//! Each axis value comes from a [`SegmentResolver`]. The composer owns one
//! resolver per axis and any of them can be swapped out independently, e.g.
//! to normalise device names or to drop a noisy query-string parameter,
//! without touching the others or the axis order.
//!
//! A resolver returns only the value; the composer writes the `_#<tag>:`
//! prefix. Returning `None` or an empty value means the axis contributes
//! nothing, not even its tag.

use std::borrow::Cow;
use std::sync::Arc;

use url::form_urlencoded;

use crate::{Axis, RenderableUnit, VarySource};

/// Derives the value of one axis segment.
///
/// Implementations must be pure projections of their inputs: no I/O, no
/// locking, no interior state that changes the result between calls.
pub trait SegmentResolver: Send + Sync {
    fn resolve<'a>(
        &self,
        unit: &'a RenderableUnit,
        ctx: &'a dyn VarySource,
    ) -> Option<Cow<'a, str>>;
}

/// Wraps a closure returning an owned value as a [`SegmentResolver`].
///
/// # Examples
///
/// ```
/// use varykey_core::{resolver_fn, RenderableUnit, SegmentResolver, VaryContext, VarySource};
///
/// let lower_device = resolver_fn(|_unit, ctx| Some(ctx.device_name().to_lowercase()));
///
/// let unit = RenderableUnit::new("hero");
/// let ctx = VaryContext::new("en").with_device("Mobile");
/// assert_eq!(lower_device.resolve(&unit, &ctx).as_deref(), Some("mobile"));
/// ```
pub fn resolver_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&RenderableUnit, &dyn VarySource) -> Option<String> + Send + Sync,
{
    FnResolver(f)
}

pub struct FnResolver<F>(F);

impl<F> SegmentResolver for FnResolver<F>
where
    F: Fn(&RenderableUnit, &dyn VarySource) -> Option<String> + Send + Sync,
{
    fn resolve<'a>(
        &self,
        unit: &'a RenderableUnit,
        ctx: &'a dyn VarySource,
    ) -> Option<Cow<'a, str>> {
        (self.0)(unit, ctx).map(Cow::Owned)
    }
}

/// Upper-cased current language.
pub struct LanguageResolver;

impl SegmentResolver for LanguageResolver {
    fn resolve<'a>(&self, _: &'a RenderableUnit, ctx: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        Some(Cow::Owned(ctx.language().to_uppercase()))
    }
}

/// Area token of the current route, if it carries one.
pub struct AreaResolver;

impl SegmentResolver for AreaResolver {
    fn resolve<'a>(&self, _: &'a RenderableUnit, ctx: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        ctx.route_area()
    }
}

/// Path of the data item bound to the unit.
pub struct DataResolver;

impl SegmentResolver for DataResolver {
    fn resolve<'a>(&self, unit: &'a RenderableUnit, _: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        unit.data_identity.as_deref().map(Cow::Borrowed)
    }
}

pub struct DeviceResolver;

impl SegmentResolver for DeviceResolver {
    fn resolve<'a>(&self, _: &'a RenderableUnit, ctx: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        Some(ctx.device_name())
    }
}

/// Login state as `true` or `false`.
pub struct LoginResolver;

impl SegmentResolver for LoginResolver {
    fn resolve<'a>(&self, _: &'a RenderableUnit, ctx: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        Some(Cow::Borrowed(if ctx.is_logged_in() { "true" } else { "false" }))
    }
}

pub struct UserResolver;

impl SegmentResolver for UserResolver {
    fn resolve<'a>(&self, _: &'a RenderableUnit, ctx: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        Some(ctx.user_name())
    }
}

/// Invocation parameters in canonical form, ordered by name.
pub struct ParametersResolver;

impl SegmentResolver for ParametersResolver {
    fn resolve<'a>(&self, unit: &'a RenderableUnit, _: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        if unit.parameters.is_empty() {
            return None;
        }
        Some(Cow::Owned(canonical_pairs(&unit.parameters)))
    }
}

/// Query string of the active request in canonical form, in received order.
pub struct QueryStringResolver;

impl SegmentResolver for QueryStringResolver {
    fn resolve<'a>(&self, _: &'a RenderableUnit, ctx: &'a dyn VarySource) -> Option<Cow<'a, str>> {
        let pairs = ctx.query_string()?;
        if pairs.is_empty() {
            return None;
        }
        Some(Cow::Owned(canonical_pairs(pairs.iter().map(|(k, v)| (k, v)))))
    }
}

/// Serializes pairs as `key=value&key=value`.
///
/// Keys and values are `application/x-www-form-urlencoded`, so a `&` or `=`
/// inside a value can never be mistaken for a pair boundary. Pair order is
/// kept as given.
///
/// # Examples
///
/// ```
/// use varykey_core::canonical_pairs;
///
/// assert_eq!(canonical_pairs([("page", "2"), ("sort", "name")]), "page=2&sort=name");
/// assert_eq!(canonical_pairs([("q", "a&b=c")]), "q=a%26b%3Dc");
/// ```
pub fn canonical_pairs<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// The built-in resolver for an axis.
pub fn default_resolver(axis: Axis) -> Arc<dyn SegmentResolver> {
    match axis {
        Axis::Language => Arc::new(LanguageResolver),
        Axis::Area => Arc::new(AreaResolver),
        Axis::Data => Arc::new(DataResolver),
        Axis::Device => Arc::new(DeviceResolver),
        Axis::Login => Arc::new(LoginResolver),
        Axis::User => Arc::new(UserResolver),
        Axis::Parameters => Arc::new(ParametersResolver),
        Axis::QueryString => Arc::new(QueryStringResolver),
    }
}
