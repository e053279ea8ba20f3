// Tests for resolver injection and lazy context access

use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};

use varykey::{
    resolver_fn, Axis, CacheSpec, ConfigError, KeyComposer, RenderableUnit, SegmentResolver,
    VaryContext, VarySource,
};

/// A request source that counts which facts were looked up.
#[derive(Default)]
struct CountingSource {
    language: AtomicUsize,
    area: AtomicUsize,
    device: AtomicUsize,
    login: AtomicUsize,
    user: AtomicUsize,
    query: AtomicUsize,
}

impl VarySource for CountingSource {
    fn language(&self) -> Cow<'_, str> {
        self.language.fetch_add(1, Ordering::SeqCst);
        Cow::Borrowed("en")
    }

    fn route_area(&self) -> Option<Cow<'_, str>> {
        self.area.fetch_add(1, Ordering::SeqCst);
        None
    }

    fn device_name(&self) -> Cow<'_, str> {
        self.device.fetch_add(1, Ordering::SeqCst);
        Cow::Borrowed("Default")
    }

    fn is_logged_in(&self) -> bool {
        self.login.fetch_add(1, Ordering::SeqCst);
        false
    }

    fn user_name(&self) -> Cow<'_, str> {
        self.user.fetch_add(1, Ordering::SeqCst);
        Cow::Borrowed("extranet\\Anonymous")
    }

    fn query_string(&self) -> Option<Cow<'_, [(String, String)]>> {
        self.query.fetch_add(1, Ordering::SeqCst);
        None
    }
}

#[test]
fn test_only_enabled_axes_read_context() {
    let composer = KeyComposer::new();
    let source = CountingSource::default();
    let unit = RenderableUnit::new("hero").with_spec(CacheSpec::none().with_device(true));

    let key = composer.compose_key(&unit, &source).unwrap();
    assert_eq!(key, "hero_#lang:EN_#dev:Default");

    assert_eq!(source.language.load(Ordering::SeqCst), 1);
    assert_eq!(source.area.load(Ordering::SeqCst), 1);
    assert_eq!(source.device.load(Ordering::SeqCst), 1);
    assert_eq!(source.login.load(Ordering::SeqCst), 0);
    assert_eq!(source.user.load(Ordering::SeqCst), 0);
    assert_eq!(source.query.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_base_key_reads_nothing() {
    let composer = KeyComposer::new();
    let source = CountingSource::default();
    let unit = RenderableUnit::new("").with_spec(CacheSpec::all());

    assert!(composer.compose_key(&unit, &source).is_none());
    assert_eq!(source.language.load(Ordering::SeqCst), 0);
    assert_eq!(source.device.load(Ordering::SeqCst), 0);
}

#[test]
fn test_replacing_one_resolver_changes_one_segment() {
    let custom = KeyComposer::builder()
        .resolver(
            Axis::User,
            resolver_fn(|_, ctx| Some(ctx.user_name().to_lowercase())),
        )
        .build()
        .unwrap();
    let default = KeyComposer::new();

    let unit = RenderableUnit::new("profile")
        .with_spec(CacheSpec::none().with_device(true).with_user(true));
    let ctx = VaryContext::new("en")
        .with_device("Default")
        .with_user("Extranet\\Dave");

    let default_key = default.compose_key(&unit, &ctx).unwrap();
    let custom_key = custom.compose_key(&unit, &ctx).unwrap();

    assert_eq!(default_key, "profile_#lang:EN_#dev:Default_#user:Extranet\\Dave");
    assert_eq!(custom_key, "profile_#lang:EN_#dev:Default_#user:extranet\\dave");
}

/// Drops tracking parameters from the query string.
struct IgnoreTracking;

impl SegmentResolver for IgnoreTracking {
    fn resolve<'a>(
        &self,
        _unit: &'a RenderableUnit,
        ctx: &'a dyn VarySource,
    ) -> Option<Cow<'a, str>> {
        let pairs = ctx.query_string()?;
        let kept = pairs
            .iter()
            .filter(|(key, _)| !key.starts_with("utm_"))
            .map(|(key, value)| (key, value));
        Some(Cow::Owned(varykey::canonical_pairs(kept)))
    }
}

#[test]
fn test_struct_resolver_and_empty_result() {
    let composer = KeyComposer::builder()
        .resolver(Axis::QueryString, IgnoreTracking)
        .build()
        .unwrap();

    let unit = RenderableUnit::new("landing").with_spec(CacheSpec::none().with_query_string(true));

    let tracked = VaryContext::new("en").with_query_pair("utm_source", "mail");
    assert_eq!(composer.compose_key(&unit, &tracked).unwrap(), "landing_#lang:EN");

    let mixed = VaryContext::new("en")
        .with_query_pair("utm_source", "mail")
        .with_query_pair("id", "7");
    assert_eq!(
        composer.compose_key(&unit, &mixed).unwrap(),
        "landing_#lang:EN_#qs:id=7"
    );
}

#[test]
fn test_custom_resolver_still_gated_by_flag() {
    let composer = KeyComposer::builder()
        .resolver(Axis::Login, resolver_fn(|_, _| Some("always".to_string())))
        .build()
        .unwrap();

    let unit = RenderableUnit::new("nav");
    assert_eq!(
        composer.compose_key(&unit, &VaryContext::new("en")).unwrap(),
        "nav_#lang:EN"
    );
}

#[test]
fn test_invalid_order_rejected() {
    let err = KeyComposer::builder()
        .order([Axis::Language, Axis::Language])
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateAxis(Axis::Language));
    assert_eq!(
        err.to_string(),
        "axis `lang` appears more than once in the composition order"
    );
}
