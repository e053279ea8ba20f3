// Tests for end-to-end key composition through the default composer
//
// These tests pin the exact key layout: base key, language, area and the
// flag-gated axes in their fixed order.

use varykey::{compose_key, CacheSpec, RenderableUnit, VaryContext};

fn full_context() -> VaryContext {
    VaryContext::new("en")
        .with_area("shop")
        .with_device("Default")
        .with_user("extranet\\alice")
        .with_query_pair("page", "2")
}

#[test]
fn test_device_only() {
    let unit = RenderableUnit::new("hero").with_spec(CacheSpec::none().with_device(true));
    let ctx = VaryContext::new("en").with_device("Default");

    let key = compose_key(&unit, &ctx).unwrap();
    assert_eq!(key, "hero_#lang:EN_#dev:Default");
}

#[test]
fn test_no_base_key_no_renderer_key() {
    let unit = RenderableUnit::new("");
    assert!(compose_key(&unit, &VaryContext::new("en")).is_none());
}

#[test]
fn test_no_base_key_wins_over_every_flag() {
    // Vary-by axes refine a key, they never synthesize one
    let unit = RenderableUnit::new("")
        .with_renderer_cache_key("")
        .with_spec(CacheSpec::all())
        .with_data_identity("/sitecore/content/home")
        .with_parameter("a", "1");

    assert!(compose_key(&unit, &full_context()).is_none());
}

#[test]
fn test_renderer_key_fallback() {
    let unit = RenderableUnit::new("").with_renderer_cache_key("sidebar");
    let key = compose_key(&unit, &VaryContext::new("en")).unwrap();
    assert_eq!(key, "sidebar_#lang:EN");
}

#[test]
fn test_data_bound_unit() {
    let unit = RenderableUnit::new("list")
        .with_spec(CacheSpec::none().with_data(true))
        .with_data_identity("/sitecore/content/home");

    let key = compose_key(&unit, &VaryContext::new("da")).unwrap();
    assert_eq!(key, "list_#lang:DA_#data:/sitecore/content/home");
}

#[test]
fn test_data_flag_on_unbound_unit() {
    let unit = RenderableUnit::new("list").with_spec(CacheSpec::none().with_data(true));

    let key = compose_key(&unit, &VaryContext::new("da")).unwrap();
    assert_eq!(key, "list_#lang:DA");
}

#[test]
fn test_area_is_not_flag_gated() {
    let unit = RenderableUnit::new("menu");
    let key = compose_key(&unit, &VaryContext::new("en").with_area("shop")).unwrap();
    assert_eq!(key, "menu_#lang:EN_#area:shop");
}

#[test]
fn test_all_axes_in_fixed_order() {
    let unit = RenderableUnit::new("grid")
        .with_spec(CacheSpec::all())
        .with_data_identity("/content/products")
        .with_parameter("sort", "price")
        .with_parameter("columns", "3");

    let key = compose_key(&unit, &full_context()).unwrap();
    assert_eq!(
        key,
        "grid_#lang:EN_#area:shop_#data:/content/products_#dev:Default\
         _#login:true_#user:extranet\\alice_#parm:columns=3&sort=price_#qs:page=2"
    );
}

#[test]
fn test_anonymous_visitor() {
    let unit = RenderableUnit::new("greeting")
        .with_spec(CacheSpec::none().with_login(true).with_user(true));
    let ctx = VaryContext::new("en").with_user_name("extranet\\Anonymous");

    let key = compose_key(&unit, &ctx).unwrap();
    assert_eq!(key, "greeting_#lang:EN_#login:false_#user:extranet\\Anonymous");
}

#[test]
fn test_query_string_without_request() {
    let unit = RenderableUnit::new("search").with_spec(CacheSpec::none().with_query_string(true));

    // Background execution: no site, no request
    let key = compose_key(&unit, &VaryContext::new("en")).unwrap();
    assert_eq!(key, "search_#lang:EN");

    // Active request without query string collapses to the same key
    let empty = VaryContext::new("en").with_query_string(Vec::new());
    assert_eq!(compose_key(&unit, &empty).unwrap(), key);
}

#[test]
fn test_query_string_values_cannot_forge_pairs() {
    let unit = RenderableUnit::new("search").with_spec(CacheSpec::none().with_query_string(true));

    let forged = VaryContext::new("en").with_query_pair("q", "a&page=2");
    let honest = VaryContext::new("en")
        .with_query_pair("q", "a")
        .with_query_pair("page", "2");

    assert_ne!(
        compose_key(&unit, &forged).unwrap(),
        compose_key(&unit, &honest).unwrap()
    );
}

#[test]
fn test_parameter_insertion_order_irrelevant() {
    let spec = CacheSpec::none().with_parameters(true);
    let a = RenderableUnit::new("teaser")
        .with_spec(spec)
        .with_parameter("color", "red")
        .with_parameter("size", "l");
    let b = RenderableUnit::new("teaser")
        .with_spec(spec)
        .with_parameter("size", "l")
        .with_parameter("color", "red");

    let ctx = VaryContext::new("en");
    assert_eq!(compose_key(&a, &ctx), compose_key(&b, &ctx));
}

#[test]
fn test_language_case_insensitive() {
    let unit = RenderableUnit::new("hero");
    assert_eq!(
        compose_key(&unit, &VaryContext::new("en-gb")),
        compose_key(&unit, &VaryContext::new("EN-GB"))
    );
}

#[test]
fn test_deterministic() {
    let unit = RenderableUnit::new("grid")
        .with_spec(CacheSpec::all())
        .with_data_identity("/content/products")
        .with_parameter("sort", "price");
    let ctx = full_context();

    let first = compose_key(&unit, &ctx).unwrap();
    for _ in 0..10 {
        assert_eq!(compose_key(&unit, &ctx).unwrap(), first);
    }
}
