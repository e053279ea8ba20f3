/// Integration tests for named composers and the stats registry

#[cfg(feature = "stats")]
#[cfg(test)]
mod tests {
    use serial_test::serial;
    use varykey::{stats_registry, CacheSpec, ComposerConfig, KeyComposer, RenderableUnit, VaryContext};

    #[test]
    #[serial]
    fn test_named_composer_registers_stats() {
        let composer = KeyComposer::builder().name("storefront").build().unwrap();
        let ctx = VaryContext::new("en");

        composer.compose_key(&RenderableUnit::new("hero"), &ctx);
        composer.compose_key(&RenderableUnit::new("footer"), &ctx);
        composer.compose_key(&RenderableUnit::new(""), &ctx);

        let stats = stats_registry::get("storefront").expect("storefront should be registered");
        assert_eq!(stats.composed(), 2);
        assert_eq!(stats.skipped(), 1);
    }

    #[test]
    #[serial]
    fn test_unnamed_composer_not_registered() {
        stats_registry::clear();

        let composer = KeyComposer::new();
        composer.compose_key(&RenderableUnit::new("hero"), &VaryContext::new("en"));

        assert!(stats_registry::list().is_empty());
    }

    #[test]
    #[serial]
    fn test_config_name_registers_stats() {
        let config: ComposerConfig = serde_json::from_str(r#"{ "name": "extranet" }"#).unwrap();
        let composer = KeyComposer::from_config(&config).unwrap();

        let unit = RenderableUnit::new("menu").with_spec(CacheSpec::none().with_login(true));
        composer.compose_key(&unit, &VaryContext::new("en").with_logged_in(true));

        let shared = stats_registry::get_shared("extranet").unwrap();
        assert_eq!(shared.composed(), 1);

        assert!(stats_registry::reset("extranet"));
        assert_eq!(composer.stats().composed(), 0);
    }

    #[test]
    #[serial]
    fn test_rebuilding_name_replaces_registration() {
        let first = KeyComposer::builder().name("rebuilt").build().unwrap();
        first.compose_key(&RenderableUnit::new("a"), &VaryContext::new("en"));

        let _second = KeyComposer::builder().name("rebuilt").build().unwrap();

        let stats = stats_registry::get("rebuilt").unwrap();
        assert_eq!(stats.total(), 0);
    }
}
