use varykey::{
    default_composer, process, CacheSpec, RenderPass, RenderableUnit, VaryContext,
};

fn main() {
    println!("=== Varykey Render Pass Demo ===\n");

    let units = vec![
        RenderableUnit::new("hero").with_spec(CacheSpec::none().with_device(true)),
        RenderableUnit::new("product_list")
            .with_spec(CacheSpec::none().with_data(true).with_parameters(true))
            .with_data_identity("/sitecore/content/home/products")
            .with_parameter("page_size", "12"),
        RenderableUnit::new("greeting").with_spec(CacheSpec::none().with_login(true).with_user(true)),
        RenderableUnit::new("search_results").with_spec(CacheSpec::none().with_query_string(true)),
        // No base key: rendered every time
        RenderableUnit::new("clock").with_spec(CacheSpec::all()),
    ];

    let requests = vec![
        (
            "anonymous desktop",
            VaryContext::new("en")
                .with_device("Default")
                .with_user_name("extranet\\Anonymous")
                .with_query_pair("q", "boots"),
        ),
        (
            "signed-in mobile",
            VaryContext::new("da")
                .with_area("shop")
                .with_device("Mobile")
                .with_user("extranet\\alice")
                .with_query_pair("q", "boots")
                .with_query_pair("page", "2"),
        ),
    ];

    for (label, ctx) in &requests {
        println!("Request: {}", label);
        for unit in &units {
            let mut pass = RenderPass::cacheable();
            process(&mut pass, unit, ctx);
            match &pass.cache_key {
                Some(key) => println!("  {:<16} -> {}", unit.cache_key, key),
                None => println!("  {:<16} -> (not cached)", unit.cache_key),
            }
        }
        println!();
    }

    #[cfg(feature = "stats")]
    {
        let stats = default_composer().stats();
        println!(
            "Composed: {}, skipped: {}, cacheable rate: {:.1}%",
            stats.composed(),
            stats.skipped(),
            stats.cacheable_rate() * 100.0
        );
    }
    #[cfg(not(feature = "stats"))]
    let _ = default_composer();

    println!("\n=== Demo Complete ===");
}
