//! Tuning search behavior with `SearchConfig`
//!
//! This example shows the knobs a deployment can turn:
//! - Preset configurations for common needs
//! - Custom radius and result limits
//! - Input length bounding

use dewey::{LibrarySearcher, MemoryDatastore, SearchConfig, SearchConfigBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Comparing configurations for the same queries:\n");

    preset_configs()?;
    custom_configs()?;
    input_bounding()?;

    Ok(())
}

fn preset_configs() -> Result<(), Box<dyn std::error::Error>> {
    println!("Preset configurations for '11212':");

    // Defaults: 300 km radius, up to 3 ranked hits
    let default_config = SearchConfig::default();
    let hits = searcher_with(default_config.clone()).search("11212", None)?;
    println!(
        "  Default:   {} hits (radius: {} km)",
        hits.len(),
        default_config.single_geotarget_radius_m / 1000.0
    );

    // Focused preset keeps results tight and local
    let focused = SearchConfigBuilder::focused().build();
    let hits = searcher_with(focused.clone()).search("11212", None)?;
    println!(
        "  Focused:   {} hits (radius: {} km)",
        hits.len(),
        focused.single_geotarget_radius_m / 1000.0
    );

    // Expansive preset casts a wide net
    let expansive = SearchConfigBuilder::expansive().build();
    let hits = searcher_with(expansive.clone()).search("11212", None)?;
    println!(
        "  Expansive: {} hits (radius: {} km)",
        hits.len(),
        expansive.single_geotarget_radius_m / 1000.0
    );

    Ok(())
}

fn custom_configs() -> Result<(), Box<dyn std::error::Error>> {
    println!("\nCustom configurations:");

    // A 5 km radius drops everything outside the neighborhood
    let tight = SearchConfigBuilder::new().search_radius_km(5.0).build();
    let hits = searcher_with(tight).search("11212", None)?;
    println!("  5 km radius for '11212': {} hits", hits.len());

    // Broad searches (state roll calls, unions) obey their own limit
    let capped = SearchConfigBuilder::new().broad_result_limit(3).build();
    let hits = searcher_with(capped).search("new york", None)?;
    println!("  Broad limit 3 for 'new york': {} hits", hits.len());

    Ok(())
}

fn input_bounding() -> Result<(), Box<dyn std::error::Error>> {
    println!("\nInput length bounding:");

    // Oversized input is cut at a word boundary before parsing
    let config = SearchConfigBuilder::new().max_search_string_len(16).build();
    let searcher = searcher_with(config);
    let query = searcher.parse("brooklyn public library grand army plaza branch", None);
    println!("  normalized to: '{}'", query.normalized());

    Ok(())
}

fn searcher_with(config: SearchConfig) -> LibrarySearcher<MemoryDatastore> {
    LibrarySearcher::builder(MemoryDatastore::sample())
        .config(config)
        .build()
}
