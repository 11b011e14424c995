//! Brand dictionary.
//!
//! Vehicle makes carry a `make` link so compatibility resolution can tie a
//! brand hit to a manufacturer; part-manufacturer entries do not.

use partlex_domain::BrandEntry;

/// All curated brand entries
pub fn entries() -> Vec<BrandEntry> {
    vec![
        // Vehicle makes
        BrandEntry::new("Sachs", ["fichtel & sachs", "f&s"]).with_make("Sachs"),
        BrandEntry::new("MCB", ["monark crescent"]).with_make("MCB"),
        BrandEntry::new("Baotian", ["bt49qt"]).with_make("Baotian"),
        BrandEntry::named("Kymco").with_make("Kymco"),
        BrandEntry::named("Honda").with_make("Honda"),
        BrandEntry::named("Yamaha").with_make("Yamaha"),
        BrandEntry::named("Suzuki").with_make("Suzuki"),
        BrandEntry::named("Puch").with_make("Puch"),
        BrandEntry::new("Zündapp", ["zundapp", "zuendapp"]).with_make("Zündapp"),
        BrandEntry::named("Kreidler").with_make("Kreidler"),
        BrandEntry::named("Tomos").with_make("Tomos"),
        BrandEntry::named("Peugeot").with_make("Peugeot"),
        BrandEntry::named("Piaggio").with_make("Piaggio"),
        // Engine families
        BrandEntry::new("GY6", ["139qmb"]),
        BrandEntry::named("Minarelli"),
        BrandEntry::new("Morini", ["franco morini"]),
        // Part manufacturers
        BrandEntry::named("Naraku"),
        BrandEntry::named("Airsal"),
        BrandEntry::named("Polini"),
        BrandEntry::named("Malossi"),
        BrandEntry::new("Dellorto", ["dell'orto", "dell orto"]),
        BrandEntry::named("NGK"),
        BrandEntry::named("Bosch"),
        BrandEntry::named("Athena"),
        BrandEntry::named("Doppler"),
    ]
}
