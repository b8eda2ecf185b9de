use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use super::overrides::{CatalogOverrides, PriceTableOverride};

/// Unit prices for one cost category.
///
/// Flat categories key a single selector (material type, coverage tier)
/// straight to a unit price. Two-level categories have two independent
/// selectable dimensions, e.g. electrical components x wiring complexity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CategoryPricing {
    Flat(HashMap<String, f64>),
    TwoLevel(HashMap<String, HashMap<String, f64>>),
}

/// Read-only unit-price reference data, partitioned into materials, labor
/// and overhead. Labor is always a flat role -> day-rate mapping.
///
/// Lookups return `None` for unknown selectors; the catalog performs no
/// validation of selector freshness. Callers treat a miss as zero cost.
#[derive(Debug, Clone)]
pub struct PricingCatalog {
    materials: HashMap<String, CategoryPricing>,
    labor: HashMap<String, f64>,
    overhead: HashMap<String, CategoryPricing>,
}

fn flat(entries: &[(&str, f64)]) -> CategoryPricing {
    CategoryPricing::Flat(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
    )
}

fn two_level(entries: &[(&str, &[(&str, f64)])]) -> CategoryPricing {
    CategoryPricing::TwoLevel(
        entries
            .iter()
            .map(|(primary, secondary)| {
                (
                    primary.to_string(),
                    secondary
                        .iter()
                        .map(|(k, v)| (k.to_string(), *v))
                        .collect(),
                )
            })
            .collect(),
    )
}

impl PricingCatalog {
    pub fn new() -> Self {
        let mut materials = HashMap::new();

        // Bulk materials (per brass / bag / kg)
        materials.insert(
            "sand".to_string(),
            flat(&[("River Sand", 2500.0), ("M-Sand", 2200.0), ("Pit Sand", 1800.0)]),
        );
        materials.insert(
            "cement".to_string(),
            flat(&[("OPC 53 Grade", 420.0), ("OPC 43 Grade", 380.0), ("PPC", 350.0)]),
        );
        materials.insert(
            "aggregate".to_string(),
            flat(&[("20mm Crushed", 1900.0), ("40mm Crushed", 1700.0), ("Gravel", 1500.0)]),
        );
        materials.insert(
            "steel".to_string(),
            flat(&[("Fe 415 TMT", 62.0), ("Fe 500 TMT", 65.0), ("Fe 550 TMT", 68.0)]),
        );
        materials.insert(
            "bricks".to_string(),
            flat(&[("Red Clay Bricks", 9.0), ("Fly Ash Bricks", 7.5), ("Concrete Blocks", 28.0)]),
        );
        materials.insert(
            "wood".to_string(),
            flat(&[("Teak Wood", 2800.0), ("Sal Wood", 1600.0), ("Marine Plywood", 110.0)]),
        );
        materials.insert(
            "paint".to_string(),
            flat(&[("Distemper", 14.0), ("Emulsion", 28.0), ("Enamel", 35.0)]),
        );

        // Two-dimension categories: flat cost per combination
        materials.insert(
            "electrical".to_string(),
            two_level(&[
                (
                    "PVC Conduits",
                    &[
                        ("Basic Wiring", 9000.0),
                        ("Standard Wiring", 15000.0),
                        ("Premium Wiring", 24000.0),
                    ],
                ),
                (
                    "Metal Conduits",
                    &[
                        ("Basic Wiring", 14000.0),
                        ("Standard Wiring", 22000.0),
                        ("Premium Wiring", 34000.0),
                    ],
                ),
                (
                    "Concealed Conduits",
                    &[
                        ("Basic Wiring", 18000.0),
                        ("Standard Wiring", 28000.0),
                        ("Premium Wiring", 42000.0),
                    ],
                ),
            ]),
        );
        materials.insert(
            "plumbing".to_string(),
            two_level(&[
                ("PVC Pipes", &[("Basic", 8000.0), ("Standard", 13000.0), ("Premium", 20000.0)]),
                ("CPVC Pipes", &[("Basic", 11000.0), ("Standard", 17000.0), ("Premium", 26000.0)]),
                ("GI Pipes", &[("Basic", 15000.0), ("Standard", 23000.0), ("Premium", 34000.0)]),
            ]),
        );

        // Finishing (per piece / sqft)
        materials.insert(
            "fixtures".to_string(),
            flat(&[("Standard", 1200.0), ("Premium", 3500.0), ("Luxury", 8000.0)]),
        );
        materials.insert(
            "windows".to_string(),
            flat(&[("Aluminium", 4500.0), ("Wooden", 5800.0), ("UPVC", 6500.0)]),
        );
        materials.insert(
            "doors".to_string(),
            flat(&[("Flush Door", 3200.0), ("Panel Door", 5600.0), ("Solid Wood Door", 9500.0)]),
        );
        materials.insert(
            "roofing".to_string(),
            flat(&[("Metal Sheet", 95.0), ("Clay Tiles", 160.0), ("RCC Slab", 220.0)]),
        );
        materials.insert(
            "flooring".to_string(),
            flat(&[
                ("Ceramic Tiles", 55.0),
                ("Vitrified Tiles", 85.0),
                ("Granite", 180.0),
                ("Marble", 260.0),
            ]),
        );
        materials.insert(
            "glasswork".to_string(),
            flat(&[("Plain Glass", 90.0), ("Toughened Glass", 210.0), ("Double Glazed", 380.0)]),
        );

        // Labor day rates
        let labor: HashMap<String, f64> = [
            ("masons", 800.0),
            ("carpenters", 900.0),
            ("painters", 700.0),
            ("electricians", 950.0),
            ("plumbers", 900.0),
            ("helpers", 500.0),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

        let mut overhead = HashMap::new();
        overhead.insert(
            "permits".to_string(),
            two_level(&[
                (
                    "Residential Permit",
                    &[("Simple", 15000.0), ("Moderate", 30000.0), ("Complex", 60000.0)],
                ),
                (
                    "Commercial Permit",
                    &[("Simple", 35000.0), ("Moderate", 70000.0), ("Complex", 140000.0)],
                ),
                (
                    "Industrial Permit",
                    &[("Simple", 50000.0), ("Moderate", 100000.0), ("Complex", 200000.0)],
                ),
            ]),
        );
        overhead.insert(
            "insurance".to_string(),
            flat(&[("Basic Coverage", 2500.0), ("Comprehensive", 6000.0), ("All-Risk", 11000.0)]),
        );
        overhead.insert(
            "equipment".to_string(),
            flat(&[
                ("Light Tools", 8000.0),
                ("Mixers and Vibrators", 22000.0),
                ("Heavy Machinery", 90000.0),
            ]),
        );
        overhead.insert(
            "utilities".to_string(),
            flat(&[
                ("Temporary Connection", 4000.0),
                ("Metered Supply", 7000.0),
                ("Generator Backup", 15000.0),
            ]),
        );
        // Per-sqft rates, multiplied by site area at calculation time
        overhead.insert(
            "site_preparation".to_string(),
            two_level(&[
                ("Manual Clearing", &[("Level Ground", 12.0), ("Sloped", 18.0), ("Rocky", 30.0)]),
                (
                    "Mechanized Clearing",
                    &[("Level Ground", 8.0), ("Sloped", 13.0), ("Rocky", 22.0)],
                ),
            ]),
        );

        Self {
            materials,
            labor,
            overhead,
        }
    }

    pub fn material_price(&self, category: &str, kind: &str) -> Option<f64> {
        match self.materials.get(category)? {
            CategoryPricing::Flat(prices) => prices.get(kind).copied(),
            CategoryPricing::TwoLevel(_) => None,
        }
    }

    pub fn material_combo_price(&self, category: &str, primary: &str, secondary: &str) -> Option<f64> {
        match self.materials.get(category)? {
            CategoryPricing::TwoLevel(prices) => prices.get(primary)?.get(secondary).copied(),
            CategoryPricing::Flat(_) => None,
        }
    }

    pub fn day_rate(&self, role: &str) -> Option<f64> {
        self.labor.get(role).copied()
    }

    pub fn overhead_price(&self, category: &str, kind: &str) -> Option<f64> {
        match self.overhead.get(category)? {
            CategoryPricing::Flat(prices) => prices.get(kind).copied(),
            CategoryPricing::TwoLevel(_) => None,
        }
    }

    pub fn overhead_combo_price(&self, category: &str, primary: &str, secondary: &str) -> Option<f64> {
        match self.overhead.get(category)? {
            CategoryPricing::TwoLevel(prices) => prices.get(primary)?.get(secondary).copied(),
            CategoryPricing::Flat(_) => None,
        }
    }

    /// Merge price overrides into the seeded tables. Unknown categories are
    /// inserted as new flat or two-level tables.
    pub fn apply_overrides(&mut self, overrides: &CatalogOverrides) {
        merge_partition(&mut self.materials, &overrides.materials);
        for (role, rate) in &overrides.labor {
            self.labor.insert(role.clone(), *rate);
        }
        merge_partition(&mut self.overhead, &overrides.overhead);
    }
}

fn merge_partition(
    partition: &mut HashMap<String, CategoryPricing>,
    overrides: &HashMap<String, PriceTableOverride>,
) {
    for (category, table) in overrides {
        match (partition.get_mut(category), table) {
            (Some(CategoryPricing::Flat(prices)), PriceTableOverride::Flat(new_prices)) => {
                for (k, v) in new_prices {
                    prices.insert(k.clone(), *v);
                }
            }
            (Some(CategoryPricing::TwoLevel(prices)), PriceTableOverride::TwoLevel(new_prices)) => {
                for (primary, secondary) in new_prices {
                    let entry = prices.entry(primary.clone()).or_default();
                    for (k, v) in secondary {
                        entry.insert(k.clone(), *v);
                    }
                }
            }
            // Shape mismatch or new category: replace wholesale
            (_, PriceTableOverride::Flat(new_prices)) => {
                partition.insert(category.clone(), CategoryPricing::Flat(new_prices.clone()));
            }
            (_, PriceTableOverride::TwoLevel(new_prices)) => {
                partition.insert(category.clone(), CategoryPricing::TwoLevel(new_prices.clone()));
            }
        }
    }
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self::new()
    }
}
