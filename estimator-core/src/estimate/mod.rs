pub mod calculator;
pub mod validation;

pub use calculator::compute_breakdown;
pub use validation::validate_project;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionType {
    Residential,
    Commercial,
    Industrial,
    Infrastructure,
}

impl ConstructionType {
    /// Ballpark per-sqft rate used by the deterministic prediction fallback.
    pub fn base_rate(&self) -> f64 {
        match self {
            ConstructionType::Residential => 1800.0,
            ConstructionType::Commercial => 2400.0,
            ConstructionType::Industrial => 2100.0,
            ConstructionType::Infrastructure => 3200.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConstructionType::Residential => "Residential",
            ConstructionType::Commercial => "Commercial",
            ConstructionType::Industrial => "Industrial",
            ConstructionType::Infrastructure => "Infrastructure",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectParams {
    pub name: String,
    pub location: String,
    pub currency: Currency,
    pub area: f64,
    pub construction_type: ConstructionType,
    pub floors: u32,
}

/// Flat type + quantity multiplier (amount, count or area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeQuantity {
    pub kind: String,
    pub quantity: f64,
}

/// Two independent selectors, flat cost per combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoKeySelection {
    pub primary: String,
    pub secondary: String,
}

/// Two selectors plus a duration/area multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoKeyQuantity {
    pub primary: String,
    pub secondary: String,
    pub quantity: f64,
}

/// Worker headcount over a number of scheduled work days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewSelection {
    pub count: u32,
    pub days: f64,
}

/// Transportation: no catalog lookup, costed at a fixed per-km-trip rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaulSelection {
    pub distance_km: f64,
    pub trips: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialSelections {
    pub sand: Option<TypeQuantity>,
    pub cement: Option<TypeQuantity>,
    pub aggregate: Option<TypeQuantity>,
    pub steel: Option<TypeQuantity>,
    pub bricks: Option<TypeQuantity>,
    pub wood: Option<TypeQuantity>,
    pub paint: Option<TypeQuantity>,
    pub electrical: Option<TwoKeySelection>,
    pub plumbing: Option<TwoKeySelection>,
    pub fixtures: Option<TypeQuantity>,
    pub windows: Option<TypeQuantity>,
    pub doors: Option<TypeQuantity>,
    pub roofing: Option<TypeQuantity>,
    pub flooring: Option<TypeQuantity>,
    pub glasswork: Option<TypeQuantity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaborSelections {
    pub masons: Option<CrewSelection>,
    pub carpenters: Option<CrewSelection>,
    pub painters: Option<CrewSelection>,
    pub electricians: Option<CrewSelection>,
    pub plumbers: Option<CrewSelection>,
    pub helpers: Option<CrewSelection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverheadSelections {
    pub permits: Option<TwoKeySelection>,
    pub insurance: Option<TypeQuantity>,
    pub equipment: Option<TypeQuantity>,
    pub utilities: Option<TypeQuantity>,
    /// Quantity is the site area in sqft.
    pub site_preparation: Option<TwoKeyQuantity>,
    pub transportation: Option<HaulSelection>,
}

/// One computed cost line within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub key: String,
    pub amount: f64,
}

/// A group subtotal plus its line items, in catalog declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupBreakdown {
    pub items: Vec<CostItem>,
    pub total: f64,
}

impl GroupBreakdown {
    pub fn push(&mut self, key: &str, amount: f64) {
        self.items.push(CostItem {
            key: key.to_string(),
            amount,
        });
        self.total += amount;
    }

    pub fn get(&self, key: &str) -> f64 {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.amount)
            .unwrap_or(0.0)
    }
}

/// Immutable once computed; a new calculation replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub materials: GroupBreakdown,
    pub labor: GroupBreakdown,
    pub overhead: GroupBreakdown,
    pub total: f64,
}
