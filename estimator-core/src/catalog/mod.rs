pub mod pricing;
pub mod overrides;

pub use pricing::{CategoryPricing, PricingCatalog};
pub use overrides::CatalogOverrides;
