use serde::{Deserialize, Serialize};

use crate::ai::AiClient;
use crate::catalog::PricingCatalog;
use crate::error::{EstimatorError, Result};
use crate::estimate::{
    compute_breakdown, validate_project, CostBreakdown, LaborSelections, MaterialSelections,
    OverheadSelections, ProjectParams,
};
use crate::optimize::{generate_suggestions, OptimizationResult};

/// One estimation session's state as an immutable snapshot.
///
/// Every input mutation produces a new state value with the derived
/// breakdown and optimization cleared, so stale derived data can never be
/// shown against new inputs. Derived fields are only ever attached by
/// `calculate` and the `optimize_*` methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorState {
    pub project: ProjectParams,
    pub materials: MaterialSelections,
    pub labor: LaborSelections,
    pub overhead: OverheadSelections,
    pub breakdown: Option<CostBreakdown>,
    pub optimization: Option<OptimizationResult>,
}

impl EstimatorState {
    pub fn new(project: ProjectParams) -> Self {
        Self {
            project,
            materials: MaterialSelections::default(),
            labor: LaborSelections::default(),
            overhead: OverheadSelections::default(),
            breakdown: None,
            optimization: None,
        }
    }

    fn invalidated(mut self) -> Self {
        self.breakdown = None;
        self.optimization = None;
        self
    }

    pub fn with_project(mut self, project: ProjectParams) -> Self {
        self.project = project;
        self.invalidated()
    }

    pub fn with_materials(mut self, materials: MaterialSelections) -> Self {
        self.materials = materials;
        self.invalidated()
    }

    pub fn with_labor(mut self, labor: LaborSelections) -> Self {
        self.labor = labor;
        self.invalidated()
    }

    pub fn with_overhead(mut self, overhead: OverheadSelections) -> Self {
        self.overhead = overhead;
        self.invalidated()
    }

    /// Validate the project parameters and attach a freshly computed
    /// breakdown. Validation failures carry the offending field; the caller
    /// keeps its previous state value, so an earlier breakdown is never
    /// replaced by a partial result.
    pub fn calculate(&self, catalog: &PricingCatalog) -> Result<Self> {
        validate_project(&self.project)?;

        let breakdown = compute_breakdown(
            &self.project,
            &self.materials,
            &self.labor,
            &self.overhead,
            catalog,
        );
        tracing::info!(
            project = %self.project.name,
            total = breakdown.total,
            "breakdown computed"
        );

        let mut next = self.clone();
        next.breakdown = Some(breakdown);
        next.optimization = None;
        Ok(next)
    }

    /// Run the deterministic rule engine against the current breakdown.
    pub fn optimize_rules(&self) -> Result<Self> {
        let breakdown = self.breakdown.as_ref().ok_or(EstimatorError::BreakdownMissing)?;

        let suggestions =
            generate_suggestions(breakdown, &self.materials, &self.labor, &self.overhead);
        let result = OptimizationResult::assemble(breakdown.total, suggestions);
        tracing::info!(
            suggestions = result.suggestions.len(),
            potential_savings = result.potential_savings,
            "rule-based optimization complete"
        );

        let mut next = self.clone();
        next.optimization = Some(result);
        Ok(next)
    }

    /// Run the AI-enriched optimization path. The adapter degrades to the
    /// deterministic fallback internally, so this only errors when no
    /// breakdown has been calculated yet.
    pub async fn optimize_ai(&self, client: &AiClient) -> Result<Self> {
        let breakdown = self.breakdown.as_ref().ok_or(EstimatorError::BreakdownMissing)?;

        let suggestions = client.request_optimizations(&self.project, breakdown).await;
        let result = OptimizationResult::assemble(breakdown.total, suggestions);

        let mut next = self.clone();
        next.optimization = Some(result);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{ConstructionType, CrewSelection, Currency, TypeQuantity};

    fn project() -> ProjectParams {
        ProjectParams {
            name: "Session Test".to_string(),
            location: "Pune".to_string(),
            currency: Currency::Inr,
            area: 1200.0,
            construction_type: ConstructionType::Residential,
            floors: 1,
        }
    }

    fn calculated_state() -> EstimatorState {
        let catalog = PricingCatalog::new();
        EstimatorState::new(project())
            .with_materials(MaterialSelections {
                cement: Some(TypeQuantity {
                    kind: "OPC 53 Grade".to_string(),
                    quantity: 300.0,
                }),
                ..Default::default()
            })
            .with_labor(LaborSelections {
                masons: Some(CrewSelection {
                    count: 5,
                    days: 40.0,
                }),
                ..Default::default()
            })
            .calculate(&catalog)
            .unwrap()
    }

    #[test]
    fn test_optimize_before_calculate_is_rejected() {
        let state = EstimatorState::new(project());
        let err = state.optimize_rules().unwrap_err();
        assert!(matches!(err, EstimatorError::BreakdownMissing));
    }

    #[test]
    fn test_input_mutation_clears_derived_data() {
        let state = calculated_state().optimize_rules().unwrap();
        assert!(state.breakdown.is_some());
        assert!(state.optimization.is_some());

        let mutated = state.with_labor(LaborSelections {
            masons: Some(CrewSelection {
                count: 3,
                days: 20.0,
            }),
            ..Default::default()
        });
        assert!(mutated.breakdown.is_none());
        assert!(mutated.optimization.is_none());
    }

    #[test]
    fn test_recalculation_clears_stale_optimization() {
        let state = calculated_state().optimize_rules().unwrap();
        let catalog = PricingCatalog::new();
        let recalculated = state.calculate(&catalog).unwrap();
        assert!(recalculated.breakdown.is_some());
        assert!(recalculated.optimization.is_none());
    }

    #[test]
    fn test_validation_failure_leaves_caller_state_untouched() {
        let state = calculated_state();
        let broken = EstimatorState {
            project: ProjectParams {
                name: String::new(),
                ..project()
            },
            ..state.clone()
        };
        let err = broken.calculate(&PricingCatalog::new()).unwrap_err();
        assert!(matches!(err, EstimatorError::Validation { ref field, .. } if field == "name"));
        // The previous snapshot still carries its breakdown
        assert!(state.breakdown.is_some());
    }

    #[test]
    fn test_optimization_attached_with_clamped_total() {
        let state = calculated_state().optimize_rules().unwrap();
        let optimization = state.optimization.unwrap();
        let breakdown = state.breakdown.unwrap();
        assert!(optimization.optimized_total >= breakdown.total * 0.6);
        assert!(optimization.optimized_total <= breakdown.total);
    }
}
