/// Integration tests for the estimator core

#[cfg(test)]
mod tests {
    use estimator_core::ai::{AiClient, AiConfig};
    use estimator_core::catalog::PricingCatalog;
    use estimator_core::estimate::{
        ConstructionType, CrewSelection, Currency, LaborSelections, MaterialSelections,
        OverheadSelections, ProjectParams, TwoKeySelection, TypeQuantity,
    };
    use estimator_core::report::render_report;
    use estimator_core::session::EstimatorState;
    use estimator_core::storage::{ProjectRecord, ProjectStore};
    use std::path::PathBuf;

    fn sample_project() -> ProjectParams {
        ProjectParams {
            name: "Hillside Duplex".to_string(),
            location: "Pune".to_string(),
            currency: Currency::Inr,
            area: 2200.0,
            construction_type: ConstructionType::Residential,
            floors: 2,
        }
    }

    fn sample_state() -> EstimatorState {
        EstimatorState::new(sample_project())
            .with_materials(MaterialSelections {
                sand: Some(TypeQuantity {
                    kind: "River Sand".to_string(),
                    quantity: 12.0,
                }),
                cement: Some(TypeQuantity {
                    kind: "OPC 53 Grade".to_string(),
                    quantity: 450.0,
                }),
                steel: Some(TypeQuantity {
                    kind: "Fe 500 TMT".to_string(),
                    quantity: 5000.0,
                }),
                electrical: Some(TwoKeySelection {
                    primary: "PVC Conduits".to_string(),
                    secondary: "Standard Wiring".to_string(),
                }),
                ..Default::default()
            })
            .with_labor(LaborSelections {
                masons: Some(CrewSelection {
                    count: 5,
                    days: 40.0,
                }),
                helpers: Some(CrewSelection {
                    count: 10,
                    days: 40.0,
                }),
                ..Default::default()
            })
            .with_overhead(OverheadSelections {
                permits: Some(TwoKeySelection {
                    primary: "Residential Permit".to_string(),
                    secondary: "Complex".to_string(),
                }),
                equipment: Some(TypeQuantity {
                    kind: "Heavy Machinery".to_string(),
                    quantity: 3.0,
                }),
                ..Default::default()
            })
    }

    #[test]
    fn test_estimate_and_optimize_flow() {
        let catalog = PricingCatalog::new();
        let state = sample_state().calculate(&catalog).unwrap();

        let breakdown = state.breakdown.as_ref().unwrap();
        let expected =
            breakdown.materials.total + breakdown.labor.total + breakdown.overhead.total;
        assert!((breakdown.total - expected).abs() < 1e-9);
        assert!(breakdown.total > 0.0);

        let optimized = state.optimize_rules().unwrap();
        let result = optimized.optimization.as_ref().unwrap();
        assert!(!result.suggestions.is_empty());
        assert!(result.suggestions.len() <= 5);
        assert!(result.optimized_total >= breakdown.total * 0.6);

        let report = render_report(
            &optimized.project,
            optimized.breakdown.as_ref().unwrap(),
            optimized.optimization.as_ref(),
        );
        assert!(report.contains("Hillside Duplex"));
        assert!(report.contains("GRAND TOTAL"));
    }

    #[tokio::test]
    async fn test_ai_path_degrades_to_five_fallback_suggestions() {
        let catalog = PricingCatalog::new();
        let state = sample_state().calculate(&catalog).unwrap();

        // Unreachable endpoint with a short timeout: the adapter must degrade
        let client = AiClient::new(AiConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            api_key: Some("test-key".to_string()),
            timeout: std::time::Duration::from_millis(500),
            ..Default::default()
        });
        let optimized = state.optimize_ai(&client).await.unwrap();
        let result = optimized.optimization.as_ref().unwrap();
        assert_eq!(result.suggestions.len(), 5);
        assert!(result.suggestions.iter().all(|s| s.potential_savings >= 0.0));
    }

    #[tokio::test]
    async fn test_project_store_crud() {
        let store = ProjectStore::new(PathBuf::from(":memory:")).await.unwrap();

        let catalog = PricingCatalog::new();
        let state = sample_state().calculate(&catalog).unwrap();
        let mut record = ProjectRecord::new(
            Some("owner@example.com".to_string()),
            state.project.clone(),
            state.breakdown.clone(),
        );

        store.insert(&record).await.unwrap();

        let loaded = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(loaded.project.name, "Hillside Duplex");
        assert_eq!(
            loaded.breakdown.as_ref().unwrap().total,
            state.breakdown.as_ref().unwrap().total
        );

        record.project.name = "Hillside Duplex Phase 2".to_string();
        store.update(&record).await.unwrap();
        let reloaded = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(reloaded.project.name, "Hillside Duplex Phase 2");

        store.delete(record.id).await.unwrap();
        assert!(store.get(record.id).await.unwrap().is_none());
    }
}
