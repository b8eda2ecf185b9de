use thiserror::Error;

use super::ProjectParams;
use crate::error::EstimatorError;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Project name must not be empty")]
    EmptyName,

    #[error("Area must be a positive number, got {0}")]
    NonPositiveArea(f64),

    #[error("Floors must be at least 1, got {0}")]
    NoFloors(u32),
}

impl ValidationError {
    /// Form field the error should be attached to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::NonPositiveArea(_) => "area",
            ValidationError::NoFloors(_) => "floors",
        }
    }
}

impl From<ValidationError> for EstimatorError {
    fn from(err: ValidationError) -> Self {
        EstimatorError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Field-level checks run before any calculation is attempted.
pub fn validate_project(project: &ProjectParams) -> Result<(), ValidationError> {
    if project.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !(project.area > 0.0) {
        return Err(ValidationError::NonPositiveArea(project.area));
    }
    if project.floors < 1 {
        return Err(ValidationError::NoFloors(project.floors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{ConstructionType, Currency};

    fn valid_project() -> ProjectParams {
        ProjectParams {
            name: "Lakeview Villa".to_string(),
            location: "Pune".to_string(),
            currency: Currency::Inr,
            area: 2400.0,
            construction_type: ConstructionType::Residential,
            floors: 2,
        }
    }

    #[test]
    fn test_valid_project_passes() {
        assert!(validate_project(&valid_project()).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut project = valid_project();
        project.name = "   ".to_string();
        let err = validate_project(&project).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_non_positive_area_rejected() {
        let mut project = valid_project();
        project.area = 0.0;
        let err = validate_project(&project).unwrap_err();
        assert_eq!(err.field(), "area");

        project.area = f64::NAN;
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn test_zero_floors_rejected() {
        let mut project = valid_project();
        project.floors = 0;
        assert_eq!(validate_project(&project).unwrap_err().field(), "floors");
    }
}
