//! Patient attributes collected by the risk assessment form.

use serde::{Deserialize, Serialize};

/// Upper bound accepted for age in years.
pub const AGE_MAX: f64 = 200.0;

/// Upper bound accepted for body mass index.
pub const BMI_MAX: f64 = 100.0;

/// Upper bound accepted for HbA1c in percent.
pub const HBA1C_MAX: f64 = 20.0;

/// Upper bound accepted for blood glucose in mg/dL.
pub const BLOOD_GLUCOSE_MAX: u32 = 1000;

/// Reasons a submitted form cannot be turned into a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields before submitting: {0} is required")]
    Missing(&'static str),

    #[error("Please fill in all fields before submitting: {0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{field}: value must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{0}: invalid number")]
    InvalidNumber(&'static str),
}

/// Gender as recorded in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    /// Present in the training labels but not offered by the form.
    Other,
}

impl Gender {
    /// Choices offered by the form, in display order.
    pub const FORM_CHOICES: [Gender; 2] = [Gender::Female, Gender::Male];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::Other => "Other",
        }
    }
}

/// Smoking history category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingHistory {
    Never,
    NotCurrent,
    Former,
    Current,
}

impl SmokingHistory {
    /// Choices offered by the form, in display order.
    pub const FORM_CHOICES: [SmokingHistory; 4] = [
        SmokingHistory::Never,
        SmokingHistory::NotCurrent,
        SmokingHistory::Former,
        SmokingHistory::Current,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::NotCurrent => "Not Current",
            Self::Former => "Former",
            Self::Current => "Current",
        }
    }
}

/// One form submission.
///
/// Categorical fields stay `None` until the user picks a value; numeric fields
/// default to zero like the form widgets do. Nothing here is validated until
/// the encoder runs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatientInput {
    pub gender: Option<Gender>,
    /// Age in years
    pub age: f64,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub smoking_history: Option<SmokingHistory>,
    /// Body mass index
    pub bmi: f64,
    /// Glycated haemoglobin in percent
    pub hba1c: f64,
    /// Blood glucose in mg/dL
    pub blood_glucose: u32,
}

impl PatientInput {
    /// Check that every field is set, strictly positive and within the bounds
    /// of the form, returning the resolved categorical values.
    ///
    /// # Errors
    /// Returns the first failing field, checked in form order.
    pub fn validate(&self) -> Result<(Gender, SmokingHistory), ValidationError> {
        let gender = self.gender.ok_or(ValidationError::Missing("Gender"))?;
        let smoking = self
            .smoking_history
            .ok_or(ValidationError::Missing("Smoking History"))?;

        check_measure("Age", self.age, AGE_MAX)?;
        check_measure("BMI", self.bmi, BMI_MAX)?;
        check_measure("HbA1c Level", self.hba1c, HBA1C_MAX)?;
        check_measure(
            "Blood Glucose Level",
            f64::from(self.blood_glucose),
            f64::from(BLOOD_GLUCOSE_MAX),
        )?;

        Ok((gender, smoking))
    }
}

fn check_measure(field: &'static str, value: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber(field));
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    if value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min: 0.0,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PatientInput {
        PatientInput {
            gender: Some(Gender::Female),
            age: 38.0,
            hypertension: false,
            heart_disease: false,
            smoking_history: Some(SmokingHistory::Never),
            bmi: 22.4,
            hba1c: 5.1,
            blood_glucose: 95,
        }
    }

    #[test]
    fn test_complete_input_is_valid() {
        let (gender, smoking) = complete().validate().expect("Should validate");
        assert_eq!(gender, Gender::Female);
        assert_eq!(smoking, SmokingHistory::Never);
    }

    #[test]
    fn test_unset_categoricals_rejected() {
        let mut input = complete();
        input.gender = None;
        assert_eq!(input.validate(), Err(ValidationError::Missing("Gender")));

        let mut input = complete();
        input.smoking_history = None;
        assert_eq!(
            input.validate(),
            Err(ValidationError::Missing("Smoking History"))
        );
    }

    #[test]
    fn test_zero_measures_rejected() {
        let cases: [(&'static str, fn(&mut PatientInput)); 4] = [
            ("Age", |p| p.age = 0.0),
            ("BMI", |p| p.bmi = 0.0),
            ("HbA1c Level", |p| p.hba1c = 0.0),
            ("Blood Glucose Level", |p| p.blood_glucose = 0),
        ];

        for (field, zero_out) in cases {
            let mut input = complete();
            zero_out(&mut input);
            assert_eq!(input.validate(), Err(ValidationError::NotPositive(field)));
        }
    }

    #[test]
    fn test_upper_bounds() {
        let mut input = complete();
        input.age = 200.0;
        assert!(input.validate().is_ok());

        input.age = 200.5;
        assert!(matches!(
            input.validate(),
            Err(ValidationError::OutOfRange { field: "Age", .. })
        ));

        let mut input = complete();
        input.blood_glucose = 1001;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let mut input = complete();
        input.bmi = f64::NAN;
        assert_eq!(input.validate(), Err(ValidationError::InvalidNumber("BMI")));
    }
}
