//! Feature encoding for the diabetes classifier.
//!
//! The offline model was trained on eight columns in a fixed order. Nothing at
//! runtime can detect a reordering, so the order lives in exactly one place:
//! [`FEATURE_NAMES`] and [`FeatureEncoder::encode`] must stay in lockstep.

use std::ops::Index;

use serde::Serialize;

use super::patient::{Gender, PatientInput, SmokingHistory, ValidationError};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 8;

/// Column names, in training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "age",
    "hypertension",
    "heart_disease",
    "smoking_history",
    "bmi",
    "HbA1c_level",
    "blood_glucose_level",
];

/// Fixed-order numeric encoding of one patient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Categorical codes used by the training labels.
///
/// The smoking codes skip 1 and 4. They come from the original label encoding
/// and the trained artifact depends on them; do not renumber without retraining.
pub struct EncodingTables;

impl EncodingTables {
    #[must_use]
    pub fn gender_code(gender: Gender) -> f64 {
        match gender {
            Gender::Female => 0.0,
            Gender::Male => 1.0,
            Gender::Other => 2.0,
        }
    }

    #[must_use]
    pub fn smoking_code(smoking: SmokingHistory) -> f64 {
        match smoking {
            SmokingHistory::Never => 0.0,
            SmokingHistory::Current => 2.0,
            SmokingHistory::Former => 3.0,
            SmokingHistory::NotCurrent => 5.0,
        }
    }
}

/// Maps validated form input onto the model's feature layout.
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Encode a submission.
    ///
    /// # Errors
    /// Returns `ValidationError` if a categorical field is unset or a
    /// measurement is not strictly positive.
    pub fn encode(input: &PatientInput) -> Result<FeatureVector, ValidationError> {
        let (gender, smoking) = input.validate()?;

        Ok(FeatureVector([
            EncodingTables::gender_code(gender),
            input.age,
            flag(input.hypertension),
            flag(input.heart_disease),
            EncodingTables::smoking_code(smoking),
            input.bmi,
            input.hba1c,
            f64::from(input.blood_glucose),
        ]))
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> PatientInput {
        PatientInput {
            gender: Some(Gender::Male),
            age: 45.0,
            hypertension: true,
            heart_disease: false,
            smoking_history: Some(SmokingHistory::Current),
            bmi: 28.5,
            hba1c: 6.8,
            blood_glucose: 150,
        }
    }

    #[test]
    fn test_encode_matches_training_order() {
        let vector = FeatureEncoder::encode(&scenario_a()).expect("Should encode");
        assert_eq!(
            vector.into_inner(),
            [1.0, 45.0, 1.0, 0.0, 2.0, 28.5, 6.8, 150.0]
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let input = scenario_a();
        let first = FeatureEncoder::encode(&input).expect("Should encode");
        let second = FeatureEncoder::encode(&input).expect("Should encode");
        assert_eq!(first, second);
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(EncodingTables::gender_code(Gender::Female), 0.0);
        assert_eq!(EncodingTables::gender_code(Gender::Male), 1.0);
        assert_eq!(EncodingTables::gender_code(Gender::Other), 2.0);
    }

    #[test]
    fn test_smoking_codes_are_not_contiguous() {
        let codes: Vec<f64> = SmokingHistory::FORM_CHOICES
            .iter()
            .map(|s| EncodingTables::smoking_code(*s))
            .collect();
        // Form order: Never, Not Current, Former, Current
        assert_eq!(codes, vec![0.0, 5.0, 3.0, 2.0]);
    }

    #[test]
    fn test_booleans_become_flags() {
        let mut input = scenario_a();
        input.hypertension = false;
        input.heart_disease = true;
        let vector = FeatureEncoder::encode(&input).expect("Should encode");
        assert_eq!(vector[2], 0.0);
        assert_eq!(vector[3], 1.0);
    }

    #[test]
    fn test_missing_gender_fails() {
        let mut input = scenario_a();
        input.gender = None;
        assert_eq!(
            FeatureEncoder::encode(&input),
            Err(ValidationError::Missing("Gender"))
        );
    }

    #[test]
    fn test_feature_names_cover_vector() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_NAMES[0], "gender");
        assert_eq!(FEATURE_NAMES[FEATURE_COUNT - 1], "blood_glucose_level");
    }
}
