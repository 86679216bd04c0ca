//! End-to-end assessment over JSON artifacts on disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use diascan::adapters::{CachingArtifactStore, JsonArtifactStore};
use diascan::application::AssessmentService;
use diascan::domain::{
    guidance, FeatureEncoder, Gender, PatientInput, PredictionResult, SmokingHistory,
    ValidationError,
};
use diascan::ports::{ArtifactError, ArtifactStore};
use diascan::DiascanError;
use tempfile::{tempdir, TempDir};

const MODEL_JSON: &str = include_str!("../models/model.json");
const SCALER_JSON: &str = include_str!("../models/scaler.json");

fn artifacts() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let model = dir.path().join("model.json");
    let scaler = dir.path().join("scaler.json");
    std::fs::write(&model, MODEL_JSON).expect("write model");
    std::fs::write(&scaler, SCALER_JSON).expect("write scaler");
    (dir, model, scaler)
}

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

fn healthy() -> PatientInput {
    PatientInput {
        gender: Some(Gender::Female),
        age: 30.0,
        hypertension: false,
        heart_disease: false,
        smoking_history: Some(SmokingHistory::Never),
        bmi: 22.0,
        hba1c: 5.0,
        blood_glucose: 100,
    }
}

#[test]
fn scenario_a_encodes_scales_and_predicts() {
    let encoded = FeatureEncoder::encode(&scenario_a()).expect("Should encode");
    assert_eq!(
        encoded.into_inner(),
        [1.0, 45.0, 1.0, 0.0, 2.0, 28.5, 6.8, 150.0]
    );

    let (_dir, model, scaler) = artifacts();
    let service = AssessmentService::new(JsonArtifactStore::new(), &model, &scaler);
    let assessment = service.assess(&scenario_a()).expect("Should assess");

    assert!(assessment.result.class() <= 1);
    assert_eq!(assessment.result, PredictionResult::HigherRisk);

    let rendered = guidance::present(assessment.result).to_lines();
    assert_eq!(rendered[0].text, "Higher Risk Detected");
}

#[test]
fn lower_risk_profile_gets_lower_risk_guidance() {
    let (_dir, model, scaler) = artifacts();
    let service = AssessmentService::new(JsonArtifactStore::new(), &model, &scaler);
    let assessment = service.assess(&healthy()).expect("Should assess");

    assert_eq!(assessment.result, PredictionResult::LowerRisk);
    let rendered = guidance::present(assessment.result).to_lines();
    assert_eq!(rendered[0].text, "Lower Risk Detected");
}

#[test]
fn identical_submissions_give_identical_results() {
    let (_dir, model, scaler) = artifacts();
    let service = AssessmentService::new(JsonArtifactStore::new(), &model, &scaler);
    let results: Vec<PredictionResult> = (0..5)
        .map(|_| service.assess(&scenario_a()).expect("Should assess").result)
        .collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn missing_model_is_an_artifact_error() {
    let (dir, _model, scaler) = artifacts();
    let service = AssessmentService::new(
        JsonArtifactStore::new(),
        dir.path().join("absent.json"),
        &scaler,
    );
    let err = service.assess(&scenario_a()).expect_err("Should fail");
    assert!(matches!(
        err,
        DiascanError::Artifact(ArtifactError::NotFound(_))
    ));
}

#[test]
fn cached_store_matches_uncached_and_sees_replacements() {
    let (_dir, model, scaler) = artifacts();
    let plain = AssessmentService::new(JsonArtifactStore::new(), &model, &scaler);
    let cached = AssessmentService::new(
        CachingArtifactStore::new(JsonArtifactStore::new()),
        &model,
        &scaler,
    );

    for input in [scenario_a(), healthy()] {
        assert_eq!(
            plain.assess(&input).expect("plain").result,
            cached.assess(&input).expect("cached").result
        );
    }

    // Swap in a model that always says "higher risk"; the cache must notice.
    let always_high = r#"{
        "kind": "linear",
        "coefficients": [0, 0, 0, 0, 0, 0, 0, 0],
        "intercept": 5.0
    }"#;
    std::fs::write(&model, always_high).expect("rewrite model");
    assert_eq!(
        cached.assess(&healthy()).expect("cached").result,
        PredictionResult::HigherRisk
    );
}

/// Counts loads and never touches the filesystem.
#[derive(Default)]
struct CountingStore {
    loads: AtomicUsize,
}

impl ArtifactStore for CountingStore {
    type Scaler = diascan::adapters::json::StandardScalerArtifact;
    type Model = diascan::adapters::json::ModelArtifact;

    fn load_scaler(&self, path: &Path) -> Result<Self::Scaler, ArtifactError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Err(ArtifactError::NotFound(path.to_path_buf()))
    }

    fn load_model(&self, path: &Path) -> Result<Self::Model, ArtifactError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Err(ArtifactError::NotFound(path.to_path_buf()))
    }
}

#[test]
fn scenario_b_missing_gender_never_loads_artifacts() {
    let service = AssessmentService::new(CountingStore::default(), "model.json", "scaler.json");
    let input = PatientInput {
        gender: None,
        ..scenario_a()
    };

    let err = service.assess(&input).expect_err("Should reject");
    assert!(matches!(
        err,
        DiascanError::Validation(ValidationError::Missing("Gender"))
    ));
    assert_eq!(
        err.to_string(),
        "Please fill in all fields before submitting: Gender is required"
    );
    assert_eq!(service.store().loads.load(Ordering::SeqCst), 0);
}
