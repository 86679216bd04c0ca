//! Domain layer: patient input, feature encoding, prediction results and the
//! static content the application presents.

mod assessment;
pub mod education;
mod features;
pub mod guidance;
mod patient;

pub use assessment::{Assessment, PredictionResult};
pub use features::{EncodingTables, FeatureEncoder, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use guidance::{present, GuidanceLine, GuidanceTemplate, LineKind};
pub use patient::{
    Gender, PatientInput, SmokingHistory, ValidationError, AGE_MAX, BLOOD_GLUCOSE_MAX, BMI_MAX,
    HBA1C_MAX,
};
