//! Fixed guidance shown after a prediction.

use super::assessment::PredictionResult;

/// One numbered next step with its bullet points.
#[derive(Debug)]
pub struct GuidanceStep {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

/// A complete guidance block.
#[derive(Debug)]
pub struct GuidanceTemplate {
    pub heading: &'static str,
    pub disclaimer: Option<&'static str>,
    pub summary: &'static str,
    pub steps: &'static [GuidanceStep],
}

pub static HIGHER_RISK_GUIDANCE: GuidanceTemplate = GuidanceTemplate {
    heading: "Higher Risk Detected",
    disclaimer: Some(
        "Disclaimer: This result is an estimate of your diabetes risk. Please consult a doctor for medical advice and regular check-ups.",
    ),
    summary: "Based on the provided information, you may have an elevated risk of developing diabetes.",
    steps: &[
        GuidanceStep {
            title: "Consult a Healthcare Professional",
            items: &["Schedule an appointment with a doctor for further testing."],
        },
        GuidanceStep {
            title: "Implement Lifestyle Changes",
            items: &[
                "Lose Extra Weight: Aim to lose 7% to 10% of body weight if overweight. Set realistic goals for gradual weight loss (1-2 pounds per week).",
                "Increase Physical Activity: Engage in at least 150 minutes of moderate aerobic exercise weekly such as brisk walk, swimming, biking or running, and incorporate strength training exercises at least 2-3 times a week.",
            ],
        },
        GuidanceStep {
            title: "Adopt a Healthy Diet",
            items: &[
                "Focus on a diet rich in fruits, vegetables, whole grains, and lean proteins.",
                "Avoid processed foods, sugary beverages, and unhealthy fats",
            ],
        },
    ],
};

pub static LOWER_RISK_GUIDANCE: GuidanceTemplate = GuidanceTemplate {
    heading: "Lower Risk Detected",
    disclaimer: None,
    summary: "Based on the provided information, your risk of developing diabetes appears to be lower.",
    steps: &[
        GuidanceStep {
            title: "Stay Physically Active",
            items: &["Maintain a routine of regular exercise, aiming for at least 150 minutes of moderate aerobic activity weekly, and include strength training."],
        },
        GuidanceStep {
            title: "Regular Health Check-ups",
            items: &["Schedule regular check-ups with your doctor to keep track of your health status."],
        },
        GuidanceStep {
            title: "Eat a Balanced Diet",
            items: &[
                "Keep a diet rich in whole, unprocessed foods, with a focus on fiber-rich fruits, vegetables, and healthy fats.",
                "Limit sugar and refined carbohydrates.",
            ],
        },
    ],
};

/// Pick the guidance for a prediction.
#[must_use]
pub fn present(result: PredictionResult) -> &'static GuidanceTemplate {
    match result {
        PredictionResult::HigherRisk => &HIGHER_RISK_GUIDANCE,
        PredictionResult::LowerRisk => &LOWER_RISK_GUIDANCE,
    }
}

/// Role of a rendered guidance line, used by front ends to style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Disclaimer,
    Summary,
    /// The "Recommended Next Steps:" caption
    Section,
    Step,
    Item,
}

/// One line of rendered guidance text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidanceLine {
    pub kind: LineKind,
    pub text: String,
}

impl GuidanceLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl GuidanceTemplate {
    /// Verbatim rendering, one line per element.
    #[must_use]
    pub fn to_lines(&self) -> Vec<GuidanceLine> {
        let mut lines = vec![GuidanceLine::new(LineKind::Heading, self.heading)];
        if let Some(disclaimer) = self.disclaimer {
            lines.push(GuidanceLine::new(LineKind::Disclaimer, disclaimer));
        }
        lines.push(GuidanceLine::new(LineKind::Summary, self.summary));
        lines.push(GuidanceLine::new(LineKind::Section, "Recommended Next Steps:"));
        for (i, step) in self.steps.iter().enumerate() {
            lines.push(GuidanceLine::new(
                LineKind::Step,
                format!("{}. {}", i + 1, step.title),
            ));
            for item in step.items {
                lines.push(GuidanceLine::new(LineKind::Item, format!("   • {item}")));
            }
        }
        lines
    }
}
