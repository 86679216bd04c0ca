//! Static educational material and the statistics behind the dashboard charts.

/// A bullet point, optionally with nested sub-points.
#[derive(Debug)]
pub struct Bullet {
    pub text: &'static str,
    pub children: &'static [&'static str],
}

const fn bullet(text: &'static str) -> Bullet {
    Bullet {
        text,
        children: &[],
    }
}

#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
    pub bullets: &'static [Bullet],
}

/// Headline figure for the global statistics circles.
#[derive(Debug)]
pub struct HeadlineStat {
    pub figure: &'static str,
    pub caption: &'static str,
}

/// A labelled percentage used by the dashboard charts.
#[derive(Debug, Clone, Copy)]
pub struct Share {
    pub label: &'static str,
    pub percent: f64,
}

pub static WHAT_IS_DIABETES: Section = Section {
    title: "What is Diabetes?",
    paragraphs: &["Diabetes is a chronic, metabolic disease characterized by elevated levels of blood glucose (or blood sugar), which leads over time to serious damage to the heart, blood vessels, eyes, kidneys, and nerves."],
    bullets: &[],
};

pub static DIABETES_TYPES: [Section; 3] = [
    Section {
        title: "Type 1 Diabetes",
        paragraphs: &[],
        bullets: &[
            bullet("Type 1 diabetes was previously called juvenile diabetes."),
            bullet("It occurs when the immune system targets and destroys insulin-producing beta cells in the pancreas."),
            Bullet {
                text: "This leads to an insulin deficiency, a hormone critical for:",
                children: &["Allowing glucose to enter cells.", "Providing cells with energy."],
            },
            Bullet {
                text: "Currently, type 1 diabetes:",
                children: &[
                    "Cannot be prevented.",
                    "Has no cure.",
                    "Requires daily insulin prescriptions.",
                ],
            },
            Bullet {
                text: "Risk factors for type 1 diabetes include:",
                children: &["Family history of diabetes.", "Certain genetic factors."],
            },
            bullet("Anyone can be diagnosed with type 1 diabetes, regardless of lifestyle, fitness level, or body weight."),
        ],
    },
    Section {
        title: "Type 2 Diabetes",
        paragraphs: &[],
        bullets: &[
            bullet("Type 2 diabetes typically develops in adulthood."),
            Bullet {
                text: "Unlike type 1 diabetes, where the body doesn't produce enough insulin:",
                children: &[
                    "Type 2 diabetes occurs when the body continues to make insulin but is unable to use it effectively, a condition called insulin resistance.",
                    "Over time, the demand for insulin overwhelms the pancreas' ability to produce it, leading to an insulin deficiency.",
                ],
            },
            Bullet {
                text: "It is a persistent medical condition that results in:",
                children: &[
                    "Excessive blood sugar levels.",
                    "Potential complications affecting the heart, nerves, and immune system.",
                ],
            },
            Bullet {
                text: "Risk factors for developing type 2 diabetes include:",
                children: &[
                    "Family history of diabetes.",
                    "Obesity.",
                    "A sedentary lifestyle.",
                    "A poor diet.",
                    "Certain ethnicities.",
                ],
            },
        ],
    },
    Section {
        title: "Gestational Diabetes",
        paragraphs: &[],
        bullets: &[
            bullet("Gestational diabetes is a temporary form of diabetes that develops during pregnancy."),
            bullet("Similar to other diabetes types, it alters the body's glucose metabolism."),
            bullet("Excessive blood sugar levels can harm both maternal and fetal health."),
            Bullet {
                text: "Gestational diabetes typically resolves after childbirth but:",
                children: &["It significantly increases the risk of developing type 2 diabetes later in life."],
            },
        ],
    },
];

pub static SYMPTOMS: Section = Section {
    title: "Symptoms",
    paragraphs: &[
        "Diabetes symptoms vary depending on how high your blood sugar is. Some patients, particularly those with prediabetes, gestational diabetes, or type 2 diabetes, may not have symptoms. Type 1 diabetes symptoms appear fast and are more severe.",
        "Some of the symptoms of type 1 diabetes and type 2 diabetes are:",
    ],
    bullets: &[
        bullet("Feeling thirstier than usual."),
        bullet("Urinating frequently."),
        bullet("Losing weight unintentionally."),
        bullet("Feeling tired and weak."),
        bullet("Feeling irritable or experiencing other mood changes."),
        bullet("Having blurry vision."),
        bullet("Having slow-healing sores."),
        bullet("Getting a lot of infections, such as gum, skin and vaginal infections."),
    ],
};

pub static GLOBAL_HEADLINES: [HeadlineStat; 3] = [
    HeadlineStat {
        figure: "537m",
        caption: "adults with diabetes globally",
    },
    HeadlineStat {
        figure: "3 in 4",
        caption: "adults with diabetes live in low- and middle-income countries.",
    },
    HeadlineStat {
        figure: "6.7m",
        caption: "deaths due to diabetes in 2021",
    },
];

pub static GLOBAL_FACTS: Section = Section {
    title: "Global Diabetes Statistics",
    paragraphs: &[],
    bullets: &[
        bullet("537 million adults (20-79 years) are living with diabetes. This number is predicted to increase to 643 million by 2030 and 783 million by 2045."),
        bullet("Over 3 in 4 adults with diabetes live in low- and middle-income countries."),
        bullet("Diabetes caused 6.7 million deaths in 2021."),
        bullet("Diabetes caused at least USD 966 billion dollars in health expenditure - a 316% increase over the last 15 years."),
    ],
};

/// Malaysian figures for 2023.
pub mod malaysia {
    use super::Share;

    pub const TITLE: &str = "Malaysian Diabetes Statistics in 2023";

    pub const TOTAL_PATIENTS: u64 = 1_956_151;

    pub const DIABETES_TYPES: [Share; 3] = [
        Share {
            label: "Type 1 Diabetes Mellitus",
            percent: 0.47,
        },
        Share {
            label: "Type 2 Diabetes Mellitus",
            percent: 99.48,
        },
        Share {
            label: "Others",
            percent: 0.05,
        },
    ];

    pub const GENDER: [Share; 2] = [
        Share {
            label: "Men",
            percent: 42.92,
        },
        Share {
            label: "Women",
            percent: 57.08,
        },
    ];

    pub const ETHNICITY: [Share; 4] = [
        Share {
            label: "Malay",
            percent: 60.13,
        },
        Share {
            label: "Chinese",
            percent: 19.27,
        },
        Share {
            label: "Indian",
            percent: 12.58,
        },
        Share {
            label: "Others",
            percent: 8.02,
        },
    ];
}

/// Every text section of the educational page, in reading order.
#[must_use]
pub fn sections() -> Vec<&'static Section> {
    let mut out = vec![&WHAT_IS_DIABETES];
    out.extend(DIABETES_TYPES.iter());
    out.push(&SYMPTOMS);
    out.push(&GLOBAL_FACTS);
    out
}

/// Format a count with thousands separators (1956151 -> "1,956,151").
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(shares: &[Share]) -> f64 {
        shares.iter().map(|s| s.percent).sum()
    }

    #[test]
    fn test_shares_add_up() {
        assert!((total(&malaysia::DIABETES_TYPES) - 100.0).abs() < 0.01);
        assert!((total(&malaysia::GENDER) - 100.0).abs() < 0.01);
        assert!((total(&malaysia::ETHNICITY) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_sections_in_reading_order() {
        let titles: Vec<&str> = sections().iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "What is Diabetes?",
                "Type 1 Diabetes",
                "Type 2 Diabetes",
                "Gestational Diabetes",
                "Symptoms",
                "Global Diabetes Statistics",
            ]
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(malaysia::TOTAL_PATIENTS), "1,956,151");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
    }
}
