//! Recommendation Engine — rule table mapping a `FeatureRecord` to tips.
//!
//! Rules are independent; every matching tip is emitted in table order,
//! followed by one closing tip chosen by the prediction alone.

use crate::models::features::FeatureRecord;
use crate::models::prediction::Prediction;

struct Rule {
    applies: fn(&FeatureRecord) -> bool,
    tip: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        applies: |r| r.cgpa < 7.0,
        tip: "Improve your CGPA to at least 7.0 to enhance academic standing.",
    },
    Rule {
        applies: |r| r.internships < 1,
        tip: "Gain real-world experience by pursuing internships.",
    },
    Rule {
        applies: |r| r.projects < 2,
        tip: "Work on more hands-on projects to showcase technical skills.",
    },
    Rule {
        applies: |r| r.workshops_certifications < 2,
        tip: "Attend workshops or earn certifications to boost your resume.",
    },
    Rule {
        applies: |r| r.aptitude_test_score < 75,
        tip: "Practice aptitude tests to improve logical and quantitative skills.",
    },
    Rule {
        applies: |r| r.soft_skills_rating < 7,
        tip: "Consider improving your soft skills through communication workshops.",
    },
    Rule {
        applies: |r| !r.extracurricular_activities,
        tip: "Join extracurricular activities to show a well-rounded profile.",
    },
    Rule {
        applies: |r| !r.placement_training,
        tip: "Participate in placement training to prepare for interviews.",
    },
    Rule {
        applies: |r| r.ssc_marks < 60,
        tip: "Highlight improvements made since school to address low SSC marks.",
    },
    Rule {
        applies: |r| r.hsc_marks < 60,
        tip: "Emphasize higher education performance to compensate for HSC scores.",
    },
];

const PLACED_TIP: &str = "Great work! Keep building your portfolio with internships or research.";
const NOT_PLACED_TIP: &str = "Don't be discouraged. Focus on upskilling and consistent effort.";

pub fn generate_recommendations(record: &FeatureRecord, prediction: Prediction) -> Vec<String> {
    let mut tips: Vec<String> = RULES
        .iter()
        .filter(|rule| (rule.applies)(record))
        .map(|rule| rule.tip.to_string())
        .collect();

    tips.push(
        match prediction {
            Prediction::Placed => PLACED_TIP,
            Prediction::NotPlaced => NOT_PLACED_TIP,
        }
        .to_string(),
    );
    tips
}
