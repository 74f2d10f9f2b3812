use serde::{Deserialize, Serialize};

/// A single cell of a feature row as seen by the preprocessing pipeline.
///
/// Training data mixes numeric columns with string-typed categorical columns
/// (`"Yes"` / `"No"`), so the artifact's imputer statistics and any
/// hand-built rows carry both shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Number(if value { 1.0 } else { 0.0 })
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Ordered `(column, value)` pairs handed to preprocessing.
/// A `None` value is filled from the imputer statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    cells: Vec<(String, Option<Cell>)>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<Cell>) -> Self {
        self.set(column, Some(value.into()));
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_missing(mut self, column: &str) -> Self {
        self.set(column, None);
        self
    }

    fn set(&mut self, column: &str, value: Option<Cell>) {
        match self.cells.iter_mut().find(|(name, _)| name == column) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((column.to_string(), value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }
}

/// Signals extracted from one resume, in training-time column order.
///
/// The field set is fixed at compile time; [`FeatureRecord::COLUMNS`] is the
/// schema that loaded artifacts are checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "CGPA")]
    pub cgpa: f64,
    #[serde(rename = "Internships")]
    pub internships: u32,
    #[serde(rename = "Projects")]
    pub projects: u32,
    #[serde(rename = "Workshops/Certifications")]
    pub workshops_certifications: u32,
    #[serde(rename = "AptitudeTestScore")]
    pub aptitude_test_score: u32,
    #[serde(rename = "SoftSkillsRating")]
    pub soft_skills_rating: u32,
    #[serde(rename = "ExtracurricularActivities")]
    pub extracurricular_activities: bool,
    #[serde(rename = "PlacementTraining")]
    pub placement_training: bool,
    #[serde(rename = "SSC_Marks")]
    pub ssc_marks: u32,
    #[serde(rename = "HSC_Marks")]
    pub hsc_marks: u32,
}

impl FeatureRecord {
    pub const COLUMNS: [&'static str; 10] = [
        "CGPA",
        "Internships",
        "Projects",
        "Workshops/Certifications",
        "AptitudeTestScore",
        "SoftSkillsRating",
        "ExtracurricularActivities",
        "PlacementTraining",
        "SSC_Marks",
        "HSC_Marks",
    ];

    /// Placeholder until aptitude scores are extracted from documents.
    pub const DEFAULT_APTITUDE_TEST_SCORE: u32 = 70;
    /// Placeholder until soft-skill ratings are extracted from documents.
    pub const DEFAULT_SOFT_SKILLS_RATING: u32 = 5;

    /// Converts the record into a fully populated row in column order.
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow::new()
            .with("CGPA", self.cgpa)
            .with("Internships", self.internships)
            .with("Projects", self.projects)
            .with("Workshops/Certifications", self.workshops_certifications)
            .with("AptitudeTestScore", self.aptitude_test_score)
            .with("SoftSkillsRating", self.soft_skills_rating)
            .with("ExtracurricularActivities", self.extracurricular_activities)
            .with("PlacementTraining", self.placement_training)
            .with("SSC_Marks", self.ssc_marks)
            .with("HSC_Marks", self.hsc_marks)
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            cgpa: 0.0,
            internships: 0,
            projects: 0,
            workshops_certifications: 0,
            aptitude_test_score: Self::DEFAULT_APTITUDE_TEST_SCORE,
            soft_skills_rating: Self::DEFAULT_SOFT_SKILLS_RATING,
            extracurricular_activities: false,
            placement_training: true,
            ssc_marks: 0,
            hsc_marks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_follows_column_order() {
        let row = FeatureRecord::default().to_row();
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, FeatureRecord::COLUMNS.to_vec());
    }

    #[test]
    fn test_row_encodes_flags_as_zero_one() {
        let row = FeatureRecord::default().to_row();
        assert_eq!(row.get("PlacementTraining"), Some(&Cell::Number(1.0)));
        assert_eq!(row.get("ExtracurricularActivities"), Some(&Cell::Number(0.0)));
    }

    #[test]
    fn test_serialized_keys_match_columns() {
        let json = serde_json::to_value(FeatureRecord::default()).unwrap();
        let object = json.as_object().unwrap();
        for column in FeatureRecord::COLUMNS {
            assert!(object.contains_key(column), "missing key {column}");
        }
        assert_eq!(object.len(), FeatureRecord::COLUMNS.len());
    }

    #[test]
    fn test_cell_untagged_serde() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[7.5, "Yes"]"#).unwrap();
        assert_eq!(cells[0], Cell::Number(7.5));
        assert_eq!(cells[1], Cell::Text("Yes".to_string()));
    }

    #[test]
    fn test_with_overwrites_existing_column() {
        let row = FeatureRow::new().with("CGPA", 6.0).with("CGPA", 8.0);
        assert_eq!(row.columns().count(), 1);
        assert_eq!(row.get("CGPA"), Some(&Cell::Number(8.0)));
    }
}
