//! Wire and domain types for ranking results.
//!
//! Field names follow the scoring backend's JSON exactly; the Rust-side names
//! are mapped with serde renames where they differ.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::TransportError;

/// Inclusive upper bound of every percentage score the backend produces.
pub const MAX_SCORE: f64 = 100.0;

/// Full multi-dimensional score and extracted-field data for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDetail {
    pub filename: String,
    pub final_score: f64,
    pub keyword_match: f64,
    pub semantic_match: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub education_match: f64,
    pub years_experience: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

impl ResumeDetail {
    /// The percentage fields paired with their wire names, for range checks.
    fn scores(&self) -> [(&'static str, f64); 6] {
        [
            ("final_score", self.final_score),
            ("keyword_match", self.keyword_match),
            ("semantic_match", self.semantic_match),
            ("skill_match", self.skill_match),
            ("experience_match", self.experience_match),
            ("education_match", self.education_match),
        ]
    }
}

/// One line of the ranked list. Travels as `[filename, displayName, score]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, String, f64)", into = "(String, String, f64)")]
pub struct RankingEntry {
    pub filename: String,
    pub display_name: String,
    pub score: f64,
}

impl From<(String, String, f64)> for RankingEntry {
    fn from((filename, display_name, score): (String, String, f64)) -> Self {
        Self {
            filename,
            display_name,
            score,
        }
    }
}

impl From<RankingEntry> for (String, String, f64) {
    fn from(entry: RankingEntry) -> Self {
        (entry.filename, entry.display_name, entry.score)
    }
}

/// A complete ranking result: rank-ordered list plus per-candidate details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResponse {
    #[serde(rename = "ranked_resumes")]
    pub ranked: Vec<RankingEntry>,
    #[serde(rename = "detailed_results", default)]
    pub details: Vec<ResumeDetail>,
}

impl RankingResponse {
    /// Checks the integrity rules a response must satisfy before it may reach the store.
    ///
    /// Rejects:
    /// - duplicate filenames in `details` or in `ranked`
    /// - a ranked filename with no matching detail record
    /// - scores outside 0–100 and negative `years_experience`
    ///
    /// Detail records absent from `ranked` are allowed.
    pub fn validate(&self) -> Result<(), TransportError> {
        let mut detail_names = HashSet::with_capacity(self.details.len());
        for detail in &self.details {
            if !detail_names.insert(detail.filename.as_str()) {
                return Err(TransportError::malformed(format!(
                    "duplicate detail record for '{}'",
                    detail.filename
                )));
            }
            for (field, value) in detail.scores() {
                if !is_percentage(value) {
                    return Err(TransportError::malformed(format!(
                        "{field} for '{}' is out of range: {value}",
                        detail.filename
                    )));
                }
            }
            if !detail.years_experience.is_finite() || detail.years_experience < 0.0 {
                return Err(TransportError::malformed(format!(
                    "years_experience for '{}' is negative or not finite",
                    detail.filename
                )));
            }
        }

        let mut ranked_names = HashSet::with_capacity(self.ranked.len());
        for entry in &self.ranked {
            if !ranked_names.insert(entry.filename.as_str()) {
                return Err(TransportError::malformed(format!(
                    "'{}' is ranked more than once",
                    entry.filename
                )));
            }
            if !detail_names.contains(entry.filename.as_str()) {
                return Err(TransportError::malformed(format!(
                    "ranked entry '{}' has no detail record",
                    entry.filename
                )));
            }
            if !is_percentage(entry.score) {
                return Err(TransportError::malformed(format!(
                    "score for '{}' is out of range: {}",
                    entry.filename, entry.score
                )));
            }
        }

        Ok(())
    }
}

fn is_percentage(value: f64) -> bool {
    (0.0..=MAX_SCORE).contains(&value)
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    fn detail_json(filename: &str) -> serde_json::Value {
        json!({
            "filename": filename,
            "final_score": 72.5,
            "keyword_match": 80,
            "semantic_match": 70,
            "skill_match": 60,
            "experience_match": 50,
            "education_match": 40,
            "years_experience": 6,
            "education": ["MSc Physics"],
            "name": "Alice Smith",
            "email": "alice@example.com",
            "phone": "555-0100"
        })
    }

    #[test]
    fn test_decodes_backend_shape() {
        let body = json!({
            "ranked_resumes": [["a.pdf", "Alice", 91]],
            "detailed_results": [detail_json("a.pdf")]
        });

        let response: RankingResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.ranked, vec![entry("a.pdf", "Alice", 91.0)]);
        assert_eq!(response.details[0].keyword_match, 80.0);
        assert_eq!(response.details[0].education, vec!["MSc Physics"]);
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_encodes_back_to_backend_shape() {
        let response = response(&[("a.pdf", "Alice", 91.0)]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["ranked_resumes"], json!([["a.pdf", "Alice", 91.0]]));
        assert_eq!(value["detailed_results"][0]["filename"], "a.pdf");
        assert!(value.get("ranked").is_none());
    }

    #[test]
    fn test_null_contact_fields_become_empty() {
        let mut raw = detail_json("b.pdf");
        raw["name"] = serde_json::Value::Null;
        raw["education"] = serde_json::Value::Null;
        raw.as_object_mut().unwrap().remove("phone");

        let detail: ResumeDetail = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.name, "");
        assert_eq!(detail.phone, "");
        assert!(detail.education.is_empty());
    }

    #[test]
    fn test_missing_ranked_resumes_fails_to_decode() {
        let body = json!({ "detailed_results": [] });
        assert!(serde_json::from_value::<RankingResponse>(body).is_err());
    }

    #[test]
    fn test_entry_with_wrong_arity_fails_to_decode() {
        let body = json!({ "ranked_resumes": [["a.pdf", 91]] });
        assert!(serde_json::from_value::<RankingResponse>(body).is_err());
    }

    #[test]
    fn test_ranked_without_detail_is_rejected() {
        let mut response = response(&[("a.pdf", "Alice", 91.0), ("b.pdf", "Bob", 60.0)]);
        response.details.retain(|d| d.filename != "b.pdf");

        let err = response.validate().unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse { ref reason } if reason.contains("b.pdf")));
    }

    #[test]
    fn test_extra_detail_not_in_ranked_is_accepted() {
        let mut response = response(&[("a.pdf", "Alice", 91.0)]);
        response
            .details
            .push(detail("orphan.pdf", [1.0, 2.0, 3.0, 4.0, 5.0]));

        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_duplicate_detail_filenames_rejected() {
        let mut response = response(&[("a.pdf", "Alice", 91.0)]);
        response.details.push(detail("a.pdf", [0.0; 5]));

        assert!(response.validate().is_err());
    }

    #[test]
    fn test_duplicate_ranked_filenames_rejected() {
        let mut response = response(&[("a.pdf", "Alice", 91.0)]);
        response.ranked.push(entry("a.pdf", "Alice again", 50.0));

        assert!(response.validate().is_err());
    }

    #[test]
    fn test_ranked_score_out_of_range_rejected() {
        let over = response(&[("a.pdf", "Alice", 100.5)]);
        let under = response(&[("a.pdf", "Alice", -1.0)]);

        assert!(over.validate().is_err());
        assert!(under.validate().is_err());
    }

    #[test]
    fn test_boundary_scores_accepted() {
        let response = response(&[("a.pdf", "Alice", 100.0), ("b.pdf", "Bob", 0.0)]);
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_detail_score_out_of_range_rejected() {
        let mut response = response(&[("a.pdf", "Alice", 91.0)]);
        response.details[0].skill_match = 140.0;

        let err = response.validate().unwrap_err();
        assert!(err.to_string().contains("skill_match"));
    }

    #[test]
    fn test_negative_experience_rejected() {
        let mut response = response(&[("a.pdf", "Alice", 91.0)]);
        response.details[0].years_experience = -2.0;

        assert!(response.validate().is_err());
    }
}
