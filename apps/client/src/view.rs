//! Read-only projections the rendering layer draws from: the rankings list,
//! the candidate information panel and the headline score cards.

use serde::Serialize;

use crate::models::ResumeDetail;
use crate::selection::SelectionController;
use crate::store::RankingStore;

pub const NOT_DETECTED: &str = "Not detected";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    /// 1-based position in the ranked list.
    pub rank: usize,
    pub filename: String,
    pub display_name: String,
    pub score: f64,
    pub score_label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePanel {
    pub filename: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub education: String,
}

impl CandidatePanel {
    pub fn from_detail(detail: &ResumeDetail) -> Self {
        let education = if detail.education.is_empty() {
            NOT_DETECTED.to_string()
        } else {
            detail.education.join(", ")
        };
        Self {
            filename: detail.filename.clone(),
            name: or_not_detected(&detail.name),
            email: or_not_detected(&detail.email),
            phone: or_not_detected(&detail.phone),
            experience: format!("{} years", detail.years_experience),
            education,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreCards {
    pub overall: String,
    pub experience_match: String,
}

impl ScoreCards {
    pub fn from_detail(detail: &ResumeDetail) -> Self {
        Self {
            overall: format_percent(detail.final_score),
            experience_match: format_percent(detail.experience_match),
        }
    }
}

/// `91.0` → `"91%"`, `72.5` → `"72.5%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

pub fn ranking_rows(store: &RankingStore, selection: &SelectionController) -> Vec<RankingRow> {
    store
        .ranked()
        .iter()
        .enumerate()
        .map(|(i, entry)| RankingRow {
            rank: i + 1,
            filename: entry.filename.clone(),
            display_name: entry.display_name.clone(),
            score: entry.score,
            score_label: format_percent(entry.score),
            selected: selection.is_selected(&entry.filename),
        })
        .collect()
}

fn or_not_detected(value: &str) -> String {
    if value.is_empty() {
        NOT_DETECTED.to_string()
    } else {
        value.to_string()
    }
}
