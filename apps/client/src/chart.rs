//! Chart Projector — maps a candidate's detail record onto the score-breakdown bar chart.

use serde::Serialize;

use crate::models::{ResumeDetail, MAX_SCORE};

/// Upper bound of the chart's y axis. The axis always begins at zero.
pub const CHART_MAX: f64 = MAX_SCORE;

const DATASET_LABEL: &str = "Score (%)";

/// One score dimension. Declaration order is the on-screen bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Keyword,
    Semantic,
    Skill,
    Experience,
    Education,
}

/// RGBA fill and border of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarColor {
    pub fill: &'static str,
    pub border: &'static str,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Keyword,
        Dimension::Semantic,
        Dimension::Skill,
        Dimension::Experience,
        Dimension::Education,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Keyword => "Keyword Match",
            Dimension::Semantic => "Semantic Match",
            Dimension::Skill => "Skill Match",
            Dimension::Experience => "Experience Match",
            Dimension::Education => "Education Match",
        }
    }

    pub fn color(self) -> BarColor {
        let (fill, border) = match self {
            Dimension::Keyword => ("rgba(255, 99, 132, 0.6)", "rgba(255, 99, 132, 1)"),
            Dimension::Semantic => ("rgba(54, 162, 235, 0.6)", "rgba(54, 162, 235, 1)"),
            Dimension::Skill => ("rgba(255, 206, 86, 0.6)", "rgba(255, 206, 86, 1)"),
            Dimension::Experience => ("rgba(75, 192, 192, 0.6)", "rgba(75, 192, 192, 1)"),
            Dimension::Education => ("rgba(153, 102, 255, 0.6)", "rgba(153, 102, 255, 1)"),
        };
        BarColor { fill, border }
    }

    fn value_in(self, detail: &ResumeDetail) -> f64 {
        match self {
            Dimension::Keyword => detail.keyword_match,
            Dimension::Semantic => detail.semantic_match,
            Dimension::Skill => detail.skill_match,
            Dimension::Experience => detail.experience_match,
            Dimension::Education => detail.education_match,
        }
    }
}

/// The five-bar breakdown for one candidate. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: [(Dimension, f64); 5],
}

impl ChartSeries {
    pub fn dataset_label(&self) -> &'static str {
        DATASET_LABEL
    }

    pub fn labels(&self) -> [&'static str; 5] {
        self.points.map(|(dimension, _)| dimension.label())
    }

    pub fn values(&self) -> [f64; 5] {
        self.points.map(|(_, value)| value)
    }

    pub fn value(&self, dimension: Dimension) -> f64 {
        self.points
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }
}

/// Projects a detail record onto the chart. No record, no series: callers render
/// a placeholder instead of an all-zero chart.
pub fn project(detail: Option<&ResumeDetail>) -> Option<ChartSeries> {
    let detail = detail?;
    Some(ChartSeries {
        points: Dimension::ALL.map(|dimension| (dimension, dimension.value_in(detail))),
    })
}
