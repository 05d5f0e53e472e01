//! Career Engine Types
//!
//! Core data structures shared by the recommendation engine, the session
//! store and the HTTP facade. Everything here is a plain value record.

use serde::{Deserialize, Serialize};

// ============================================================
// QUESTIONNAIRE ANSWERS
// ============================================================

/// Answers captured at questionnaire submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserAnswers {
    pub qualification: String,
    pub major: String,
    /// Selected interests, in selection order (no duplicates)
    pub interests: Vec<String>,
    /// Value of the chosen future plan (e.g. "startup")
    pub future_plan: String,
}

impl UserAnswers {
    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.iter().any(|i| i == interest)
    }
}

// ============================================================
// CAREER RECOMMENDATION
// ============================================================

/// Accent color a renderer uses for a recommendation card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccentColor {
    Primary,
    Secondary,
}

/// A single career suggestion with a match score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub id: String,
    pub title: String,
    /// Match score (0 to 100)
    pub match_score: u8,
    pub salary_range: String,
    pub description: String,
    /// Symbolic icon name, resolved by the renderer
    pub icon: String,
    pub color: AccentColor,
}

impl CareerRecommendation {
    pub fn new(id: &str, title: &str, match_score: u8) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            match_score: match_score.min(100),
            salary_range: String::new(),
            description: String::new(),
            icon: String::new(),
            color: AccentColor::Primary,
        }
    }

    pub fn with_salary(mut self, salary_range: &str) -> Self {
        self.salary_range = salary_range.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_icon(mut self, icon: &str, color: AccentColor) -> Self {
        self.icon = icon.to_string();
        self.color = color;
        self
    }
}

// ============================================================
// ROADMAP
// ============================================================

/// The four canonical career stages, in chronological order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Foundation,
    Skills,
    Entry,
    Senior,
}

impl StageId {
    pub const ORDER: [StageId; 4] = [
        StageId::Foundation,
        StageId::Skills,
        StageId::Entry,
        StageId::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::Foundation => "foundation",
            StageId::Skills => "skills",
            StageId::Entry => "entry",
            StageId::Senior => "senior",
        }
    }
}

/// One stage of a career roadmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapNode {
    pub id: StageId,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub items: Vec<String>,
}

impl RoadmapNode {
    pub fn new(id: StageId, title: &str, subtitle: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            duration: None,
            items: Vec::new(),
        }
    }

    pub fn with_duration(mut self, duration: &str) -> Self {
        self.duration = Some(duration.to_string());
        self
    }

    pub fn with_items(mut self, items: &[&str]) -> Self {
        self.items = items.iter().map(|i| i.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub title: String,
    pub provider: String,
    pub duration: String,
    pub url: String,
}

impl CourseRef {
    pub fn new(title: &str, provider: &str, duration: &str) -> Self {
        Self {
            title: title.to_string(),
            provider: provider.to_string(),
            duration: duration.to_string(),
            url: "#".to_string(),
        }
    }
}

/// How much a certification matters for the career
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    Essential,
    Recommended,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationRef {
    pub name: String,
    pub issuer: String,
    pub importance: Importance,
}

impl CertificationRef {
    pub fn new(name: &str, issuer: &str, importance: Importance) -> Self {
        Self {
            name: name.to_string(),
            issuer: issuer.to_string(),
            importance,
        }
    }
}

/// Static, staged career-progression guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRoadmap {
    pub career_id: String,
    pub career_title: String,
    /// Always the four canonical stages, in `StageId::ORDER`
    pub nodes: Vec<RoadmapNode>,
    pub courses: Vec<CourseRef>,
    pub certifications: Vec<CertificationRef>,
}

impl CareerRoadmap {
    /// Stage ids in node order
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.nodes.iter().map(|n| n.id).collect()
    }
}
