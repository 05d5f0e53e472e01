//! Career Matcher Module
//!
//! Maps questionnaire answers to a ranked list of career recommendations.
//!
//! MATCHING RULES:
//! - Rules are evaluated once, in declared order
//! - A rule fires when any of its interests was selected
//! - Every firing rule contributes its recommendation (no dedup by id)
//! - The first `max_results` contributions are kept, THEN sorted by score
//! - No firing rule at all yields the fallback recommendations

use super::types::{AccentColor, CareerRecommendation, UserAnswers};
use serde::{Deserialize, Serialize};

// ============================================================
// MATCH RULE
// ============================================================

/// A predicate over selected interests paired with the recommendation it contributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRule {
    /// Fires when ANY of these interests was selected
    pub any_of: Vec<String>,
    pub recommendation: CareerRecommendation,
}

impl MatchRule {
    pub fn new(any_of: &[&str], recommendation: CareerRecommendation) -> Self {
        Self {
            any_of: any_of.iter().map(|i| i.to_string()).collect(),
            recommendation,
        }
    }

    pub fn fires(&self, answers: &UserAnswers) -> bool {
        self.any_of.iter().any(|i| answers.has_interest(i))
    }
}

// ============================================================
// ENGINE
// ============================================================

/// Configuration for the matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub max_results: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}

/// Rule-table driven recommendation engine
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: MatcherConfig,
    rules: Vec<MatchRule>,
    fallback: Vec<CareerRecommendation>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

impl RecommendationEngine {
    /// Engine with the standard rule table and fallbacks
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
            fallback: default_fallback(),
        }
    }

    /// Engine with a custom rule table (standard fallbacks)
    pub fn with_rules(config: MatcherConfig, rules: Vec<MatchRule>) -> Self {
        Self {
            config,
            rules,
            fallback: default_fallback(),
        }
    }

    /// Rank careers for the given answers. Never returns an empty list.
    pub fn recommend(&self, answers: &UserAnswers) -> Vec<CareerRecommendation> {
        let mut matched: Vec<CareerRecommendation> = self
            .rules
            .iter()
            .filter(|rule| rule.fires(answers))
            .map(|rule| rule.recommendation.clone())
            .collect();

        if matched.is_empty() {
            log::debug!("[ENGINE] No rule fired for {:?}, using fallback", answers.interests);
            matched.extend(self.fallback.iter().cloned());
        }

        // Truncate in firing order first; the sort must not pick the top scores.
        matched.truncate(self.config.max_results);
        // `sort_by` is stable, so equal scores keep firing order.
        matched.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        log::debug!(
            "[ENGINE] {} recommendation(s): {:?}",
            matched.len(),
            matched.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
        );
        matched
    }
}

/// Rank careers with the standard engine
pub fn match_careers(answers: &UserAnswers) -> Vec<CareerRecommendation> {
    RecommendationEngine::default().recommend(answers)
}

// ============================================================
// REFERENCE DATA
// ============================================================

fn default_rules() -> Vec<MatchRule> {
    vec![
        MatchRule::new(
            &["Coding", "Data"],
            CareerRecommendation::new("ml-engineer", "Machine Learning Engineer", 95)
                .with_salary("$120,000 - $180,000")
                .with_description("Build intelligent systems that learn from data and make predictions")
                .with_icon("Brain", AccentColor::Primary),
        ),
        MatchRule::new(
            &["Management", "Design"],
            CareerRecommendation::new("product-manager", "Product Manager", 92)
                .with_salary("$110,000 - $160,000")
                .with_description("Lead product strategy and work with cross-functional teams")
                .with_icon("Target", AccentColor::Secondary),
        ),
        MatchRule::new(
            &["Design", "Research"],
            CareerRecommendation::new("ux-designer", "UX Designer", 88)
                .with_salary("$85,000 - $140,000")
                .with_description("Create intuitive and delightful user experiences")
                .with_icon("Palette", AccentColor::Primary),
        ),
        MatchRule::new(
            &["Coding"],
            CareerRecommendation::new("software-engineer", "Full-Stack Developer", 90)
                .with_salary("$100,000 - $170,000")
                .with_description("Build complete web applications from frontend to backend")
                .with_icon("Code", AccentColor::Secondary),
        ),
        MatchRule::new(
            &["Data", "Research"],
            CareerRecommendation::new("data-scientist", "Data Scientist", 87)
                .with_salary("$95,000 - $155,000")
                .with_description("Extract insights from complex datasets to drive business decisions")
                .with_icon("BarChart3", AccentColor::Primary),
        ),
        MatchRule::new(
            &["Writing", "Marketing"],
            CareerRecommendation::new("content-strategist", "Content Strategist", 85)
                .with_salary("$70,000 - $120,000")
                .with_description("Develop content strategies that engage and convert audiences")
                .with_icon("PenTool", AccentColor::Secondary),
        ),
    ]
}

fn default_fallback() -> Vec<CareerRecommendation> {
    vec![
        CareerRecommendation::new("business-analyst", "Business Analyst", 82)
            .with_salary("$75,000 - $110,000")
            .with_description("Bridge the gap between business needs and technical solutions")
            .with_icon("Briefcase", AccentColor::Primary),
        CareerRecommendation::new("project-manager", "Project Manager", 80)
            .with_salary("$80,000 - $130,000")
            .with_description("Lead teams to deliver projects on time and within budget")
            .with_icon("FolderKanban", AccentColor::Secondary),
    ]
}
