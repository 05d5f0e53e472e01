//! Navigation Guard
//!
//! Decides which screen a user actually lands on for a requested route,
//! given the current session snapshot.

use super::store::SessionSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "career_id", rename_all = "snake_case")]
pub enum Route {
    Landing,
    Auth,
    Questionnaire,
    Dashboard,
    Roadmap(String),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Landing,
            "/auth" => Route::Auth,
            "/questionnaire" => Route::Questionnaire,
            "/dashboard" => Route::Dashboard,
            _ => match trimmed.strip_prefix("/roadmap/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Roadmap(id.to_string()),
                _ => Route::NotFound,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Auth => "/auth".to_string(),
            Route::Questionnaire => "/questionnaire".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Roadmap(id) => format!("/roadmap/{}", id),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Routes that need a logged-in session
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Questionnaire | Route::Dashboard | Route::Roadmap(_))
    }
}

/// Resolve the screen actually shown for `requested`
pub fn resolve(requested: Route, snapshot: &SessionSnapshot) -> Route {
    match requested {
        Route::Landing | Route::Auth if snapshot.is_logged_in => Route::Questionnaire,
        route if route.is_protected() && !snapshot.is_logged_in => Route::Auth,
        Route::Dashboard if snapshot.recommendations.is_empty() => Route::Questionnaire,
        route => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{match_careers, UserAnswers};

    fn logged_in() -> SessionSnapshot {
        SessionSnapshot {
            is_logged_in: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_and_path() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse("/roadmap/ml-engineer"), Route::Roadmap("ml-engineer".to_string()));
        assert_eq!(Route::parse("/roadmap/"), Route::NotFound);
        assert_eq!(Route::parse("/roadmap/a/b"), Route::NotFound);
        assert_eq!(Route::parse("/settings"), Route::NotFound);
        assert_eq!(Route::Roadmap("ux-designer".to_string()).path(), "/roadmap/ux-designer");
    }

    #[test]
    fn test_logged_out_users_are_sent_to_auth() {
        let snapshot = SessionSnapshot::default();
        assert_eq!(resolve(Route::Dashboard, &snapshot), Route::Auth);
        assert_eq!(resolve(Route::Roadmap("x".to_string()), &snapshot), Route::Auth);
        assert_eq!(resolve(Route::Landing, &snapshot), Route::Landing);
        assert_eq!(resolve(Route::NotFound, &snapshot), Route::NotFound);
    }

    #[test]
    fn test_logged_in_users_skip_landing_and_auth() {
        assert_eq!(resolve(Route::Landing, &logged_in()), Route::Questionnaire);
        assert_eq!(resolve(Route::Auth, &logged_in()), Route::Questionnaire);
    }

    #[test]
    fn test_dashboard_needs_recommendations() {
        let mut snapshot = logged_in();
        assert_eq!(resolve(Route::Dashboard, &snapshot), Route::Questionnaire);

        snapshot.recommendations = match_careers(&UserAnswers::default());
        assert_eq!(resolve(Route::Dashboard, &snapshot), Route::Dashboard);
        // Any roadmap id is viewable
        assert_eq!(
            resolve(Route::Roadmap("not-a-real-id".to_string()), &snapshot),
            Route::Roadmap("not-a-real-id".to_string())
        );
    }
}
