//! Session State Store
//!
//! Owns the single in-memory session snapshot. All mutation goes through
//! named operations; consumers only ever receive copies.
//!
//! CONCURRENCY RULES:
//! - At most one simulated backend call is in flight per store
//! - Logout always wins: it bumps the epoch, and a pending call that
//!   resolves under a newer epoch is discarded without touching state
//! - No lock is held across a simulated delay

use super::latency::{self, LatencyConfig, LatencySimulator, SimulatedCall};
use crate::engine::{
    questionnaire::{Questionnaire, QuestionnaireError},
    CareerRecommendation, RecommendationEngine, UserAnswers,
};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Identity assigned by the federated login shortcut
pub const GOOGLE_PLACEHOLDER_EMAIL: &str = "user@gmail.com";
pub const GOOGLE_PLACEHOLDER_NAME: &str = "Google User";

// ============================================================
// SNAPSHOT
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
}

/// The complete session state at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub is_logged_in: bool,
    pub user: Option<UserProfile>,
    pub answers: Option<UserAnswers>,
    pub recommendations: Vec<CareerRecommendation>,
    pub selected_career_id: Option<String>,
}

impl SessionSnapshot {
    pub fn has_recommendation(&self, career_id: &str) -> bool {
        self.recommendations.iter().any(|r| r.id == career_id)
    }
}

// ============================================================
// ERRORS
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Deliberately carries no field-level detail
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("A {} request is already in flight", .0.as_str())]
    Busy(SimulatedCall),

    #[error("Session was reset while the request was pending")]
    Superseded,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Career '{0}' is not among the current recommendations")]
    UnknownCareer(String),

    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
}

// ============================================================
// STORE
// ============================================================

#[derive(Debug, Default)]
struct StoreState {
    snapshot: SessionSnapshot,
    in_flight: Option<SimulatedCall>,
    /// Bumped by every logout
    epoch: u64,
}

pub struct SessionStore {
    state: Mutex<StoreState>,
    latency: Box<dyn LatencySimulator>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(LatencyConfig::default())
    }
}

impl SessionStore {
    pub fn new(latency: impl LatencySimulator + 'static) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            latency: Box::new(latency),
        }
    }

    /// Store without artificial delays
    pub fn instant() -> Self {
        Self::new(LatencyConfig::none())
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock_state().snapshot.clone()
    }

    /// Whether a simulated backend call is pending
    pub fn is_busy(&self) -> bool {
        self.lock_state().in_flight.is_some()
    }

    // --------------------------------------------------------
    // Authentication
    // --------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, SessionError> {
        let user = (!email.is_empty() && meets_password_rule(password)).then(|| UserProfile {
            email: email.to_string(),
            name: local_part(email).to_string(),
        });
        self.authenticate(SimulatedCall::Login, email, user).await
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, SessionError> {
        let user = (!email.is_empty() && !name.is_empty() && meets_password_rule(password))
            .then(|| UserProfile {
                email: email.to_string(),
                name: name.to_string(),
            });
        self.authenticate(SimulatedCall::Signup, email, user).await
    }

    /// Federated login shortcut. Always accepted, no OAuth handshake.
    pub async fn login_with_google(&self) -> Result<UserProfile, SessionError> {
        let user = UserProfile {
            email: GOOGLE_PLACEHOLDER_EMAIL.to_string(),
            name: GOOGLE_PLACEHOLDER_NAME.to_string(),
        };
        self.authenticate(SimulatedCall::GoogleLogin, GOOGLE_PLACEHOLDER_EMAIL, Some(user))
            .await
    }

    /// `accepted` is the already-validated outcome; `None` means rejected.
    async fn authenticate(
        &self,
        call: SimulatedCall,
        email: &str,
        accepted: Option<UserProfile>,
    ) -> Result<UserProfile, SessionError> {
        let pending = self.begin(call, false)?;
        latency::simulate(self.latency.as_ref(), call).await;

        let Some(user) = accepted else {
            log::info!("[SESSION] {} rejected for '{}'", call.as_str(), email);
            return Err(SessionError::InvalidCredentials);
        };

        let profile = user.clone();
        pending.commit(move |snapshot| {
            snapshot.is_logged_in = true;
            snapshot.user = Some(user);
        })?;
        log::info!("[SESSION] {} succeeded for '{}'", call.as_str(), profile.email);
        Ok(profile)
    }

    /// Reset everything to the initial empty state. Idempotent.
    pub fn logout(&self) {
        let mut state = self.lock_state();
        if let Some(call) = state.in_flight.take() {
            log::info!("[SESSION] Logout discards pending {}", call.as_str());
        }
        state.epoch += 1;
        state.snapshot = SessionSnapshot::default();
        log::info!("[SESSION] Logged out");
    }

    // --------------------------------------------------------
    // Direct field replacement (no validation)
    // --------------------------------------------------------

    pub fn set_answers(&self, answers: UserAnswers) {
        self.lock_state().snapshot.answers = Some(answers);
    }

    pub fn set_recommendations(&self, recommendations: Vec<CareerRecommendation>) {
        self.lock_state().snapshot.recommendations = recommendations;
    }

    pub fn set_selected_career(&self, career_id: Option<String>) {
        self.lock_state().snapshot.selected_career_id = career_id;
    }

    /// Checked selection: the user must be logged in and the id must be one
    /// of the current recommendations. `None` clears the selection.
    pub fn select_career(&self, career_id: Option<&str>) -> Result<(), SessionError> {
        let mut state = self.lock_state();
        if !state.snapshot.is_logged_in {
            return Err(SessionError::NotLoggedIn);
        }
        if let Some(id) = career_id {
            if !state.snapshot.has_recommendation(id) {
                return Err(SessionError::UnknownCareer(id.to_string()));
            }
        }
        state.snapshot.selected_career_id = career_id.map(str::to_string);
        Ok(())
    }

    // --------------------------------------------------------
    // Questionnaire submission
    // --------------------------------------------------------

    /// Finish the questionnaire, generate recommendations and store both.
    /// Requires a logged-in session.
    pub async fn submit_questionnaire(
        &self,
        questionnaire: &Questionnaire,
        engine: &RecommendationEngine,
    ) -> Result<Vec<CareerRecommendation>, SessionError> {
        let answers = questionnaire.finish()?;

        let pending = self.begin(SimulatedCall::GenerateRecommendations, true)?;
        latency::simulate(self.latency.as_ref(), SimulatedCall::GenerateRecommendations).await;

        let recommendations = engine.recommend(&answers);
        let stored = recommendations.clone();
        pending.commit(move |snapshot| {
            snapshot.answers = Some(answers);
            snapshot.recommendations = stored;
            let still_recommended = snapshot
                .selected_career_id
                .as_deref()
                .map_or(true, |id| snapshot.recommendations.iter().any(|r| r.id == id));
            if !still_recommended {
                snapshot.selected_career_id = None;
            }
        })?;

        log::info!(
            "[SESSION] Stored {} recommendation(s) from questionnaire",
            recommendations.len()
        );
        Ok(recommendations)
    }

    /// Claim the in-flight slot. `require_login` is checked under the same
    /// lock, so a concurrent logout either happens first or supersedes the call.
    fn begin(&self, call: SimulatedCall, require_login: bool) -> Result<InFlight<'_>, SessionError> {
        let mut state = self.lock_state();
        if require_login && !state.snapshot.is_logged_in {
            return Err(SessionError::NotLoggedIn);
        }
        if let Some(active) = state.in_flight {
            log::warn!(
                "[SESSION] Rejected {} while {} is in flight",
                call.as_str(),
                active.as_str()
            );
            return Err(SessionError::Busy(active));
        }
        state.in_flight = Some(call);
        Ok(InFlight {
            store: self,
            epoch: state.epoch,
        })
    }
}

/// Marks a pending simulated call. Dropping it releases the in-flight flag.
struct InFlight<'a> {
    store: &'a SessionStore,
    epoch: u64,
}

impl InFlight<'_> {
    /// Apply `update` unless a logout happened since the call began
    fn commit<T>(self, update: impl FnOnce(&mut SessionSnapshot) -> T) -> Result<T, SessionError> {
        let mut state = self.store.lock_state();
        if state.epoch != self.epoch {
            log::info!("[SESSION] Discarding result of a call superseded by logout");
            return Err(SessionError::Superseded);
        }
        state.in_flight = None;
        Ok(update(&mut state.snapshot))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.store.lock_state();
        if state.epoch == self.epoch {
            state.in_flight = None;
        }
    }
}

fn meets_password_rule(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Part of the email before the first '@'
fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn completed_questionnaire(interests: &[&str]) -> Questionnaire {
        Questionnaire::from_answers(&UserAnswers {
            qualification: "Bachelor's Degree".to_string(),
            major: "Computer Science".to_string(),
            interests: interests.iter().map(|i| i.to_string()).collect(),
            future_plan: "remote".to_string(),
        })
        .unwrap()
    }

    #[actix_rt::test]
    async fn test_login_password_rule() {
        let store = SessionStore::instant();

        assert_eq!(
            store.login("a@b.com", "12345").await,
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(store.snapshot(), SessionSnapshot::default());

        let user = store.login("a@b.com", "123456").await.unwrap();
        assert_eq!(user.name, "a");
        let snapshot = store.snapshot();
        assert!(snapshot.is_logged_in);
        assert_eq!(snapshot.user, Some(user));
    }

    #[actix_rt::test]
    async fn test_login_requires_email() {
        let store = SessionStore::instant();
        assert_eq!(store.login("", "123456").await, Err(SessionError::InvalidCredentials));
        assert!(!store.snapshot().is_logged_in);
    }

    #[actix_rt::test]
    async fn test_login_without_at_sign_uses_whole_email() {
        let store = SessionStore::instant();
        let user = store.login("localonly", "secret1").await.unwrap();
        assert_eq!(user.name, "localonly");
    }

    #[actix_rt::test]
    async fn test_signup_requires_name() {
        let store = SessionStore::instant();
        assert_eq!(
            store.signup("x@y.com", "123456", "").await,
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(
            store.signup("x@y.com", "12345", "Jane").await,
            Err(SessionError::InvalidCredentials)
        );

        let user = store.signup("x@y.com", "123456", "Jane").await.unwrap();
        assert_eq!(user.name, "Jane");
        assert_eq!(user.email, "x@y.com");
    }

    #[actix_rt::test]
    async fn test_google_login_assigns_placeholder() {
        let store = SessionStore::instant();
        let user = store.login_with_google().await.unwrap();
        assert_eq!(user.email, GOOGLE_PLACEHOLDER_EMAIL);
        assert_eq!(user.name, GOOGLE_PLACEHOLDER_NAME);
        assert!(store.snapshot().is_logged_in);
    }

    #[actix_rt::test]
    async fn test_logout_resets_everything() {
        let store = SessionStore::instant();
        store.login("a@b.com", "123456").await.unwrap();
        let recs = store
            .submit_questionnaire(&completed_questionnaire(&["Coding"]), &RecommendationEngine::default())
            .await
            .unwrap();
        store.set_selected_career(Some(recs[0].id.clone()));
        assert_ne!(store.snapshot(), SessionSnapshot::default());

        store.logout();
        assert_eq!(store.snapshot(), SessionSnapshot::default());
        store.logout();
        assert_eq!(store.snapshot(), SessionSnapshot::default());
    }

    #[actix_rt::test]
    async fn test_submit_stores_answers_and_recommendations() {
        let store = SessionStore::instant();
        store.login("a@b.com", "123456").await.unwrap();
        let recs = store
            .submit_questionnaire(&completed_questionnaire(&["Design"]), &RecommendationEngine::default())
            .await
            .unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.recommendations, recs);
        assert_eq!(
            snapshot.answers.map(|a| a.interests),
            Some(vec!["Design".to_string()])
        );
    }

    #[actix_rt::test]
    async fn test_submit_rejects_unfinished_questionnaire() {
        let store = SessionStore::instant();
        let result = store
            .submit_questionnaire(&Questionnaire::new(), &RecommendationEngine::default())
            .await;
        assert!(matches!(result, Err(SessionError::Questionnaire(_))));
        assert!(store.snapshot().answers.is_none());
        assert!(!store.is_busy());
    }

    #[actix_rt::test]
    async fn test_submit_requires_login() {
        let store = SessionStore::instant();
        let result = store
            .submit_questionnaire(&completed_questionnaire(&["Coding"]), &RecommendationEngine::default())
            .await;
        assert_eq!(result, Err(SessionError::NotLoggedIn));
        assert_eq!(store.snapshot(), SessionSnapshot::default());
        assert!(!store.is_busy());
    }

    #[actix_rt::test]
    async fn test_logout_during_generation_discards_results() {
        let store = SessionStore::new(LatencyConfig::uniform(Duration::from_millis(150)));
        store.login("a@b.com", "123456").await.unwrap();
        let engine = RecommendationEngine::default();
        let questionnaire = completed_questionnaire(&["Coding"]);

        let (submitted, ()) = tokio::join!(store.submit_questionnaire(&questionnaire, &engine), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.logout();
        });

        assert_eq!(submitted, Err(SessionError::Superseded));
        assert_eq!(store.snapshot(), SessionSnapshot::default());
    }

    #[actix_rt::test]
    async fn test_select_career_checks_login_and_membership() {
        let store = SessionStore::instant();
        assert_eq!(store.select_career(Some("ml-engineer")), Err(SessionError::NotLoggedIn));

        store.login("a@b.com", "123456").await.unwrap();
        store
            .submit_questionnaire(&completed_questionnaire(&["Data"]), &RecommendationEngine::default())
            .await
            .unwrap();

        assert_eq!(
            store.select_career(Some("chef")),
            Err(SessionError::UnknownCareer("chef".to_string()))
        );
        assert_eq!(store.snapshot().selected_career_id, None);

        store.select_career(Some("ml-engineer")).unwrap();
        assert_eq!(store.snapshot().selected_career_id.as_deref(), Some("ml-engineer"));

        store.select_career(None).unwrap();
        assert_eq!(store.snapshot().selected_career_id, None);

        store.logout();
        assert_eq!(store.select_career(None), Err(SessionError::NotLoggedIn));
    }

    #[actix_rt::test]
    async fn test_resubmission_clears_stale_selection() {
        let store = SessionStore::instant();
        let engine = RecommendationEngine::default();
        store.login("a@b.com", "123456").await.unwrap();
        store
            .submit_questionnaire(&completed_questionnaire(&["Coding"]), &engine)
            .await
            .unwrap();
        store.set_selected_career(Some("ml-engineer".to_string()));

        // Data still recommends ml-engineer
        store
            .submit_questionnaire(&completed_questionnaire(&["Data"]), &engine)
            .await
            .unwrap();
        assert_eq!(store.snapshot().selected_career_id.as_deref(), Some("ml-engineer"));

        store
            .submit_questionnaire(&completed_questionnaire(&["Writing"]), &engine)
            .await
            .unwrap();
        assert_eq!(store.snapshot().selected_career_id, None);
    }

    #[actix_rt::test]
    async fn test_second_call_while_in_flight_is_busy() {
        let store = SessionStore::new(LatencyConfig::uniform(Duration::from_millis(150)));

        let (first, second) = tokio::join!(store.login("a@b.com", "123456"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.signup("x@y.com", "123456", "Jane").await
        });

        assert_eq!(first.map(|u| u.name), Ok("a".to_string()));
        assert_eq!(second, Err(SessionError::Busy(SimulatedCall::Login)));
        assert!(!store.is_busy());
    }

    #[actix_rt::test]
    async fn test_logout_wins_over_pending_login() {
        let store = SessionStore::new(LatencyConfig::uniform(Duration::from_millis(150)));

        let (login, ()) = tokio::join!(store.login("a@b.com", "123456"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.logout();
        });

        assert_eq!(login, Err(SessionError::Superseded));
        assert_eq!(store.snapshot(), SessionSnapshot::default());
        assert!(!store.is_busy());
    }

    #[actix_rt::test]
    async fn test_dropped_call_releases_in_flight_flag() {
        let store = SessionStore::new(LatencyConfig::uniform(Duration::from_millis(500)));

        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), store.login("a@b.com", "123456")).await;
        assert!(timed_out.is_err());
        assert!(!store.is_busy());
        assert!(!store.snapshot().is_logged_in);
    }

    #[test]
    fn test_setters_replace_fields() {
        let store = SessionStore::instant();
        store.set_answers(UserAnswers::default());
        store.set_recommendations(crate::engine::match_careers(&UserAnswers::default()));
        store.set_selected_career(Some("business-analyst".to_string()));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.recommendations.len(), 2);
        assert!(snapshot.has_recommendation("business-analyst"));
        assert_eq!(snapshot.answers, Some(UserAnswers::default()));
        // Setters never touch authentication
        assert!(!snapshot.is_logged_in);

        store.set_selected_career(None);
        assert_eq!(store.snapshot().selected_career_id, None);
    }
}
