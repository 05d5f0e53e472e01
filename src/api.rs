//! Web API Module
//!
//! Thin JSON adapter over the session store and the recommendation engine,
//! for a browser front end. One `SessionStore` per session id; all endpoints
//! return the `ApiResponse` envelope.

use crate::config::AppConfig;
use crate::engine::{
    catalog, lookup_roadmap, questionnaire::Questionnaire, RecommendationEngine, UserAnswers,
};
use crate::session::{navigation, LatencyConfig, SessionError, SessionSnapshot, SessionStore};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

// ============================================================
// APPLICATION STATE
// ============================================================

struct SessionEntry {
    store: Arc<SessionStore>,
    created_at: DateTime<Utc>,
}

/// Shared application state
pub struct AppState {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    engine: RecommendationEngine,
    latency: LatencyConfig,
    session_ttl: Duration,
}

impl AppState {
    pub fn new(latency: LatencyConfig, session_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            engine: RecommendationEngine::default(),
            latency,
            session_ttl,
        }
    }

    /// Open a fresh, empty session and return its id.
    /// Expired sessions are pruned first, so the registry stays bounded.
    pub fn open_session(&self) -> SessionInfo {
        let info = SessionInfo {
            session_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        };
        self.prune_expired(info.created_at);

        let entry = SessionEntry {
            store: Arc::new(SessionStore::new(self.latency.clone())),
            created_at: info.created_at,
        };
        self.lock_sessions().insert(info.session_id.clone(), entry);
        log::info!("[API] Opened session {}", info.session_id);
        info
    }

    /// Drop every session whose age at `now` has reached the TTL.
    /// Returns how many were removed.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let expired: Vec<SessionEntry> = {
            let mut sessions = self.lock_sessions();
            let ids: Vec<String> = sessions
                .iter()
                .filter(|(_, entry)| {
                    // A creation time in the future has no age yet
                    now.signed_duration_since(entry.created_at)
                        .to_std()
                        .map_or(false, |age| age >= self.session_ttl)
                })
                .map(|(id, _)| id.clone())
                .collect();
            ids.iter().filter_map(|id| sessions.remove(id)).collect()
        };

        for entry in &expired {
            entry.store.logout();
        }
        if !expired.is_empty() {
            log::info!("[API] Pruned {} expired session(s)", expired.len());
        }
        expired.len()
    }

    /// Remove a session. Any call still pending on it resolves as superseded.
    pub fn remove_session(&self, session_id: &str) -> bool {
        let Some(entry) = self.lock_sessions().remove(session_id) else {
            return false;
        };
        entry.store.logout();
        log::info!("[API] Closed session {}", session_id);
        true
    }

    /// Handle to a session's store; the registry lock is released on return
    pub fn session(&self, session_id: &str) -> Option<Arc<SessionStore>> {
        self.lock_sessions().get(session_id).map(|e| e.store.clone())
    }

    pub fn session_view(&self, session_id: &str) -> Option<SessionView> {
        self.lock_sessions().get(session_id).map(|e| SessionView {
            session_id: session_id.to_string(),
            created_at: e.created_at,
            snapshot: e.store.snapshot(),
        })
    }

    pub fn session_count(&self) -> usize {
        self.lock_sessions().len()
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================
// REQUEST / RESPONSE TYPES
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectCareerRequest {
    pub career_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub requested: navigation::Route,
    pub resolved: navigation::Route,
    pub redirect: Option<String>,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

fn session_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found"))
}

fn session_error(err: &SessionError) -> HttpResponse {
    let body = ApiResponse::<()>::error(&err.to_string());
    match err {
        SessionError::InvalidCredentials | SessionError::Questionnaire(_) => {
            HttpResponse::BadRequest().json(body)
        }
        SessionError::NotLoggedIn => HttpResponse::Unauthorized().json(body),
        SessionError::UnknownCareer(_) => HttpResponse::NotFound().json(body),
        SessionError::Busy(_) | SessionError::Superseded => HttpResponse::Conflict().json(body),
    }
}

// ============================================================
// API HANDLERS
// ============================================================

/// Health check endpoint
async fn health_check(data: web::Data<Arc<AppState>>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Career Compass API",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": data.session_count(),
    }))
}

/// Interests, qualifications and future plans offered by the questionnaire
async fn get_catalog() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(catalog::catalog()))
}

async fn create_session(data: web::Data<Arc<AppState>>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(data.open_session()))
}

async fn get_session(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    match data.session_view(&path.into_inner()) {
        Some(view) => HttpResponse::Ok().json(ApiResponse::success(view)),
        None => session_not_found(),
    }
}

async fn delete_session(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    if !data.remove_session(&session_id) {
        return session_not_found();
    }
    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "session_id": session_id })))
}

async fn login(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    let Some(store) = data.session(&path.into_inner()) else {
        return session_not_found();
    };
    match store.login(&req.email, &req.password).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(user)),
        Err(e) => session_error(&e),
    }
}

async fn signup(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<SignupRequest>,
) -> impl Responder {
    let Some(store) = data.session(&path.into_inner()) else {
        return session_not_found();
    };
    match store.signup(&req.email, &req.password, &req.name).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(user)),
        Err(e) => session_error(&e),
    }
}

async fn login_with_google(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let Some(store) = data.session(&path.into_inner()) else {
        return session_not_found();
    };
    match store.login_with_google().await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(user)),
        Err(e) => session_error(&e),
    }
}

async fn logout(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let Some(store) = data.session(&path.into_inner()) else {
        return session_not_found();
    };
    store.logout();
    HttpResponse::Ok().json(ApiResponse::success(store.snapshot()))
}

/// Stage-gated questionnaire submission (generates recommendations)
async fn submit_questionnaire(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<UserAnswers>,
) -> impl Responder {
    let Some(store) = data.session(&path.into_inner()) else {
        return session_not_found();
    };

    let questionnaire = match Questionnaire::from_answers(&req) {
        Ok(q) => q,
        Err(e) => return session_error(&SessionError::from(e)),
    };

    match store.submit_questionnaire(&questionnaire, &data.engine).await {
        Ok(recommendations) => HttpResponse::Ok().json(ApiResponse::success(recommendations)),
        Err(e) => session_error(&e),
    }
}

/// Select (or clear) the career whose roadmap the user is viewing
async fn select_career(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<SelectCareerRequest>,
) -> impl Responder {
    let Some(store) = data.session(&path.into_inner()) else {
        return session_not_found();
    };
    match store.select_career(req.career_id.as_deref()) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(store.snapshot())),
        Err(e) => session_error(&e),
    }
}

/// Resolve which screen a requested path actually shows
async fn resolve_route(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    query: web::Query<RouteQuery>,
) -> impl Responder {
    let Some(store) = data.session(&path.into_inner()) else {
        return session_not_found();
    };
    let requested = navigation::Route::parse(&query.path);
    let resolved = navigation::resolve(requested.clone(), &store.snapshot());
    let redirect = (resolved != requested).then(|| resolved.path());
    HttpResponse::Ok().json(ApiResponse::success(RouteResponse {
        requested,
        resolved,
        redirect,
    }))
}

/// Roadmap for any career id (unknown ids get the generic template)
async fn get_roadmap(path: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(lookup_roadmap(&path.into_inner())))
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Register every route on an actix `ServiceConfig`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/catalog", web::get().to(get_catalog))
        .route("/api/session", web::post().to(create_session))
        .route("/api/session/{session_id}", web::get().to(get_session))
        .route("/api/session/{session_id}", web::delete().to(delete_session))
        .route("/api/session/{session_id}/login", web::post().to(login))
        .route("/api/session/{session_id}/login/google", web::post().to(login_with_google))
        .route("/api/session/{session_id}/signup", web::post().to(signup))
        .route("/api/session/{session_id}/logout", web::post().to(logout))
        .route("/api/session/{session_id}/questionnaire", web::post().to(submit_questionnaire))
        .route("/api/session/{session_id}/select", web::post().to(select_career))
        .route("/api/session/{session_id}/route", web::get().to(resolve_route))
        .route("/api/roadmap/{career_id}", web::get().to(get_roadmap));
}

/// Configure and run the API server
pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(config.latency.clone(), config.session_ttl));

    log::info!("[API] Career Compass API starting at http://{}:{}", config.host, config.port);
    log::info!("[API] Simulated latency: {:?}", config.latency);
    log::info!("[API] Session TTL: {}s", config.session_ttl.as_secs());

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
