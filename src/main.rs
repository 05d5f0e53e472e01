//! Career Compass - Main Entry Point
//!
//! Starts the web API server for the career-onboarding front end.

use career_compass::{api::run_server, config::AppConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("[CONFIG] {}", e);
            std::process::exit(2);
        }
    };

    run_server(config).await
}
