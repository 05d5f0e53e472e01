//! Latency Simulation
//!
//! Every call that would reach a real backend goes through a
//! `LatencySimulator`. Replacing the simulator is the only change needed to
//! wire a real authentication or generation service in.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operations that pretend to talk to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatedCall {
    Login,
    Signup,
    GoogleLogin,
    GenerateRecommendations,
}

impl SimulatedCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulatedCall::Login => "login",
            SimulatedCall::Signup => "signup",
            SimulatedCall::GoogleLogin => "google_login",
            SimulatedCall::GenerateRecommendations => "generate_recommendations",
        }
    }
}

pub trait LatencySimulator: Send + Sync {
    /// How long the given call should appear to take
    fn delay_for(&self, call: SimulatedCall) -> Duration;
}

/// Per-call artificial delays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    pub login: Duration,
    pub signup: Duration,
    pub google_login: Duration,
    pub generate: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            signup: Duration::from_millis(1000),
            google_login: Duration::from_millis(1500),
            generate: Duration::from_millis(2000),
        }
    }
}

impl LatencyConfig {
    /// No artificial delay at all
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    pub fn uniform(delay: Duration) -> Self {
        Self {
            login: delay,
            signup: delay,
            google_login: delay,
            generate: delay,
        }
    }
}

impl LatencySimulator for LatencyConfig {
    fn delay_for(&self, call: SimulatedCall) -> Duration {
        match call {
            SimulatedCall::Login => self.login,
            SimulatedCall::Signup => self.signup,
            SimulatedCall::GoogleLogin => self.google_login,
            SimulatedCall::GenerateRecommendations => self.generate,
        }
    }
}

/// Wait out the simulated round-trip for `call`
pub async fn simulate(simulator: &dyn LatencySimulator, call: SimulatedCall) {
    let delay = simulator.delay_for(call);
    if delay.is_zero() {
        return;
    }
    log::debug!("[SESSION] Simulating {} latency ({:?})", call.as_str(), delay);
    tokio::time::sleep(delay).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let config = LatencyConfig::default();
        assert_eq!(config.delay_for(SimulatedCall::Login), Duration::from_millis(1000));
        assert_eq!(config.delay_for(SimulatedCall::GoogleLogin), Duration::from_millis(1500));
        assert_eq!(
            config.delay_for(SimulatedCall::GenerateRecommendations),
            Duration::from_millis(2000)
        );
    }

    #[actix_rt::test]
    async fn test_zero_latency_returns_immediately() {
        let started = std::time::Instant::now();
        simulate(&LatencyConfig::none(), SimulatedCall::Signup).await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
