//! Command handler for the "generate plan" trigger.
//!
//! Every front end calls [`PlanHandler::on_generate_plan`]. Only one run may
//! be in flight at a time; a second trigger during a run is rejected rather
//! than queued, so the displayed result always belongs to the request that
//! produced it.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use super::model::{FinalPlan, UserProfile};
use super::orchestrator::PlanOrchestrator;
use crate::error::PlanRequestError;

pub struct PlanHandler {
    orchestrator: PlanOrchestrator,
    in_flight: Semaphore,
}

impl PlanHandler {
    pub fn new(orchestrator: PlanOrchestrator) -> Arc<Self> {
        Arc::new(Self {
            orchestrator,
            in_flight: Semaphore::new(1),
        })
    }

    pub fn model_name(&self) -> &str {
        self.orchestrator.model_name()
    }

    /// Whether a run is currently in progress.
    pub fn is_busy(&self) -> bool {
        self.in_flight.available_permits() == 0
    }

    /// Clamp the profile, then run the pipeline once.
    pub async fn on_generate_plan(
        &self,
        profile: UserProfile,
    ) -> Result<FinalPlan, PlanRequestError> {
        let Ok(_permit) = self.in_flight.try_acquire() else {
            warn!(name = %profile.name, "Rejecting plan request: another run is in flight");
            return Err(PlanRequestError::InFlight);
        };

        let profile = profile.clamped();
        info!(
            name = %profile.name,
            age = profile.age,
            activity = %profile.activity_level,
            goal = %profile.fitness_goal,
            "Plan requested"
        );

        Ok(self.orchestrator.generate_plan(&profile).await?)
    }
}
