//! AI health & fitness planner: three LLM calls behind a form.

pub mod config;
pub mod error;
pub mod llm;
pub mod planner;
pub mod shell;

use std::sync::Arc;

use config::PlannerConfig;
use planner::{PlanHandler, PlanOrchestrator};

/// Wire the provider, orchestrator and handler from a loaded config.
pub fn build_handler(config: &PlannerConfig) -> error::Result<Arc<PlanHandler>> {
    let llm = llm::create_provider(&config.llm)?;
    let orchestrator = PlanOrchestrator::with_temperature(llm, config.llm.temperature);
    Ok(PlanHandler::new(orchestrator))
}
