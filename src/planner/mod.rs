//! The three-stage plan pipeline.
//!
//! A profile goes through the diet agent, then the fitness agent, then the
//! combiner agent, which merges the two earlier outputs into the final plan.
//! Front ends reach the pipeline only through [`PlanHandler`].

pub mod agent;
pub mod handler;
pub mod model;
pub mod orchestrator;
pub mod prompts;

use std::fmt;

use serde::Serialize;

pub use agent::{StageAgent, StageOutput};
pub use handler::PlanHandler;
pub use model::{ActivityLevel, DietPreference, FinalPlan, FitnessGoal, UserProfile};
pub use orchestrator::PlanOrchestrator;

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Diet,
    Fitness,
    Combiner,
}

impl Stage {
    pub fn instructions(&self) -> &'static [&'static str] {
        match self {
            Self::Diet => prompts::DIET_INSTRUCTIONS,
            Self::Fitness => prompts::FITNESS_INSTRUCTIONS,
            Self::Combiner => prompts::COMBINER_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diet => write!(f, "diet"),
            Self::Fitness => write!(f, "fitness"),
            Self::Combiner => write!(f, "combiner"),
        }
    }
}
