//! Pipeline orchestrator: runs diet, fitness and combiner stages in order.
//!
//! Flow:
//! 1. Diet agent on the full biometric profile
//! 2. Fitness agent on the profile minus diet preference
//! 3. Combiner agent on name + both outputs
//!
//! Any failure aborts the run. There is no partial plan.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info};
use uuid::Uuid;

use super::Stage;
use super::agent::{StageAgent, StageOutput};
use super::model::{FinalPlan, UserProfile};
use super::prompts::{combine_prompt, diet_prompt, fitness_prompt};
use crate::error::GenerationError;
use crate::llm::{LlmProvider, TokenUsage};

/// Owns the three stage agents, all sharing one provider.
pub struct PlanOrchestrator {
    llm: Arc<dyn LlmProvider>,
    diet: StageAgent,
    fitness: StageAgent,
    combiner: StageAgent,
}

impl PlanOrchestrator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self::with_temperature(llm, None)
    }

    pub fn with_temperature(llm: Arc<dyn LlmProvider>, temperature: Option<f32>) -> Self {
        let agent = |stage| StageAgent::new(stage, Arc::clone(&llm)).with_temperature(temperature);
        Self {
            diet: agent(Stage::Diet),
            fitness: agent(Stage::Fitness),
            combiner: agent(Stage::Combiner),
            llm,
        }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Produce a combined plan for `profile`.
    pub async fn generate_plan(
        &self,
        profile: &UserProfile,
    ) -> Result<FinalPlan, GenerationError> {
        let id = Uuid::new_v4();
        info!(plan_id = %id, model = self.model_name(), "Generating plan");

        let mut usage = TokenUsage::default();

        let diet = self.run_stage(&self.diet, &diet_prompt(profile), id).await?;
        usage.add(diet.usage);

        let workout = self
            .run_stage(&self.fitness, &fitness_prompt(profile), id)
            .await?;
        usage.add(workout.usage);

        let merged = self
            .run_stage(
                &self.combiner,
                &combine_prompt(&profile.name, &diet.content, &workout.content),
                id,
            )
            .await?;
        usage.add(merged.usage);

        let cost = self.llm.cost_per_token();
        let estimated_cost = (cost != (Decimal::ZERO, Decimal::ZERO)).then(|| usage.cost(cost));

        info!(
            plan_id = %id,
            total_tokens = usage.total(),
            "Plan ready"
        );

        Ok(FinalPlan {
            id,
            name: profile.name.clone(),
            content: merged.content,
            usage,
            estimated_cost,
            generated_at: Utc::now(),
        })
    }

    async fn run_stage(
        &self,
        agent: &StageAgent,
        prompt: &str,
        plan_id: Uuid,
    ) -> Result<StageOutput, GenerationError> {
        info!(plan_id = %plan_id, stage = %agent.stage(), "Running stage");
        agent.run(prompt).await.map_err(|e| {
            error!(plan_id = %plan_id, stage = %agent.stage(), error = %e, "Stage failed");
            GenerationError::new(agent.stage(), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::llm::mock::{ScriptedLlm, network_down};
    use crate::planner::model::{ActivityLevel, DietPreference, FitnessGoal};

    fn jane() -> UserProfile {
        UserProfile {
            name: "Jane".to_string(),
            age: 30,
            weight_kg: 65,
            height_cm: 165,
            activity_level: ActivityLevel::Moderate,
            diet_preference: DietPreference::Vegetarian,
            fitness_goal: FitnessGoal::WeightLoss,
        }
    }

    #[tokio::test]
    async fn end_to_end_with_stub() {
        let llm = Arc::new(ScriptedLlm::texts(&["DIET_X", "WORKOUT_Y", "MERGED_Z"]));
        let orchestrator = PlanOrchestrator::new(llm.clone());

        let plan = orchestrator.generate_plan(&jane()).await.unwrap();
        assert_eq!(plan.content, "MERGED_Z");
        assert_eq!(plan.name, "Jane");

        let requests = llm.requests();
        assert_eq!(requests.len(), 3);
        let combine = requests[2].user_prompt().unwrap();
        assert!(combine.contains("Jane"));
        assert!(combine.contains("DIET_X"));
        assert!(combine.contains("WORKOUT_Y"));
    }

    #[tokio::test]
    async fn stages_run_in_order_with_their_instructions() {
        let llm = Arc::new(ScriptedLlm::texts(&["d", "w", "m"]));
        PlanOrchestrator::new(llm.clone())
            .generate_plan(&jane())
            .await
            .unwrap();

        let requests = llm.requests();
        assert!(requests[0].system_prompt().unwrap().contains("daily diet plan"));
        assert!(requests[1].system_prompt().unwrap().contains("workout plan"));
        assert!(requests[2].system_prompt().unwrap().contains("holistic plan"));

        assert!(requests[0].user_prompt().unwrap().contains("Diet preference: Vegetarian"));
        let fitness = requests[1].user_prompt().unwrap();
        assert!(!fitness.contains("Vegetarian"));
        assert!(fitness.contains("Fitness goal: Weight Loss"));
    }

    #[tokio::test]
    async fn diet_failure_skips_remaining_stages() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Err(network_down()),
            Ok("WORKOUT_Y".into()),
            Ok("MERGED_Z".into()),
        ]));
        let orchestrator = PlanOrchestrator::new(llm.clone());

        let err = orchestrator.generate_plan(&jane()).await.unwrap_err();
        assert_eq!(err.stage, Stage::Diet);
        assert_eq!(err.kind(), FailureKind::Network);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn combiner_failure_returns_no_partial_plan() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Ok("DIET_X".into()),
            Ok("WORKOUT_Y".into()),
            Err(crate::error::LlmError::AuthFailed {
                provider: "mock".into(),
            }),
        ]));
        let err = PlanOrchestrator::new(llm.clone())
            .generate_plan(&jane())
            .await
            .unwrap_err();
        assert_eq!(err.stage, Stage::Combiner);
        assert_eq!(err.kind(), FailureKind::Auth);
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn blank_stage_output_is_an_error() {
        let llm = Arc::new(ScriptedLlm::texts(&["DIET_X", "  \n", "MERGED_Z"]));
        let err = PlanOrchestrator::new(llm.clone())
            .generate_plan(&jane())
            .await
            .unwrap_err();
        assert_eq!(err.stage, Stage::Fitness);
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn usage_and_cost_are_summed() {
        let llm = Arc::new(ScriptedLlm::texts(&["a", "b", "c"]));
        let plan = PlanOrchestrator::new(llm).generate_plan(&jane()).await.unwrap();
        assert_eq!(plan.usage.input_tokens, 300);
        assert_eq!(plan.usage.output_tokens, 150);
        // 300 * 0.000001 + 150 * 0.000002
        assert_eq!(plan.estimated_cost, Some(Decimal::new(6, 4)));
    }

    #[tokio::test]
    async fn temperature_is_forwarded() {
        let llm = Arc::new(ScriptedLlm::texts(&["a", "b", "c"]));
        PlanOrchestrator::with_temperature(llm.clone(), Some(0.3))
            .generate_plan(&jane())
            .await
            .unwrap();
        assert!(llm.requests().iter().all(|r| r.temperature == Some(0.3)));
    }
}
