//! Command-line front end: one profile in, one plan out.

use std::io::Write;

use clap::{Args, ValueEnum};

use crate::error::PlanRequestError;
use crate::planner::{ActivityLevel, DietPreference, FitnessGoal, PlanHandler, UserProfile};

/// Profile flags for the `plan` subcommand. Ranges match the web form.
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[arg(long, default_value = "John Doe")]
    pub name: String,

    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(10..=100))]
    pub age: u32,

    #[arg(
        long = "weight",
        default_value_t = 70,
        value_parser = clap::value_parser!(u32).range(30..=200)
    )]
    pub weight_kg: u32,

    #[arg(
        long = "height",
        default_value_t = 170,
        value_parser = clap::value_parser!(u32).range(120..=230)
    )]
    pub height_cm: u32,

    #[arg(long = "activity", value_enum, default_value_t = ActivityArg::Low)]
    pub activity_level: ActivityArg,

    #[arg(long = "diet", value_enum, default_value_t = DietArg::Balanced)]
    pub diet_preference: DietArg,

    #[arg(long = "goal", value_enum, default_value_t = GoalArg::WeightLoss)]
    pub fitness_goal: GoalArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActivityArg {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DietArg {
    Balanced,
    Vegetarian,
    Keto,
    LowCarb,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GoalArg {
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
}

impl From<ActivityArg> for ActivityLevel {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Low => Self::Low,
            ActivityArg::Moderate => Self::Moderate,
            ActivityArg::High => Self::High,
        }
    }
}

impl From<DietArg> for DietPreference {
    fn from(arg: DietArg) -> Self {
        match arg {
            DietArg::Balanced => Self::Balanced,
            DietArg::Vegetarian => Self::Vegetarian,
            DietArg::Keto => Self::Keto,
            DietArg::LowCarb => Self::LowCarb,
        }
    }
}

impl From<GoalArg> for FitnessGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::WeightLoss => Self::WeightLoss,
            GoalArg::MuscleGain => Self::MuscleGain,
            GoalArg::Endurance => Self::Endurance,
            GoalArg::Flexibility => Self::Flexibility,
        }
    }
}

impl From<ProfileArgs> for UserProfile {
    fn from(args: ProfileArgs) -> Self {
        Self {
            name: args.name,
            age: args.age,
            weight_kg: args.weight_kg,
            height_cm: args.height_cm,
            activity_level: args.activity_level.into(),
            diet_preference: args.diet_preference.into(),
            fitness_goal: args.fitness_goal.into(),
        }
    }
}

/// Run the pipeline once and print the plan to `out`.
///
/// Progress and diagnostics go to stderr. Returns whether a plan was produced.
pub async fn run_once<W: Write>(handler: &PlanHandler, profile: UserProfile, out: &mut W) -> bool {
    eprintln!("⏳ Creating your personalized plan for {}...", profile.name);

    match handler.on_generate_plan(profile).await {
        Ok(plan) => {
            eprintln!("✅ Your plan is ready!");
            if let Err(e) = writeln!(out, "{}", plan.content) {
                tracing::error!("Failed to write plan: {}", e);
                return false;
            }
            let cost = plan
                .estimated_cost
                .map(|c| format!(", est. ${}", c.round_dp(6)))
                .unwrap_or_default();
            eprintln!("   {} tokens{}", plan.usage.total(), cost);
            true
        }
        Err(PlanRequestError::InFlight) => {
            eprintln!("⚠️  A plan is already being generated");
            false
        }
        Err(PlanRequestError::Generation(e)) => {
            eprintln!("❌ Something went wrong while generating the plan.");
            eprintln!("   {}", e);
            false
        }
    }
}
