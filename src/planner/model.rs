//! User profile and plan data models.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::llm::TokenUsage;

pub const AGE_RANGE: RangeInclusive<u32> = 10..=100;
pub const WEIGHT_KG_RANGE: RangeInclusive<u32> = 30..=200;
pub const HEIGHT_CM_RANGE: RangeInclusive<u32> = 120..=230;

/// How active the user is day to day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl ActivityLevel {
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

/// Preferred eating style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietPreference {
    #[default]
    Balanced,
    Vegetarian,
    Keto,
    #[serde(rename = "Low Carb")]
    LowCarb,
}

impl DietPreference {
    pub const ALL: [Self; 4] = [Self::Balanced, Self::Vegetarian, Self::Keto, Self::LowCarb];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Balanced => "Balanced",
            Self::Vegetarian => "Vegetarian",
            Self::Keto => "Keto",
            Self::LowCarb => "Low Carb",
        }
    }
}

/// What the user wants to get out of training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessGoal {
    #[default]
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    Endurance,
    Flexibility,
}

impl FitnessGoal {
    pub const ALL: [Self; 4] = [
        Self::WeightLoss,
        Self::MuscleGain,
        Self::Endurance,
        Self::Flexibility,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::MuscleGain => "Muscle Gain",
            Self::Endurance => "Endurance",
            Self::Flexibility => "Flexibility",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(ActivityLevel, DietPreference, FitnessGoal);

/// Biometric inputs for one plan request. Built fresh per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub weight_kg: u32,
    pub height_cm: u32,
    pub activity_level: ActivityLevel,
    pub diet_preference: DietPreference,
    pub fitness_goal: FitnessGoal,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            age: 25,
            weight_kg: 70,
            height_cm: 170,
            activity_level: ActivityLevel::default(),
            diet_preference: DietPreference::default(),
            fitness_goal: FitnessGoal::default(),
        }
    }
}

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

impl UserProfile {
    /// Pull every numeric field into its allowed range.
    pub fn clamped(mut self) -> Self {
        self.age = clamp(self.age, &AGE_RANGE);
        self.weight_kg = clamp(self.weight_kg, &WEIGHT_KG_RANGE);
        self.height_cm = clamp(self.height_cm, &HEIGHT_CM_RANGE);
        self
    }
}

/// The combined plan returned to the shell.
#[derive(Debug, Clone, Serialize)]
pub struct FinalPlan {
    pub id: Uuid,
    pub name: String,
    /// Markdown text produced by the combiner stage.
    pub content: String,
    pub usage: TokenUsage,
    /// `None` when the model's pricing is unknown.
    pub estimated_cost: Option<Decimal>,
    pub generated_at: DateTime<Utc>,
}
