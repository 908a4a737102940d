//! Stage instructions and per-stage user prompts.

use super::model::UserProfile;

pub const DIET_INSTRUCTIONS: &[&str] = &[
    "Create a personalized daily diet plan.",
    "Include breakfast, lunch, dinner, and snacks.",
    "Mention calories and macros briefly.",
    "Keep it practical and easy to follow.",
];

pub const FITNESS_INSTRUCTIONS: &[&str] = &[
    "Create a personalized workout plan.",
    "Include warm-up, main workout, and cooldown.",
    "Adapt to the user's fitness goal and activity level.",
];

pub const COMBINER_INSTRUCTIONS: &[&str] = &[
    "Combine diet and workout plans into one holistic plan.",
    "Add motivation, recovery tips, and lifestyle advice.",
    "Keep the tone encouraging and simple.",
];

/// Build a system prompt from an instruction list.
pub fn system_prompt(instructions: &[&str]) -> String {
    let mut prompt = String::from(
        "You are part of a personal health and fitness planning service.\n\nInstructions:\n",
    );
    for line in instructions {
        prompt.push_str("- ");
        prompt.push_str(line);
        prompt.push('\n');
    }
    prompt.push_str("\nUse markdown to format your answers.");
    prompt
}

/// Prompt for the diet stage.
pub fn diet_prompt(profile: &UserProfile) -> String {
    format!(
        "User details:\n\
         Age: {age}\n\
         Weight: {weight} kg\n\
         Height: {height} cm\n\
         Activity level: {activity}\n\
         Diet preference: {diet}\n\
         Fitness goal: {goal}\n",
        age = profile.age,
        weight = profile.weight_kg,
        height = profile.height_cm,
        activity = profile.activity_level,
        diet = profile.diet_preference,
        goal = profile.fitness_goal,
    )
}

/// Prompt for the fitness stage. Diet preference is left out: the workout is diet-agnostic.
pub fn fitness_prompt(profile: &UserProfile) -> String {
    format!(
        "User details:\n\
         Age: {age}\n\
         Weight: {weight} kg\n\
         Height: {height} cm\n\
         Activity level: {activity}\n\
         Fitness goal: {goal}\n",
        age = profile.age,
        weight = profile.weight_kg,
        height = profile.height_cm,
        activity = profile.activity_level,
        goal = profile.fitness_goal,
    )
}

/// Prompt for the combiner stage. Both stage outputs are embedded verbatim.
pub fn combine_prompt(name: &str, diet: &str, workout: &str) -> String {
    format!(
        "User Name: {name}\n\n\
         ----------------\n\
         DIET PLAN:\n\
         {diet}\n\n\
         ----------------\n\
         WORKOUT PLAN:\n\
         {workout}\n\n\
         Combine these into one clear, structured health and fitness plan.\n"
    )
}
