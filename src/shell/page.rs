//! HTML rendering for the planner form and results.

use pulldown_cmark::escape::escape_html;
use pulldown_cmark::{Event, Options, Parser, Tag, html};

use crate::planner::model::{AGE_RANGE, HEIGHT_CM_RANGE, WEIGHT_KG_RANGE};
use crate::planner::{ActivityLevel, DietPreference, FinalPlan, FitnessGoal, UserProfile};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;display:flex;min-height:100vh}\
aside{width:300px;padding:1.5rem;background:#f0f2f6}\
aside label{display:block;margin-top:.8rem;font-size:.9rem}\
aside input,aside select{width:100%;padding:.4rem;margin-top:.2rem;box-sizing:border-box}\
aside button{margin-top:1.2rem;width:100%;padding:.6rem;font-size:1rem}\
main{flex:1;padding:1.5rem 3rem}\
.banner{padding:.8rem 1rem;border-radius:.4rem;margin:1rem 0}\
.ok{background:#e3f6e8;color:#14532d}\
.err{background:#fde8e8;color:#7f1d1d}\
.busy{background:#fff7db;color:#713f12}\
pre.diag{background:#fafafa;border:1px solid #eee;padding:.8rem;white-space:pre-wrap}\
.meta{color:#6b7280;font-size:.8rem}";

/// What the main panel shows.
pub enum Outcome<'a> {
    Empty,
    Ready(&'a FinalPlan),
    Failed { detail: &'a str },
    Busy,
}

/// Link schemes allowed through from model output.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String cannot fail.
    let _ = escape_html(&mut out, text);
    out
}

/// Relative URLs and the allow-listed schemes. A colon after a path, query
/// or fragment delimiter does not start a scheme.
fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    match url.find(':') {
        None => true,
        Some(colon) => {
            let scheme = &url[..colon];
            scheme.contains(['/', '?', '#'])
                || SAFE_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s))
        }
    }
}

/// Render plan markdown to HTML.
///
/// Raw HTML in the model output is escaped, and links or images pointing at
/// any other scheme (`javascript:`, `data:` and the like) are reduced to
/// their text.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link(_, dest, _) | Tag::Image(_, dest, _))
        | Event::End(Tag::Link(_, dest, _) | Tag::Image(_, dest, _))
            if !is_safe_url(&dest) =>
        {
            None
        }
        other => Some(other),
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn number_field(
    label: &str,
    name: &str,
    value: u32,
    range: &std::ops::RangeInclusive<u32>,
) -> String {
    format!(
        r#"<label>{label}<input type="number" name="{name}" min="{min}" max="{max}" value="{value}" required></label>"#,
        min = range.start(),
        max = range.end(),
    )
}

fn select_field<T: PartialEq + Copy>(
    label: &str,
    name: &str,
    options: &[T],
    selected: T,
    text: impl Fn(&T) -> &'static str,
) -> String {
    let mut out = format!(r#"<label>{label}<select name="{name}">"#);
    for option in options {
        let value = text(option);
        let marker = if *option == selected { " selected" } else { "" };
        out.push_str(&format!(r#"<option value="{value}"{marker}>{value}</option>"#));
    }
    out.push_str("</select></label>");
    out
}

fn form(profile: &UserProfile, busy: bool) -> String {
    let disabled = if busy { " disabled" } else { "" };
    [
        r#"<form method="post" action="/plan"><h2>🧾 Your Details</h2>"#.to_string(),
        format!(
            r#"<label>Name<input type="text" name="name" value="{}"></label>"#,
            escaped(&profile.name)
        ),
        number_field("Age", "age", profile.age, &AGE_RANGE),
        number_field("Weight (kg)", "weight_kg", profile.weight_kg, &WEIGHT_KG_RANGE),
        number_field("Height (cm)", "height_cm", profile.height_cm, &HEIGHT_CM_RANGE),
        select_field(
            "Activity Level",
            "activity_level",
            &ActivityLevel::ALL,
            profile.activity_level,
            ActivityLevel::label,
        ),
        select_field(
            "Diet Preference",
            "diet_preference",
            &DietPreference::ALL,
            profile.diet_preference,
            DietPreference::label,
        ),
        select_field(
            "Fitness Goal",
            "fitness_goal",
            &FitnessGoal::ALL,
            profile.fitness_goal,
            FitnessGoal::label,
        ),
        format!(r#"<button type="submit"{disabled}>🚀 Generate Plan</button></form>"#),
    ]
    .concat()
}

fn outcome(outcome: &Outcome<'_>) -> String {
    match outcome {
        Outcome::Empty => String::new(),
        Outcome::Ready(plan) => {
            let cost = plan
                .estimated_cost
                .map(|c| format!(", est. ${}", c.round_dp(6)))
                .unwrap_or_default();
            format!(
                r#"<div class="banner ok">✅ Your plan is ready!</div><article>{body}</article><p class="meta">Plan {id} · {tokens} tokens{cost}</p>"#,
                body = markdown_to_html(&plan.content),
                id = plan.id,
                tokens = plan.usage.total(),
            )
        }
        Outcome::Failed { detail } => format!(
            r#"<div class="banner err">❌ Something went wrong while generating the plan.</div><pre class="diag">{}</pre>"#,
            escaped(detail)
        ),
        Outcome::Busy => r#"<div class="banner busy">⏳ A plan is already being generated. Try again when it finishes.</div>"#.to_string(),
    }
}

/// Render the full page.
pub fn render(model: &str, profile: &UserProfile, result: &Outcome<'_>) -> String {
    format!(
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><title>AI Health &amp; Fitness Planner</title><style>{STYLE}</style></head><body><aside>{form}</aside><main><h1>🏋️ AI Health &amp; Fitness Planner</h1><p class="meta">Personalized diet &amp; workout plans powered by Groq ({model})</p>{outcome}<hr><p>💡 <em>Consistency beats intensity. Stay healthy!</em></p></main></body></html>"#,
        form = form(profile, matches!(result, Outcome::Busy)),
        model = escaped(model),
        outcome = outcome(result),
    )
}
