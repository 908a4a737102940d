//! Per-token pricing for known Groq-hosted models (USD).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// (input, output) cost per token for `model`, if known.
pub fn model_cost(model: &str) -> Option<(Decimal, Decimal)> {
    let per_million = match model {
        "llama-3.1-8b-instant" => (dec!(0.05), dec!(0.08)),
        "llama-3.3-70b-versatile" => (dec!(0.59), dec!(0.79)),
        "llama3-8b-8192" => (dec!(0.05), dec!(0.08)),
        "llama3-70b-8192" => (dec!(0.59), dec!(0.79)),
        "gemma2-9b-it" => (dec!(0.20), dec!(0.20)),
        _ => return None,
    };
    let million = dec!(1_000_000);
    Some((per_million.0 / million, per_million.1 / million))
}
