use crate::core::QueryOutcome;
use crate::domain::model::ZIP_NOT_FOUND_MESSAGE;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(outcomes: &[QueryOutcome], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(outcomes.iter().map(render_text).collect::<Vec<_>>().join("\n")),
        OutputFormat::Json => render_json(outcomes),
    }
}

pub fn render_text(outcome: &QueryOutcome) -> String {
    let result = match outcome {
        QueryOutcome::NotFound { zip } => {
            return format!("{}: {}\n", zip, outcome.user_message().unwrap_or(ZIP_NOT_FOUND_MESSAGE));
        }
        QueryOutcome::Found(result) => result,
    };

    if result.matches.is_empty() {
        return format!("{}: no markets found nearby.\n", result.zip);
    }

    let mut out = format!(
        "{}: {} market{} nearby\n",
        result.zip,
        result.matches.len(),
        if result.matches.len() == 1 { "" } else { "s" }
    );
    for m in &result.matches {
        out.push_str(&format!("{:>6.1} mi  {}", m.distance_miles, m.market.name));
        if !m.market.address.is_empty() {
            out.push_str(&format!(", {}", m.market.address));
        }
        out.push('\n');
        if !m.market.description.is_empty() {
            out.push_str(&format!("           {}\n", m.market.description));
        }
    }
    out
}

pub fn render_json(outcomes: &[QueryOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}
