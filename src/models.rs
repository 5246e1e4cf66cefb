//! Model allow-list and validation.

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

use crate::ui::Style;

/// A chat model from the supported allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    Gpt4oMini,
    Gpt4o,
    Gpt41Nano,
    Gpt41Mini,
    Gpt41,
}

/// Every model the CLI accepts, in display order.
pub const ALLOWED_MODELS: &[Model] = &[
    Model::Gpt4oMini,
    Model::Gpt4o,
    Model::Gpt41Nano,
    Model::Gpt41Mini,
    Model::Gpt41,
];

impl Model {
    /// The identifier sent to the API.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt4o => "gpt-4o",
            Self::Gpt41Nano => "gpt-4.1-nano",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt41 => "gpt-4.1",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ALLOWED_MODELS
            .iter()
            .copied()
            .find(|model| model.id() == s)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Model '{s}' not in allowed list.\n\n\
                     Use --list-models to see available options."
                )
            })
    }
}

/// Prints the model allow-list to stdout, marking the default.
pub fn print_models() {
    println!("{}", Style::header("Available models"));
    for model in ALLOWED_MODELS {
        if *model == Model::default() {
            println!("  - {} {}", Style::value(model), Style::default_marker());
        } else {
            println!("  - {}", Style::value(model));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_models() {
        assert_eq!("gpt-4o-mini".parse::<Model>().unwrap(), Model::Gpt4oMini);
        assert_eq!("gpt-4o".parse::<Model>().unwrap(), Model::Gpt4o);
        assert_eq!("gpt-4.1-nano".parse::<Model>().unwrap(), Model::Gpt41Nano);
        assert_eq!("gpt-4.1-mini".parse::<Model>().unwrap(), Model::Gpt41Mini);
        assert_eq!("gpt-4.1".parse::<Model>().unwrap(), Model::Gpt41);
    }

    #[test]
    fn test_parse_rejects_unknown_model() {
        let err = "gpt-3.5-turbo".parse::<Model>().unwrap_err();
        assert!(err.to_string().contains("'gpt-3.5-turbo'"));
        assert!(err.to_string().contains("--list-models"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("GPT-4o".parse::<Model>().is_err());
        assert!("".parse::<Model>().is_err());
    }

    #[test]
    fn test_default_model() {
        assert_eq!(Model::default().id(), "gpt-4o-mini");
    }

    #[test]
    fn test_display_round_trips_through_id() {
        for model in ALLOWED_MODELS {
            assert_eq!(model.to_string().parse::<Model>().unwrap(), *model);
        }
    }
}
