use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

/// A serde-tagged enum (`{"type": .., "params": ..}`) the wizard offers as a
/// menu of kinds.
///
/// `Kind` is the strum discriminant: its kebab-case name is the serde tag and
/// its message is the menu text.
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    fn schema() -> Schema;

    fn prompt_label() -> &'static str {
        "Choose a type:"
    }
    fn prompt_help() -> Option<&'static str> {
        Some("↑/↓ to navigate, ↵ to select")
    }

    /// Menu line for `kind`: its message, then the detailed message dimmed.
    fn menu_label(kind: Self::Kind) -> String {
        let label = kind.get_message().unwrap_or_else(|| kind.into());
        match kind.get_detailed_message() {
            Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
            _ => label.to_string(),
        }
    }

    /// Starting answers for `kind`. These win over schema defaults.
    fn default_params(kind: Self::Kind) -> Value;

    /// Params outside the schema, e.g. a nested stream or model choice.
    fn subprompts<D: PromptDriver>(
        _driver: &D,
        _kind: Self::Kind,
    ) -> Result<Option<Map<String, Value>>> {
        Ok(None)
    }

    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        serde_json::from_value(json!({ "type": key, "params": params }))
            .with_context(|| format!("invalid parameters for '{key}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{ModelChoice, ModelKind};

    #[test]
    fn menu_label_dims_the_description() {
        let label = ModelChoice::menu_label(ModelKind::MeanReverting);
        assert!(label.starts_with("Mean Reverting  \x1b[2m"), "{label:?}");
        assert!(label.ends_with(RESET));
    }

    #[test]
    fn from_parts_names_the_kind_on_bad_params() {
        let err = ModelChoice::from_parts(ModelKind::ConstantRate, json!({ "rate": "fast" }))
            .unwrap_err();
        assert!(err.to_string().contains("constant-rate"), "{err}");
    }
}
