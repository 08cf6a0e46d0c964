use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoModelParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct ConstantRateParameters {
    #[serde(default)]
    #[schemars(title = "Rate", description = "Change added to the estimate every sample")]
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MeanRevertingParameters {
    #[serde(default)]
    #[schemars(title = "Mean", description = "Level the estimate decays toward")]
    pub mean: f64,

    #[schemars(
        title = "Retention",
        description = "Share of the distance to the mean kept per sample (0..1)",
        range(min = 0.0, max = 1.0)
    )]
    pub retention: f64,
}

impl Default for MeanRevertingParameters {
    fn default() -> Self {
        Self {
            mean: 0.0,
            retention: 0.95,
        }
    }
}

/// State propagation applied in the predict step.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ModelKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ModelChoice {
    #[strum_discriminants(strum(
        message = "Identity",
        detailed_message = "The state is expected to stay where it is."
    ))]
    Identity(NoModelParams),

    #[strum_discriminants(strum(
        message = "Constant Rate",
        detailed_message = "The state moves by a fixed amount every sample."
    ))]
    ConstantRate(ConstantRateParameters),

    #[strum_discriminants(strum(
        message = "Mean Reverting",
        detailed_message = "The state decays toward a fixed mean."
    ))]
    MeanReverting(MeanRevertingParameters),
}

impl Default for ModelChoice {
    fn default() -> Self {
        ModelChoice::Identity(NoModelParams {})
    }
}

impl UIChoice for ModelChoice {
    type Kind = ModelKind;

    fn schema() -> Schema {
        schema_for!(ModelChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a motion model:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            ModelKind::Identity => json!({}),
            ModelKind::ConstantRate => {
                serde_json::to_value(ConstantRateParameters::default()).unwrap_or_default()
            }
            ModelKind::MeanReverting => {
                serde_json::to_value(MeanRevertingParameters::default()).unwrap_or_default()
            }
        }
    }
}
