use crate::filters::UpdateMode;
use crate::ui::cli::wizard::{prompt_choice, prompt_parameters};
use crate::ui::types::choices::{ModelChoice, StreamChoice, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// The four construction parameters of a filter.
///
/// Defaults are tuned for apparent wind angle in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct FilterParameters {
    #[schemars(title = "Initial Estimate", description = "Starting estimate of the state")]
    pub initial_estimate: f64,

    #[schemars(
        title = "Initial Std",
        description = "Standard deviation of the starting estimate"
    )]
    pub std_initial: f64,

    #[schemars(
        title = "Measurement Std",
        description = "Standard deviation of the measurement noise"
    )]
    pub std_meas: f64,

    #[schemars(
        title = "Process Std",
        description = "Standard deviation of the per-sample process noise"
    )]
    pub std_noise: f64,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            initial_estimate: 0.0,
            std_initial: 0.0,
            std_meas: 0.635,
            std_noise: 0.148,
        }
    }
}

fn default_report_frequency() -> u64 {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FilterStreamParams {
    #[serde(default)]
    #[schemars(skip)]
    pub filter: FilterParameters,
    #[serde(default)]
    #[schemars(skip)]
    pub model: ModelChoice,
    #[schemars(skip)]
    pub stream: StreamChoice,
    #[serde(default)]
    #[schemars(skip)]
    pub mode: UpdateMode,

    #[serde(default)]
    #[schemars(
        title = "Max Samples",
        description = "Stop after this many samples (None = until the stream ends)"
    )]
    pub max_samples: Option<u64>,

    #[serde(default = "default_report_frequency")]
    #[schemars(
        title = "Report Frequency",
        description = "Take a progress snapshot every N samples",
        range(min = 1)
    )]
    pub report_frequency: u64,

    #[serde(default)]
    #[schemars(
        title = "Trace Output",
        description = "Write the estimate trace to this file (None = don't write)"
    )]
    pub trace_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Filter Stream",
        detailed_message = "Run a Kalman filter over a stream and report residuals."
    ))]
    FilterStream(FilterStreamParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::FilterStream => json!({
                "max_samples": null,
                "report_frequency": default_report_frequency(),
                "trace_path": null,
            }),
        }
    }

    fn subprompts<D: crate::ui::cli::drivers::PromptDriver>(
        driver: &D,
        kind: Self::Kind,
    ) -> anyhow::Result<Option<Map<String, Value>>> {
        match kind {
            TaskKind::FilterStream => {
                let stream = prompt_choice::<StreamChoice, _>(driver)?;
                let model = prompt_choice::<ModelChoice, _>(driver)?;
                let filter = prompt_parameters::<FilterParameters, _>(driver)?;

                let angular_default = match &stream {
                    StreamChoice::CsvColumn(_) => true,
                    StreamChoice::NoisySignal(p) => p.angular,
                };
                let angular = driver.ask_bool(
                    "Angular Update",
                    "Treat samples as degrees wrapping at ±180?",
                    angular_default,
                )?;
                let mode = if angular {
                    UpdateMode::Angular
                } else {
                    UpdateMode::Linear
                };

                let mut m = Map::new();
                m.insert("stream".into(), serde_json::to_value(stream)?);
                m.insert("model".into(), serde_json::to_value(model)?);
                m.insert("filter".into(), serde_json::to_value(filter)?);
                m.insert("mode".into(), serde_json::to_value(mode)?);
                Ok(Some(m))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{NoisySignalParameters, specs_for_kind};

    #[test]
    fn filter_parameters_defaults() {
        let p: FilterParameters = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p, FilterParameters::default());
        assert_eq!(p.std_meas, 0.635);
        assert_eq!(p.std_noise, 0.148);

        let p: FilterParameters =
            serde_json::from_value(json!({ "initial_estimate": 12.5 })).unwrap();
        assert_eq!(p.initial_estimate, 12.5);
        assert_eq!(p.std_initial, 0.0);
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let v = json!({
            "type": "filter-stream",
            "params": {
                "stream": { "type": "noisy-signal", "params": { "noise_std": 2.0 } }
            }
        });
        let TaskChoice::FilterStream(p) = serde_json::from_value(v).unwrap();
        assert_eq!(p.filter, FilterParameters::default());
        assert_eq!(p.model, ModelChoice::default());
        assert_eq!(p.mode, UpdateMode::Linear);
        assert_eq!(p.report_frequency, 100);
        assert_eq!(p.max_samples, None);
        assert_eq!(p.trace_path, None);
        assert_eq!(
            p.stream,
            StreamChoice::NoisySignal(NoisySignalParameters {
                noise_std: 2.0,
                seed: 42,
                ..NoisySignalParameters::default()
            })
        );
    }

    #[test]
    fn stream_is_required() {
        let v = json!({ "type": "filter-stream", "params": {} });
        assert!(serde_json::from_value::<TaskChoice>(v).is_err());
    }

    #[test]
    fn prompted_fields_exclude_nested_choices() {
        let specs = specs_for_kind(&TaskChoice::schema(), "filter-stream").unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["max_samples", "report_frequency", "trace_path"]);
    }

    #[test]
    fn default_params_complete_the_task_with_subprompt_fields() {
        let mut params = TaskChoice::default_params(TaskKind::FilterStream);
        params["stream"] = serde_json::to_value(StreamChoice::NoisySignal(
            NoisySignalParameters::default(),
        ))
        .unwrap();
        params["mode"] = json!("angular");

        let TaskChoice::FilterStream(p) =
            TaskChoice::from_parts(TaskKind::FilterStream, params).unwrap();
        assert_eq!(p.mode, UpdateMode::Angular);
        assert_eq!(p.report_frequency, 100);
    }
}
