use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_column() -> String {
    "awa_deg".into()
}

fn default_limit() -> Option<u64> {
    Some(2000)
}

fn default_round_decimals() -> Option<u32> {
    Some(2)
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CsvColumnParameters {
    #[schemars(
        with = "String",
        title = "CSV Path",
        description = "Path to a .csv file with a header row",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["csv"]
        )
    )]
    pub path: PathBuf,

    #[serde(default = "default_column")]
    #[schemars(title = "Column", description = "Header name of the column to filter")]
    pub column: String,

    #[serde(default)]
    #[schemars(
        title = "Reference Column",
        description = "Header name of a ground truth column, if any"
    )]
    pub reference_column: Option<String>,

    #[serde(default)]
    #[schemars(
        title = "Offset",
        description = "Data rows to skip before the window starts",
        range(min = 0)
    )]
    pub offset: u64,

    #[serde(default = "default_limit")]
    #[schemars(
        title = "Window Length",
        description = "Number of rows to read; empty = until end of file"
    )]
    pub limit: Option<u64>,

    #[serde(default = "default_round_decimals")]
    #[schemars(
        title = "Rounding",
        description = "Round values to this many decimals; empty = no rounding",
        range(max = 15)
    )]
    pub round_decimals: Option<u32>,
}

impl Default for CsvColumnParameters {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            column: default_column(),
            reference_column: None,
            offset: 0,
            limit: default_limit(),
            round_decimals: default_round_decimals(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct NoisySignalParameters {
    #[serde(default)]
    #[schemars(title = "Start", description = "Initial true value")]
    pub start: f64,

    #[serde(default)]
    #[schemars(
        title = "Drift",
        description = "Standard deviation of the true value's random walk per sample",
        range(min = 0.0)
    )]
    pub drift_std: f64,

    #[serde(default)]
    #[schemars(
        title = "Noise",
        description = "Standard deviation of the measurement noise",
        range(min = 0.0)
    )]
    pub noise_std: f64,

    #[serde(default)]
    #[schemars(
        title = "Missing (%)",
        description = "Percentage of samples replaced by missing values (0-100)",
        range(min = 0, max = 100)
    )]
    pub missing_pct: u32,

    #[serde(default)]
    #[schemars(title = "Angular", description = "Wrap values into (-180, 180] degrees?")]
    pub angular: bool,

    #[serde(default)]
    #[schemars(
        title = "Max Samples",
        description = "Upper bound on samples; empty = infinite"
    )]
    pub max_samples: Option<u64>,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StreamKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum StreamChoice {
    #[strum_discriminants(strum(
        message = "CSV Column",
        detailed_message = "One numeric column of a CSV file."
    ))]
    CsvColumn(CsvColumnParameters),

    #[strum_discriminants(strum(
        message = "Noisy Signal Generator",
        detailed_message = "Random-walk truth observed through Gaussian noise."
    ))]
    NoisySignal(NoisySignalParameters),
}

impl UIChoice for StreamChoice {
    type Kind = StreamKind;

    fn schema() -> Schema {
        schema_for!(StreamChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a sample source:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            StreamKind::CsvColumn => {
                serde_json::to_value(CsvColumnParameters::default()).unwrap_or_default()
            }
            StreamKind::NoisySignal => serde_json::to_value(NoisySignalParameters {
                noise_std: 1.0,
                max_samples: Some(2000),
                seed: DEFAULT_SEED,
                ..NoisySignalParameters::default()
            })
            .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::{EnumMessage, IntoEnumIterator};

    #[test]
    fn csv_params_fill_defaults() {
        let p: CsvColumnParameters = serde_json::from_value(json!({ "path": "data.csv" })).unwrap();
        assert_eq!(p.path, PathBuf::from("data.csv"));
        assert_eq!(p.column, "awa_deg");
        assert_eq!(p.offset, 0);
        assert_eq!(p.limit, Some(2000));
        assert_eq!(p.round_decimals, Some(2));
        assert_eq!(p.reference_column, None);
    }

    #[test]
    fn tagged_enum_serialization() {
        let choice = StreamChoice::NoisySignal(NoisySignalParameters::default());
        let v = serde_json::to_value(&choice).unwrap();
        assert_eq!(v["type"], "noisy-signal");
        assert_eq!(v["params"]["missing_pct"], 0);

        let back: StreamChoice = serde_json::from_value(v).unwrap();
        assert_eq!(back, choice);
    }

    #[test]
    fn default_params_rebuild_a_choice() {
        for kind in StreamKind::iter() {
            let params = StreamChoice::default_params(kind);
            let choice = StreamChoice::from_parts(kind, params).unwrap();
            let key: &'static str = kind.into();
            let v = serde_json::to_value(choice).unwrap();
            assert_eq!(v["type"], key);
        }
    }

    #[test]
    fn kinds_have_menu_messages() {
        for kind in StreamKind::iter() {
            assert!(kind.get_message().is_some());
            assert!(kind.get_detailed_message().is_some());
        }
        assert_eq!(StreamKind::CsvColumn.to_string(), "csv-column");
    }
}
