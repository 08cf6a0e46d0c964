use anyhow::{Context, Result, bail};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{
    FieldKind, FieldSpec, UIChoice, schema_for, specs_for_kind, specs_for_struct,
};

/// Asks for a kind of `C`, then for every parameter its schema describes.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let kinds: Vec<C::Kind> = C::Kind::iter().collect();
    let labels: Vec<String> = kinds.iter().map(|k| C::menu_label(*k)).collect();

    let idx = driver.ask_select(C::prompt_label(), C::prompt_help(), &labels)?;
    let kind = *kinds
        .get(idx)
        .with_context(|| format!("no option at index {idx}"))?;

    let key: &'static str = kind.into();
    let specs = specs_for_kind(&C::schema(), key)?;
    let mut params = ask_fields(driver, &specs, &C::default_params(kind))?;

    if let Some(extra) = C::subprompts(driver, kind)? {
        params.extend(extra);
    }
    C::from_parts(kind, Value::Object(params))
}

/// Fills a plain parameter struct field by field, starting from its defaults.
pub fn prompt_parameters<T, D>(driver: &D) -> Result<T>
where
    T: JsonSchema + Serialize + DeserializeOwned + Default,
    D: PromptDriver,
{
    let specs = specs_for_struct(&schema_for::<T>())?;
    let defaults = serde_json::to_value(T::default())?;
    let params = ask_fields(driver, &specs, &defaults)?;
    serde_json::from_value(Value::Object(params)).context("assembling parameters")
}

fn ask_fields<D: PromptDriver>(
    driver: &D,
    specs: &[FieldSpec],
    defaults: &Value,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    for s in specs {
        let init = defaults
            .get(&s.name)
            .filter(|v| !v.is_null())
            .or(s.default.as_ref().filter(|v| !v.is_null()))
            .cloned();
        let value = ask_field(driver, s, init)?;
        params.insert(s.name.clone(), value);
    }
    Ok(params)
}

fn ask_field<D: PromptDriver>(driver: &D, s: &FieldSpec, init: Option<Value>) -> Result<Value> {
    let help = s.description.as_deref().unwrap_or("");

    if let Some(exts) = &s.file_extensions {
        let exts: Vec<&str> = exts.iter().map(String::as_str).collect();
        let def = init
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let path = prompt_path_until_ok(driver, &s.title, help, def, &exts)?;
        return Ok(Value::from(path.to_string_lossy().into_owned()));
    }

    if s.nullable {
        return ask_optional(driver, s, help, init);
    }

    Ok(match s.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(driver.ask_bool(&s.title, help, def)?)
        }
        FieldKind::String => {
            let def = init
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            Value::from(driver.ask_string(&s.title, help, &def)?)
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(driver.ask_u64(
                &s.title,
                help,
                def,
                s.min.map(|x| x.max(0.0) as u64),
                s.max.map(|x| x as u64),
            )?)
        }
        FieldKind::Number => {
            let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
        }
    })
}

/// `Option<T>` fields are asked as free text; a blank answer means `null`.
fn ask_optional<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    help: &str,
    init: Option<Value>,
) -> Result<Value> {
    let def_txt = match init {
        Some(Value::String(t)) => t,
        Some(v) => v.to_string(),
        None => String::new(),
    };
    let answer = driver.ask_string(&s.title, &format!("{help}\n(leave blank for none)"), &def_txt)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(Value::Null);
    }

    Ok(match s.kind {
        FieldKind::Integer => {
            let n: u64 = answer
                .parse()
                .with_context(|| format!("invalid integer for {}", s.title))?;
            if let Some(max) = s.max {
                if n as f64 > max {
                    bail!("{} must be ≤ {max}", s.title);
                }
            }
            Value::from(n)
        }
        FieldKind::Number => {
            let x: f64 = answer
                .parse()
                .with_context(|| format!("invalid number for {}", s.title))?;
            Value::from(x)
        }
        FieldKind::Boolean => {
            let b: bool = answer
                .parse()
                .with_context(|| format!("invalid boolean for {}", s.title))?;
            Value::Bool(b)
        }
        FieldKind::String => Value::from(answer),
    })
}

fn validate_path_str(input: &str, allowed_exts: &[&str]) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !allowed_exts.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
        }
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => eprintln!("✗ {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::UpdateMode;
    use crate::testing::ScriptedDriver;
    use crate::ui::types::choices::{
        CsvColumnParameters, FilterParameters, ModelChoice, NoModelParams, StreamChoice,
        TaskChoice,
    };
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn filter_parameters_keep_defaults_on_empty_answers() {
        let driver = ScriptedDriver::new(["", "5", "", ""]);
        let p: FilterParameters = prompt_parameters(&driver).unwrap();
        assert_eq!(p.initial_estimate, 0.0);
        assert_eq!(p.std_initial, 5.0);
        assert_eq!(p.std_meas, 0.635);
        assert_eq!(p.std_noise, 0.148);
        assert!(driver.is_exhausted());
    }

    #[test]
    fn model_choice_by_menu_label() {
        let driver = ScriptedDriver::new(["Identity"]);
        let m: ModelChoice = prompt_choice(&driver).unwrap();
        assert_eq!(m, ModelChoice::Identity(NoModelParams {}));

        let driver = ScriptedDriver::new(["Mean Reverting", "2.5", "0.5"]);
        let m: ModelChoice = prompt_choice(&driver).unwrap();
        let ModelChoice::MeanReverting(p) = m else {
            panic!("wrong model: {m:?}");
        };
        assert_eq!(p.mean, 2.5);
        assert_eq!(p.retention, 0.5);
    }

    #[test]
    fn csv_stream_retries_bad_paths_and_maps_blank_to_none() {
        let mut csv = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(csv, "awa_deg\n1.0").unwrap();
        let good = csv.path().to_string_lossy().into_owned();

        // path (bad, then good), column, reference, offset, limit, rounding
        let driver = ScriptedDriver::new([
            "CSV Column",
            "/nope/missing.csv",
            good.as_str(),
            "",
            "",
            "3",
            ScriptedDriver::CLEAR,
            ScriptedDriver::CLEAR,
        ]);
        let s: StreamChoice = prompt_choice(&driver).unwrap();
        assert!(driver.is_exhausted());
        assert_eq!(
            s,
            StreamChoice::CsvColumn(CsvColumnParameters {
                path: PathBuf::from(&good),
                column: "awa_deg".into(),
                reference_column: None,
                offset: 3,
                limit: None,
                round_decimals: None,
            })
        );
    }

    #[test]
    fn whole_task_from_a_script() {
        let driver = ScriptedDriver::new([
            "Filter Stream",
            // max_samples, report_frequency, trace_path
            "50",
            "10",
            "",
            // stream
            "Noisy Signal",
            "",
            "",
            "",
            "",
            "true",
            "",
            "",
            // model
            "Identity",
            // filter
            "",
            "",
            "",
            "",
            // angular?
            "true",
        ]);
        let TaskChoice::FilterStream(p) = prompt_choice::<TaskChoice, _>(&driver).unwrap();
        assert!(driver.is_exhausted());
        assert_eq!(p.max_samples, Some(50));
        assert_eq!(p.report_frequency, 10);
        assert_eq!(p.trace_path, None);
        assert_eq!(p.mode, UpdateMode::Angular);
        assert_eq!(p.filter, FilterParameters::default());
        let StreamChoice::NoisySignal(n) = p.stream else {
            panic!("wrong stream");
        };
        assert!(n.angular);
        assert_eq!(n.noise_std, 1.0);
        assert_eq!(n.max_samples, Some(2000));
        assert_eq!(n.seed, 42);
    }

    #[test]
    fn bad_optional_integer_is_reported() {
        let driver = ScriptedDriver::new(["Filter Stream", "lots"]);
        let err = prompt_choice::<TaskChoice, _>(&driver).unwrap_err();
        assert!(err.to_string().contains("Max Samples"), "{err}");
    }

    #[test]
    fn path_validation() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_path_str("  ", &["csv"]).is_err());
        assert!(validate_path_str(dir.path().to_str().unwrap(), &[]).is_err());

        let txt = Builder::new().suffix(".txt").tempfile().unwrap();
        let err = validate_path_str(txt.path().to_str().unwrap(), &["csv"]).unwrap_err();
        assert_eq!(err, "Expected a .csv file");
        assert!(validate_path_str(txt.path().to_str().unwrap(), &[]).is_ok());
    }
}
