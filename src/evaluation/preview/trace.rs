use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

use serde::Serialize;
use strum_macros::{Display, EnumString};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TraceFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl TraceFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

/// One processed sample: the raw input paired with the filter output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    pub index: u64,
    pub input: f64,
    pub estimate: f64,
    pub error_variance: f64,
    pub gain: f64,
    /// NaN when the input was missing.
    pub innovation: f64,
    /// Spread the innovation was expected to have, `p + r` before the update.
    pub innovation_variance: f64,
    /// The sample was missing and the filter held its estimate.
    pub skipped: bool,
}

/// Ordered record of a filter run, ready for a plotting tool.
#[derive(Debug, Default, Clone)]
pub struct FilterTrace {
    points: Vec<TracePoint>,
}

impl FilterTrace {
    pub fn push(&mut self, point: TracePoint) {
        self.points.push(point)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&TracePoint> {
        self.points.last()
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    pub fn inputs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.input).collect()
    }

    pub fn estimates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.estimate).collect()
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TraceFormat) -> Result<(), Error> {
        match fmt {
            TraceFormat::Csv => self.export_with_delimiter(path, ','),
            TraceFormat::Tsv => self.export_with_delimiter(path, '\t'),
            TraceFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(
            w,
            "index{d}input{d}estimate{d}error_variance{d}gain{d}innovation{d}skipped",
            d = delimiter
        )?;
        for p in &self.points {
            writeln!(
                w,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                p.index,
                cell(p.input),
                cell(p.estimate),
                cell(p.error_variance),
                cell(p.gain),
                cell(p.innovation),
                p.skipped,
                d = delimiter
            )?;
        }
        w.flush()
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &self.points)?;
        writeln!(w)?;
        w.flush()
    }
}

/// Missing values are written as empty cells.
fn cell(v: f64) -> String {
    if v.is_finite() { v.to_string() } else { String::new() }
}
