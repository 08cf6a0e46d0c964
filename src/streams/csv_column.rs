use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind, Lines};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::streams::{Sample, SampleStream};
use crate::utils::file_parsing::{parse_number, split_fields, strip_surrounding_quotes};

/// Most decimal places `with_rounding` accepts; beyond this f64 has no digits left.
pub const MAX_ROUND_DECIMALS: u32 = 15;

/// Streams one numeric column of a CSV file with a header row.
///
/// Cells that are empty or do not parse as numbers come out as NaN samples.
/// An optional reference column supplies ground truth for evaluation.
#[derive(Debug)]
pub struct CsvColumnStream {
    path: PathBuf,
    name: String,
    column: String,
    reference_column: Option<String>,
    value_index: usize,
    reference_index: Option<usize>,
    offset: usize,
    limit: Option<usize>,
    round_decimals: Option<u32>,
    lines: Lines<BufReader<File>>,
    pending: Option<Sample>,
    produced: usize,
}

impl CsvColumnStream {
    /// Opens `path` and locates `column` in its header.
    pub fn open<P: AsRef<Path>>(path: P, column: &str) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let (lines, header) = open_with_header(&path)?;
        let value_index = column_index(&header, column).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidData,
                format!("column '{column}' not found in {}", path.display()),
            )
        })?;

        let name = format!(
            "{}:{column}",
            path.file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default()
        );

        let mut stream = Self {
            path,
            name,
            column: column.to_string(),
            reference_column: None,
            value_index,
            reference_index: None,
            offset: 0,
            limit: None,
            round_decimals: None,
            lines,
            pending: None,
            produced: 0,
        };
        stream.advance();
        Ok(stream)
    }

    /// Also reads ground truth from `column`.
    pub fn with_reference_column(mut self, column: &str) -> Result<Self, Error> {
        let (_, header) = open_with_header(&self.path)?;
        let idx = column_index(&header, column).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidData,
                format!("reference column '{column}' not found in {}", self.path.display()),
            )
        })?;
        self.reference_column = Some(column.to_string());
        self.reference_index = Some(idx);
        self.restart()?;
        Ok(self)
    }

    /// Restricts the stream to `limit` data rows starting after `offset` rows.
    pub fn with_window(mut self, offset: usize, limit: Option<usize>) -> Result<Self, Error> {
        self.offset = offset;
        self.limit = limit;
        self.restart()?;
        Ok(self)
    }

    /// Rounds every parsed value to `decimals` places, at most [`MAX_ROUND_DECIMALS`].
    pub fn with_rounding(mut self, decimals: u32) -> Result<Self, Error> {
        if decimals > MAX_ROUND_DECIMALS {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("cannot round to {decimals} places (max {MAX_ROUND_DECIMALS})"),
            ));
        }
        self.round_decimals = Some(decimals);
        self.restart()?;
        Ok(self)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn reference_column(&self) -> Option<&str> {
        self.reference_column.as_deref()
    }

    fn within_limit(&self) -> bool {
        self.limit.map_or(true, |max| self.produced < max)
    }

    fn advance(&mut self) {
        self.pending = None;
        if !self.within_limit() {
            return;
        }
        while let Some(line) = self.lines.next() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "stopping csv stream after read error");
                    return;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let cells = split_fields(&line, ',');
            let value = self.parse_cell(cells.get(self.value_index));
            let reference = self
                .reference_index
                .map(|i| self.parse_cell(cells.get(i)))
                .filter(|r| r.is_finite());

            self.pending = Some(Sample {
                index: self.produced as u64,
                value,
                reference,
            });
            return;
        }
    }

    fn parse_cell(&self, cell: Option<&String>) -> f64 {
        let Some(v) = cell.and_then(|raw| parse_number(raw)) else {
            return f64::NAN;
        };
        match self.round_decimals {
            Some(d) => round_to(v, d),
            None => v,
        }
    }

    fn skip_offset(&mut self) {
        let mut skipped = 0;
        while skipped < self.offset {
            match self.lines.next() {
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(_)) => skipped += 1,
                Some(Err(e)) => {
                    warn!(path = %self.path.display(), error = %e, "read error while skipping csv offset");
                    break;
                }
                None => break,
            }
        }
        debug!(path = %self.path.display(), skipped, "csv window offset applied");
    }
}

impl SampleStream for CsvColumnStream {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_more_samples(&self) -> bool {
        self.pending.is_some()
    }

    fn next_sample(&mut self) -> Option<Sample> {
        let sample = self.pending.take()?;
        self.produced += 1;
        self.advance();
        Some(sample)
    }

    fn restart(&mut self) -> Result<(), Error> {
        let (lines, _) = open_with_header(&self.path)?;
        self.lines = lines;
        self.produced = 0;
        self.skip_offset();
        self.advance();
        Ok(())
    }
}

fn open_with_header(path: &Path) -> Result<(Lines<BufReader<File>>, Vec<String>), Error> {
    let mut lines = BufReader::new(File::open(path)?).lines();
    loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let header = split_fields(&line, ',')
                    .iter()
                    .map(|h| strip_surrounding_quotes(h).trim().to_string())
                    .collect();
                return Ok((lines, header));
            }
            None => {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("{} has no header row", path.display()),
                ));
            }
        }
    }
}

fn column_index(header: &[String], column: &str) -> Option<usize> {
    header.iter().position(|h| h == column)
}

#[inline]
fn round_to(v: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_ROUND_DECIMALS) as i32);
    (v * scale).round() / scale
}
