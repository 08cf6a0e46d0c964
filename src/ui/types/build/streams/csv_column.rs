use crate::streams::{CsvColumnStream, MAX_ROUND_DECIMALS};
use crate::ui::types::build::{BuildError, to_usize};
use crate::ui::types::choices::CsvColumnParameters;

impl TryFrom<CsvColumnParameters> for CsvColumnStream {
    type Error = BuildError;

    fn try_from(p: CsvColumnParameters) -> Result<Self, Self::Error> {
        if p.column.trim().is_empty() {
            return Err(BuildError::InvalidParameter("column must not be empty".into()));
        }

        if let Some(decimals) = p.round_decimals.filter(|d| *d > MAX_ROUND_DECIMALS) {
            return Err(BuildError::InvalidParameter(format!(
                "round_decimals must be at most {MAX_ROUND_DECIMALS}, got {decimals}"
            )));
        }

        let offset = to_usize(p.offset, "offset")?;
        let limit = p.limit.map(|v| to_usize(v, "limit")).transpose()?;

        let mut stream = CsvColumnStream::open(&p.path, p.column.trim())?;
        if let Some(reference) = p.reference_column.as_deref().map(str::trim) {
            if !reference.is_empty() {
                stream = stream.with_reference_column(reference)?;
            }
        }
        if let Some(decimals) = p.round_decimals {
            stream = stream.with_rounding(decimals)?;
        }
        Ok(stream.with_window(offset, limit)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::SampleStream;
    use std::io::{ErrorKind, Write};
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn csv() -> NamedTempFile {
        let mut tf = NamedTempFile::new().unwrap();
        write!(tf, "awa_deg,truth\n1.234,1\n2.346,2\n3.456,3\n").unwrap();
        tf
    }

    fn params(path: PathBuf) -> CsvColumnParameters {
        CsvColumnParameters {
            path,
            ..CsvColumnParameters::default()
        }
    }

    #[test]
    fn builds_windowed_rounded_stream() {
        let tf = csv();
        let mut p = params(tf.path().to_path_buf());
        p.reference_column = Some("truth".into());
        p.offset = 1;
        p.limit = Some(1);

        let mut s = CsvColumnStream::try_from(p).unwrap();
        let first = s.next_sample().unwrap();
        assert_eq!(first.value, 2.35);
        assert_eq!(first.reference, Some(2.0));
        assert!(s.next_sample().is_none());
    }

    #[test]
    fn blank_reference_column_is_ignored() {
        let tf = csv();
        let mut p = params(tf.path().to_path_buf());
        p.reference_column = Some("  ".into());
        let s = CsvColumnStream::try_from(p).unwrap();
        assert_eq!(s.reference_column(), None);
    }

    #[test]
    fn rejects_bad_columns_and_files() {
        let tf = csv();
        let mut p = params(tf.path().to_path_buf());
        p.column = "".into();
        assert!(matches!(
            CsvColumnStream::try_from(p),
            Err(BuildError::InvalidParameter(_))
        ));

        let mut p = params(tf.path().to_path_buf());
        p.column = "tws".into();
        match CsvColumnStream::try_from(p) {
            Err(BuildError::Io(e)) => assert_eq!(e.kind(), ErrorKind::InvalidData),
            other => panic!("unexpected: {other:?}"),
        }

        let p = params(PathBuf::from("/no/such/file.csv"));
        assert!(matches!(CsvColumnStream::try_from(p), Err(BuildError::Io(_))));
    }

    #[test]
    fn rejects_rounding_past_f64_precision() {
        let mut tf = NamedTempFile::new().unwrap();
        write!(tf, "awa_deg\n12.5\n-3.0\n").unwrap();

        for decimals in [16, 400, u32::MAX] {
            let mut p = params(tf.path().to_path_buf());
            p.round_decimals = Some(decimals);
            match CsvColumnStream::try_from(p) {
                Err(BuildError::InvalidParameter(msg)) => assert!(msg.contains("round_decimals")),
                other => panic!("unexpected for {decimals}: {other:?}"),
            }
        }

        let mut p = params(tf.path().to_path_buf());
        p.round_decimals = Some(MAX_ROUND_DECIMALS);
        let mut s = CsvColumnStream::try_from(p).unwrap();
        assert_eq!(s.next_sample().unwrap().value, 12.5);
        assert_eq!(s.next_sample().unwrap().value, -3.0);
    }
}
