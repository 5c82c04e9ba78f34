use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::center::Center;
use crate::{Error, Result};

/// Columns in every raw `.data` row, label included.
pub const RAW_COLUMNS: usize = 14;

/// Administrative columns removed before anything else looks at a row.
pub const DROPPED_COLUMNS: [usize; 3] = [10, 11, 12];

/// Features left once the dropped columns and the label are gone.
pub const RAW_FEATURES: usize = RAW_COLUMNS - DROPPED_COLUMNS.len() - 1;

const MISSING: &str = "?";
const DATA_EXTENSION: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub features: Vec<f64>,
    /// Disease severity, 0 to 4.
    pub label: f64,
}

#[derive(Debug, Clone)]
pub struct CenterTable {
    pub center: Center,
    pub path: PathBuf,
    pub rows: Vec<RawRecord>,
}

/// Lists the `*.data` files directly inside `dir`, sorted by file name.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_data = path.extension().is_some_and(|ext| ext == DATA_EXTENSION);

        if is_data && path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(Error::NoDataFiles(dir.to_path_buf()));
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths)
}

pub fn parse_file(path: &Path) -> Result<CenterTable> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::UnknownCenter(path.display().to_string()))?;
    let center = Center::from_file_name(file_name)?;

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    let mut dropped = 0;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        match parse_record(&record) {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => dropped += 1,
            Err(message) => {
                return Err(Error::Parse {
                    file: path.to_path_buf(),
                    line,
                    message,
                })
            }
        }
    }

    tracing::debug!(
        file = %path.display(),
        %center,
        kept = rows.len(),
        dropped,
        "parsed center file"
    );

    Ok(CenterTable {
        center,
        path: path.to_path_buf(),
        rows,
    })
}

/// `Ok(None)` means the row has a missing value outside the dropped columns.
/// A truncated row counts as missing its trailing fields, the label included.
fn parse_record(record: &StringRecord) -> std::result::Result<Option<RawRecord>, String> {
    if record.len() < RAW_COLUMNS {
        return Ok(None);
    }

    if record.len() > RAW_COLUMNS {
        return Err(format!(
            "expected {RAW_COLUMNS} columns, found {}",
            record.len()
        ));
    }

    let mut values = Vec::with_capacity(RAW_FEATURES + 1);

    for (index, field) in record.iter().enumerate() {
        if DROPPED_COLUMNS.contains(&index) {
            continue;
        }

        if field.is_empty() || field == MISSING {
            return Ok(None);
        }

        let value = field
            .parse::<f64>()
            .map_err(|_| format!("column {index}: {field:?} is not a number"))?;
        values.push(value);
    }

    let label = values.pop().unwrap_or_default();

    Ok(Some(RawRecord {
        features: values,
        label,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_drops_admin_columns_and_missing_rows() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "processed.hungarian.data",
            "40,1,2,140,289,0,0,172,0,0,?,?,?,0\n\
             49,0,3,160,?,0,0,156,0,1,2,0,3,1\n\
             37,1,2,130,283,0,1,98,0,0,?,?,?,2\n",
        );

        let table = parse_file(&path).unwrap();

        assert_eq!(table.center, Center::Hungarian);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].features.len(), RAW_FEATURES);
        assert_eq!(
            table.rows[0].features,
            vec![40.0, 1.0, 2.0, 140.0, 289.0, 0.0, 0.0, 172.0, 0.0, 0.0]
        );
        assert!((table.rows[1].label - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_drops_short_rows() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "processed.cleveland.data",
            "63,1,1,145,233,1,2,150,0,2.3,3,0,6,0\n\
             67,1,4,160,286,0,2,108,1,1.5,2,3\n",
        );

        let table = parse_file(&path).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert!((table.rows[0].features[0] - 63.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_rejects_long_rows() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "processed.va.data",
            "63,1,4,140,260,0,1,112,1,3,2,?,?,2\n\
             44,1,4,130,209,0,1,127,0,0,?,?,?,0,9\n",
        );

        assert!(matches!(parse_file(&path), Err(Error::Parse { line: 2, .. })));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "processed.va.data",
            "63,1,x,145,233,1,2,150,0,2.3,3,0,6,0\n",
        );

        assert!(matches!(parse_file(&path), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_discover_sorts_and_filters() {
        let dir = TempDir::new().unwrap();
        write(&dir, "processed.va.data", "");
        write(&dir, "processed.cleveland.data", "");
        write(&dir, "notes.txt", "");

        let names: Vec<_> = discover(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["processed.cleveland.data", "processed.va.data"]);
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(discover(dir.path()), Err(Error::NoDataFiles(_))));
    }
}
