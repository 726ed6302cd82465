use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::debug;

use crate::datasets::Observations;
use crate::estimators::error::RegressionError;
use crate::pipeline::ObservationSource;


/// Error variants from reading an observation table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing column `{0}` in header")]
    MissingColumn(&'static str),
    #[error("line {line}: expected 2 columns, found {found}")]
    ColumnCount { line: u64, found: usize },
    #[error("line {line}: missing {column} value")]
    MissingField { line: u64, column: &'static str },
    #[error("line {line}: invalid {column} value `{value}`")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error(transparent)]
    Observations(#[from] RegressionError),
}

/// Where the two columns live in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// No header, `x` then `y`
    Headerless,
    /// Header naming the `x` and `y` columns, other columns ignored
    Named { x: usize, y: usize },
}

/// Delimited text table loader
///
/// Reads a two-column table of `x` and `y` values. The header is optional:
/// when the first record is numeric the table is taken as header-less with
/// `x` in the first column and `y` in the second. Otherwise the first record
/// must name an `x` and a `y` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLoader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvLoader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        CsvLoader {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Set the field delimiter.
    ///
    /// Defaults to `,` if not set.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a table from any reader, ignoring the loader's path.
    pub fn read<R: Read>(&self, reader: R) -> Result<Observations<f64>, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut layout = None;
        let mut x = Vec::new();
        let mut y = Vec::new();

        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let line = record.position().map_or(i as u64 + 1, |p| p.line());

            let layout = match layout {
                Some(layout) => layout,
                None => {
                    let detected = detect_layout(&record)?;
                    debug!(?detected, "detected table layout");
                    layout = Some(detected);
                    if detected != Layout::Headerless {
                        continue;
                    }
                    detected
                }
            };

            let (xi, yi) = match layout {
                Layout::Headerless => {
                    if record.len() != 2 {
                        return Err(LoadError::ColumnCount {
                            line,
                            found: record.len(),
                        });
                    }
                    (0, 1)
                }
                Layout::Named { x, y } => (x, y),
            };
            x.push(parse_field(&record, xi, line, "x")?);
            y.push(parse_field(&record, yi, line, "y")?);
        }

        debug!(n_samples = x.len(), "read observation table");
        Ok(Observations::from_columns(&x, &y)?)
    }
}

impl ObservationSource<f64> for CsvLoader {
    type Error = LoadError;

    fn load(&self) -> Result<Observations<f64>, LoadError> {
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.read(BufReader::new(file))
    }
}

fn detect_layout(record: &StringRecord) -> Result<Layout, LoadError> {
    if record.iter().all(|field| field.parse::<f64>().is_ok()) {
        return Ok(Layout::Headerless);
    }
    let position = |name: &str| {
        record
            .iter()
            .position(|field| field.trim().eq_ignore_ascii_case(name))
    };
    let x = position("x").ok_or(LoadError::MissingColumn("x"))?;
    let y = position("y").ok_or(LoadError::MissingColumn("y"))?;
    Ok(Layout::Named { x, y })
}

fn parse_field(
    record: &StringRecord,
    index: usize,
    line: u64,
    column: &'static str,
) -> Result<f64, LoadError> {
    let value = record
        .get(index)
        .ok_or(LoadError::MissingField { line, column })?;
    value.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    })
}
