use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("row {row}: boarding count {value:?} is not a non-negative integer")]
    BoardingCount { row: usize, value: String },

    #[error("row {row}: {column} value {value:?} is not a number")]
    Coordinate {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("workbook has no worksheets")]
    EmptyWorkbook,

    #[error("invalid share percentage {0}; expected a value in 1..=100")]
    InvalidPercentage(u32),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("required column `{0}` is missing from the ridership file")]
    MissingColumn(&'static str),

    #[error("failed to open ridership file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("boarding total for route {route:?} does not fit in 64 bits")]
    RouteTotalOverflow { route: String },

    #[error("toml deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] calamine::XlsxError),
}

impl Error {
    pub fn boarding_count(row: usize, value: impl Into<String>) -> Self {
        Self::BoardingCount {
            row,
            value: value.into(),
        }
    }
}
