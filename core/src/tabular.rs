//! # Tab-delimited text
//!
//! Spreadsheet friendly text in both directions: catalogs and read results
//! go out as tab separated rows, and write tables come in as rows of
//! `tag_address`, `value` and `data_type` without a header.
//!
//! Cells holding a tab, a quote or a line break are quoted the way
//! spreadsheets quote them on the clipboard, in both directions.

use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use tagcrawl_common::plc::scalar::{CoercionError, DataType, Scalar};
use tagcrawl_common::plc::tag::{Catalog, ReadResult, TagDescriptor};
use tagcrawl_common::plc::write::WriteRequest;
use thiserror::Error;
use tracing::warn;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const CATALOG_HEADER: [&str; 6] = [
    "tag_path",
    "data_type",
    "value",
    "ip_address",
    "timestamp_utc",
    "timestamp_local",
];

pub const READ_RESULT_HEADER: [&str; 2] = ["tag_path", "value"];

const DELIMITER: u8 = b'\t';

const WRITE_TABLE_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("write table is empty")]
    Empty,

    #[error("line {line} has {found} columns, expected tag_address, value and data_type")]
    MalformedTable { line: usize, found: usize },

    #[error("line {line}: bad value for tag '{tag}': {source}")]
    InvalidValue {
        line: usize,
        tag: String,
        #[source]
        source: CoercionError,
    },

    #[error("delimited text error: {0}")]
    Delimited(String),
}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        TableError::Delimited(e.to_string())
    }
}

/// A row left out of a write table because its type cannot be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub tag: String,
    pub data_type: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteTable {
    /// In first-seen order; a repeated tag keeps its last value.
    pub writes: WriteRequest,
    pub skipped: Vec<SkippedRow>,
}

fn tab_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new().delimiter(DELIMITER).from_writer(Vec::new())
}

fn into_text(writer: Writer<Vec<u8>>) -> Result<String, TableError> {
    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| TableError::Delimited(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TableError::Delimited(e.to_string()))
}

fn catalog_record(tag: &TagDescriptor) -> [String; 6] {
    [
        tag.full_path.clone(),
        tag.data_type.clone(),
        tag.value.as_ref().map(Scalar::to_string).unwrap_or_default(),
        tag.source_address.to_string(),
        tag.discovered_at_utc.format(TIMESTAMP_FORMAT).to_string(),
        tag.discovered_at_local.format(TIMESTAMP_FORMAT).to_string(),
    ]
}

/// Header plus one row per tag, ordered by path.
pub fn catalog_to_tab_delimited(catalog: &Catalog) -> Result<String, TableError> {
    let mut writer = tab_writer();
    writer.write_record(CATALOG_HEADER)?;
    for tag in catalog.values() {
        writer.write_record(catalog_record(tag))?;
    }
    into_text(writer)
}

/// `tag_path` and `value` rows for an explicit read.
pub fn read_result_to_tab_delimited(values: &ReadResult) -> Result<String, TableError> {
    let mut writer = tab_writer();
    writer.write_record(READ_RESULT_HEADER)?;
    for (path, value) in values {
        writer.write_record([path.as_str(), value.to_string().as_str()])?;
    }
    into_text(writer)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Parses pasted spreadsheet rows into the values to write.
///
/// A row with the wrong column count or a value that does not fit its type
/// rejects the whole table. Rows whose type is not writable are skipped and
/// reported in [`WriteTable::skipped`].
pub fn parse_write_table(text: &str) -> Result<WriteTable, TableError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<(usize, StringRecord)> = Vec::new();
    for record in reader.records() {
        let record: StringRecord = record?;
        if is_blank(&record) {
            continue;
        }
        let line: usize = record
            .position()
            .map_or(rows.len() + 1, |position| position.line() as usize);
        rows.push((line, record));
    }

    if rows.is_empty() {
        return Err(TableError::Empty);
    }

    // Every row is shape checked before any value is converted.
    for (line, record) in &rows {
        if record.len() != WRITE_TABLE_COLUMNS {
            return Err(TableError::MalformedTable {
                line: *line,
                found: record.len(),
            });
        }
    }

    let mut table: WriteTable = WriteTable::default();

    for (line, record) in rows {
        let tag: String = record[0].trim().to_string();
        let raw_value: &str = &record[1];

        let data_type: DataType = match record[2].parse() {
            Ok(data_type) => data_type,
            Err(_) => {
                let declared: String = record[2].trim().to_ascii_uppercase();
                warn!("unsupported data type '{declared}' for tag '{tag}', skipping");
                table.skipped.push(SkippedRow {
                    line,
                    tag,
                    data_type: declared,
                });
                continue;
            }
        };

        let value: Scalar = data_type
            .coerce(raw_value)
            .map_err(|source| TableError::InvalidValue {
                line,
                tag: tag.clone(),
                source,
            })?;

        table.writes.insert(tag, value);
    }

    Ok(table)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
