use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of an uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what CSV / Excel / Parquet give us.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a search volume.
    ///
    /// Missing or malformed values coerce to 0; they are never reported.
    /// Floats truncate toward zero and negatives clamp to 0.
    pub fn as_search_volume(&self) -> u64 {
        match self {
            CellValue::Integer(i) => (*i).max(0) as u64,
            CellValue::Float(v) => float_volume(*v),
            CellValue::String(s) => parse_volume_text(s),
            CellValue::Bool(_) | CellValue::Null => 0,
        }
    }

    /// Keyword text as it should appear in the output (trimmed).
    pub fn as_phrase(&self) -> String {
        self.to_string().trim().to_string()
    }
}

fn float_volume(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.trunc() as u64
    } else {
        0
    }
}

/// Exports often format volumes as `"1,234"`.
fn parse_volume_text(s: &str) -> u64 {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return 0;
    }
    if let Ok(i) = cleaned.parse::<i64>() {
        return i.max(0) as u64;
    }
    cleaned.parse::<f64>().map(float_volume).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// KeywordTable – the uploaded table, verbatim
// ---------------------------------------------------------------------------

/// The raw uploaded table: header names plus rows of cells in file order.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    /// Column names exactly as they appear in the header row.
    pub column_names: Vec<String>,
    /// Row-major cells. A row may be shorter than the header.
    pub rows: Vec<Vec<CellValue>>,
}

impl KeywordTable {
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        KeywordTable { column_names, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate one column top to bottom; missing trailing cells read as `Null`.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).unwrap_or(&CellValue::Null))
    }
}

// ---------------------------------------------------------------------------
// Keyword rows in and out of the filter
// ---------------------------------------------------------------------------

/// One keyword candidate after column resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRow {
    pub phrase: String,
    pub search_volume: u64,
}

impl KeywordRow {
    pub fn new(phrase: impl Into<String>, search_volume: u64) -> Self {
        KeywordRow {
            phrase: phrase.into(),
            search_volume,
        }
    }
}

/// A surviving keyword, serialized with the output table's column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordMatch {
    #[serde(rename = "Keyword Phrase")]
    pub phrase: String,
    #[serde(rename = "Search Volume")]
    pub search_volume: u64,
}

impl From<&KeywordRow> for KeywordMatch {
    fn from(row: &KeywordRow) -> Self {
        KeywordMatch {
            phrase: row.phrase.clone(),
            search_volume: row.search_volume,
        }
    }
}

/// Output of one filter run, survivors in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredResult {
    pub matches: Vec<KeywordMatch>,
    /// How many input rows were examined.
    pub rows_scanned: usize,
}

impl FilteredResult {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The summary line shown above the results table.
    pub fn summary(&self) -> String {
        format!("{} relevant keywords found.", self.matches.len())
    }
}
