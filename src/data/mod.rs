/// Data layer: core types, column resolution, scoring, filtering, file I/O.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → KeywordTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  columns  │  header names → keyword / search volume indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  volume gate → type gate → fuzzy title gate
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  FilteredResult → relevant_keywords.xlsx / .csv
///   └──────────┘
/// ```

pub mod columns;
pub mod export;
pub mod filter;
pub mod fuzzy;
pub mod loader;
pub mod model;
