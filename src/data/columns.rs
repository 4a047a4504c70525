use crate::error::FilterError;

/// Indices of the two columns the filter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub keyword: usize,
    pub search_volume: usize,
}

/// Locate the keyword and search volume columns by header name.
///
/// * keyword: first header containing `keyword`, else the first column
/// * search volume: first header containing both `search` and `volume`,
///   otherwise a [`FilterError::Schema`]
///
/// Matching is case-insensitive on trimmed names.
pub fn resolve_columns(column_names: &[String]) -> Result<ResolvedColumns, FilterError> {
    let normalized: Vec<String> = column_names
        .iter()
        .map(|c| c.trim().to_lowercase())
        .collect();

    let search_volume = normalized
        .iter()
        .position(|c| c.contains("search") && c.contains("volume"))
        .ok_or_else(|| FilterError::Schema {
            columns: column_names.to_vec(),
        })?;

    let keyword = normalized
        .iter()
        .position(|c| c.contains("keyword"))
        .unwrap_or(0);

    Ok(ResolvedColumns {
        keyword,
        search_volume,
    })
}
