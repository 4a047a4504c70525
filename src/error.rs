use thiserror::Error;

/// Errors that stop a filter run before any row is examined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A required product parameter is missing.
    #[error("{0}")]
    Configuration(String),

    /// The uploaded table does not have the columns the filter needs.
    #[error("Search Volume column not found! Please check your file. (columns: {})", .columns.join(", "))]
    Schema { columns: Vec<String> },
}

impl FilterError {
    pub fn missing_title() -> Self {
        FilterError::Configuration("Enter a product title before filtering.".to_string())
    }
}

/// Product page title retrieval failures. Always recovered by the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no product page URL given")]
    EmptyUrl,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("product page returned HTTP {0}")]
    Status(u16),

    #[error("invalid title selector `{0}`")]
    Selector(String),

    #[error("no `{0}` element with text on the product page")]
    MissingElement(String),

    #[error("title fetch worker stopped before answering")]
    Disconnected,
}
