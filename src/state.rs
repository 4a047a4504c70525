use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::Result;

use crate::data::export;
use crate::data::filter::{run, ExclusionSet, ProductParams};
use crate::data::model::{FilteredResult, KeywordTable};
use crate::error::FetchError;
use crate::fetch::spawn_title_fetch;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    /// Something degraded but the run goes on.
    Advisory,
    /// Output is blocked until the user fixes the input.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        StatusMessage {
            severity,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Uploaded keyword table (None until user loads a file).
    pub table: Option<KeywordTable>,

    /// File name of the uploaded table, for the top bar.
    pub source_name: Option<String>,

    /// Sidebar inputs.
    pub params: ProductParams,

    /// Product page URL the title can be fetched from.
    pub product_url: String,

    /// Latest filter output; None when nothing loaded or the run was blocked.
    pub result: Option<FilteredResult>,

    /// Status / error message shown in the UI.
    pub status: Option<StatusMessage>,

    /// Pending product title fetch.
    title_fetch: Option<Receiver<Result<String, FetchError>>>,
}

impl AppState {
    /// Ingest a newly loaded table and filter it with the current parameters.
    pub fn set_table(&mut self, table: KeywordTable, source_name: impl Into<String>) {
        self.table = Some(table);
        self.source_name = Some(source_name.into());
        self.status = None;
        self.refilter();
    }

    /// Re-run the filter after any input change.
    pub fn refilter(&mut self) {
        self.params = std::mem::take(&mut self.params).validated();
        let Some(table) = &self.table else {
            self.result = None;
            return;
        };

        match run(table, &self.params) {
            Ok(result) => {
                log::info!(
                    "{} of {} keywords kept (min volume {}, threshold {})",
                    result.len(),
                    result.rows_scanned,
                    self.params.min_search_volume,
                    self.params.similarity_threshold
                );
                if self
                    .status
                    .as_ref()
                    .is_some_and(|s| s.severity == Severity::Error)
                {
                    self.status = None;
                }
                self.result = Some(result);
            }
            Err(e) => {
                log::error!("Filter blocked: {e}");
                self.status = Some(StatusMessage::new(Severity::Error, e.to_string()));
                self.result = None;
            }
        }
    }

    /// Exclusion terms in effect for the current item type.
    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::for_item_type(&self.params.item_type)
    }

    pub fn fetching_title(&self) -> bool {
        self.title_fetch.is_some()
    }

    /// Start fetching the product title from `product_url` in the background.
    pub fn begin_title_fetch(&mut self) {
        if self.product_url.trim().is_empty() {
            self.apply_title_fetch(Err(FetchError::EmptyUrl));
            return;
        }
        self.title_fetch = Some(spawn_title_fetch(self.product_url.trim().to_string()));
        self.status = Some(StatusMessage::new(Severity::Info, "Fetching product title…"));
    }

    /// Check on a pending fetch. Returns true while it is still running.
    pub fn poll_title_fetch(&mut self) -> bool {
        let Some(rx) = &self.title_fetch else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => Err(FetchError::Disconnected),
        };
        self.title_fetch = None;
        self.apply_title_fetch(outcome);
        false
    }

    /// A fetched title replaces the current one; a failure leaves it untouched.
    pub fn apply_title_fetch(&mut self, outcome: Result<String, FetchError>) {
        match outcome {
            Ok(title) => {
                log::info!("Extracted product title: {title}");
                self.params.title = title;
                self.status = Some(StatusMessage::new(
                    Severity::Info,
                    "Title extracted from product page.",
                ));
                self.refilter();
            }
            Err(e) => {
                log::warn!("Product title fetch failed: {e}");
                self.status = Some(StatusMessage::new(
                    Severity::Advisory,
                    format!("Could not extract title ({e}). Please enter the title manually."),
                ));
            }
        }
    }

    pub fn export_xlsx(&mut self, path: &Path) -> Result<()> {
        let Some(result) = &self.result else {
            anyhow::bail!("nothing to export");
        };
        export::write_xlsx(result, path)?;
        self.status = Some(StatusMessage::new(
            Severity::Info,
            format!("Saved {}", path.display()),
        ));
        Ok(())
    }

    pub fn export_csv(&mut self, path: &Path) -> Result<()> {
        let Some(result) = &self.result else {
            anyhow::bail!("nothing to export");
        };
        let file = std::fs::File::create(path)?;
        export::write_csv(result, file)?;
        log::info!("Exported {} keywords to {}", result.len(), path.display());
        self.status = Some(StatusMessage::new(
            Severity::Info,
            format!("Saved {}", path.display()),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table(volume_header: &str) -> KeywordTable {
        KeywordTable::new(
            vec!["Keyword Phrase".into(), volume_header.into()],
            vec![
                vec![CellValue::String("egcg 200mg capsule".into()), CellValue::Integer(500)],
                vec![CellValue::String("green tea gummies".into()), CellValue::Integer(1000)],
            ],
        )
    }

    fn state() -> AppState {
        let mut state = AppState::default();
        state.params.title = "Protocol EGCg 200 mg capsule".into();
        state
    }

    #[test]
    fn loading_filters_table() {
        let mut state = state();
        state.set_table(table("Search Volume"), "export.csv");
        let result = state.result.as_ref().unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.matches[0].phrase, "egcg 200mg capsule");
        assert!(state.status.is_none());
    }

    #[test]
    fn schema_error_blocks_output() {
        let mut state = state();
        state.set_table(table("Vol."), "export.csv");
        assert!(state.result.is_none());
        assert_eq!(state.status.as_ref().unwrap().severity, Severity::Error);
    }

    #[test]
    fn blank_title_blocks_then_recovers() {
        let mut state = AppState::default();
        state.params.title = String::new();
        state.set_table(table("Search Volume"), "export.csv");
        assert!(state.result.is_none());
        assert_eq!(state.status.as_ref().unwrap().severity, Severity::Error);

        state.params.title = "Protocol EGCg 200 mg capsule".into();
        state.refilter();
        assert!(state.result.is_some());
        assert!(state.status.is_none());
    }

    #[test]
    fn refilter_clamps_params() {
        let mut state = AppState::default();
        state.params.similarity_threshold = 180;
        state.refilter();
        assert_eq!(state.params.similarity_threshold, 100);
    }

    #[test]
    fn failed_fetch_is_advisory_and_keeps_title() {
        let mut state = state();
        state.set_table(table("Search Volume"), "export.csv");
        let before = state.params.title.clone();

        state.apply_title_fetch(Err(FetchError::MissingElement("#productTitle".into())));
        assert_eq!(state.params.title, before);
        assert_eq!(state.status.as_ref().unwrap().severity, Severity::Advisory);
        assert!(state.result.is_some());
    }

    #[test]
    fn empty_url_never_spawns_fetch() {
        let mut state = AppState::default();
        state.begin_title_fetch();
        assert!(!state.fetching_title());
        assert_eq!(state.status.as_ref().unwrap().severity, Severity::Advisory);
    }

    #[test]
    fn fetched_title_refilters() {
        let mut state = state();
        state.set_table(table("Search Volume"), "export.csv");
        state.apply_title_fetch(Ok("Completely different zzz".into()));
        assert_eq!(state.params.title, "Completely different zzz");
        assert_eq!(state.result.as_ref().unwrap().len(), 0);
    }

    #[test]
    fn export_without_result_fails() {
        let mut state = AppState::default();
        let dir = tempfile::tempdir().unwrap();
        assert!(state.export_xlsx(&dir.path().join("out.xlsx")).is_err());
    }

    #[test]
    fn export_csv_writes_file() {
        let mut state = state();
        state.set_table(table("Search Volume"), "export.csv");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        state.export_csv(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Keyword Phrase,Search Volume\n"));
    }
}
