use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use super::model::FilteredResult;

pub const EXPORT_FILE_NAME: &str = "relevant_keywords.xlsx";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const OUTPUT_HEADERS: [&str; 2] = ["Keyword Phrase", "Search Volume"];
const SHEET_NAME: &str = "Relevant Keywords";

fn build_workbook(result: &FilteredResult) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).context("naming worksheet")?;

    let bold = Format::new().set_bold();
    for (col, header) in OUTPUT_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .context("writing header")?;
    }

    for (i, m) in result.matches.iter().enumerate() {
        let row = u32::try_from(i + 1).context("too many rows for a worksheet")?;
        sheet
            .write_string(row, 0, &m.phrase)
            .and_then(|s| s.write_number(row, 1, m.search_volume as f64))
            .with_context(|| format!("writing row {row}"))?;
    }
    sheet.set_column_width(0, 48).context("sizing columns")?;
    sheet.set_column_width(1, 16).context("sizing columns")?;

    Ok(workbook)
}

/// Serialize the survivors to an in-memory `.xlsx` document.
pub fn xlsx_bytes(result: &FilteredResult) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(result)?;
    let bytes = workbook.save_to_buffer().context("serializing workbook")?;
    log::debug!("serialized {} bytes as {XLSX_MIME}", bytes.len());
    Ok(bytes)
}

/// Write the survivors to an `.xlsx` file.
pub fn write_xlsx(result: &FilteredResult, path: &Path) -> Result<()> {
    let bytes = xlsx_bytes(result)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} keywords to {}", result.len(), path.display());
    Ok(())
}

/// Write the survivors as CSV with the same two columns.
pub fn write_csv<W: Write>(result: &FilteredResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if result.is_empty() {
        // serde only emits headers alongside the first record
        csv_writer.write_record(OUTPUT_HEADERS).context("writing CSV header")?;
    }
    for m in &result.matches {
        csv_writer.serialize(m).context("writing CSV row")?;
    }
    csv_writer.flush().context("flushing CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::KeywordMatch;
    use pretty_assertions::assert_eq;

    fn sample() -> FilteredResult {
        FilteredResult {
            matches: vec![
                KeywordMatch {
                    phrase: "egcg capsules".into(),
                    search_volume: 1200,
                },
                KeywordMatch {
                    phrase: "green tea extract capsule".into(),
                    search_volume: 640,
                },
            ],
            rows_scanned: 10,
        }
    }

    #[test]
    fn csv_has_output_headers() {
        let mut out = Vec::new();
        write_csv(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Keyword Phrase,Search Volume\negcg capsules,1200\ngreen tea extract capsule,640\n"
        );
    }

    #[test]
    fn empty_csv_still_has_headers() {
        let mut out = Vec::new();
        write_csv(&FilteredResult::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Keyword Phrase,Search Volume\n");
    }

    #[test]
    fn xlsx_is_a_zip_container() {
        let bytes = xlsx_bytes(&sample()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn exported_xlsx_loads_in_survivor_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        write_xlsx(&sample(), &path).unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.column_names, OUTPUT_HEADERS.to_vec());
        let phrases: Vec<String> = table.column(0).map(|c| c.as_phrase()).collect();
        assert_eq!(phrases, vec!["egcg capsules", "green tea extract capsule"]);
    }
}
