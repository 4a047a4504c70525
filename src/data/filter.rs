use std::collections::BTreeSet;

use super::columns::{resolve_columns, ResolvedColumns};
use super::fuzzy::partial_ratio;
use super::model::{FilteredResult, KeywordMatch, KeywordRow, KeywordTable};
use crate::error::FilterError;

pub const DEFAULT_TITLE: &str = "Protocol EGCg 200 mg - 200 mg EGCg Green Tea Extract - \
Phytonutrients & Polyphenols Supplement* - Kosher & Vegan - 90 Veg Capsules";
pub const DEFAULT_ITEM_TYPE: &str = "capsule";
pub const DEFAULT_MIN_SEARCH_VOLUME: u64 = 200;
pub const MAX_MIN_SEARCH_VOLUME: u64 = 100_000;
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 55;

// ---------------------------------------------------------------------------
// Product parameters
// ---------------------------------------------------------------------------

/// Everything the filter needs to know about the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductParams {
    pub title: String,
    pub item_type: String,
    /// Rows need strictly more volume than this.
    pub min_search_volume: u64,
    /// Minimum partial-ratio score, `0..=100`.
    pub similarity_threshold: u8,
}

impl Default for ProductParams {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            item_type: DEFAULT_ITEM_TYPE.to_string(),
            min_search_volume: DEFAULT_MIN_SEARCH_VOLUME,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl ProductParams {
    /// Clamp numeric inputs into the ranges the UI offers.
    pub fn validated(mut self) -> Self {
        self.min_search_volume = self.min_search_volume.min(MAX_MIN_SEARCH_VOLUME);
        self.similarity_threshold = self.similarity_threshold.min(100);
        self
    }
}

// ---------------------------------------------------------------------------
// Exclusion set
// ---------------------------------------------------------------------------

/// Item-type synonyms that mark a keyword as belonging to another product form.
const EXCLUDED_FORMS: &[&[&str]] = &[
    &["gummy", "gummies"],
    &["tablet", "tablets"],
    &["powder", "powders"],
    &["softgel", "softgels"],
    &["liquid", "liquids"],
    &["drops"],
    &["chewable", "chewables"],
    &["spray", "sprays"],
    &["patch", "patches"],
    &["syrup", "syrups"],
];

/// Lowercase terms that reject a keyword unless it names the product's own type.
///
/// Never contains the configured item type, its `s` plural, or any synonym
/// grouped with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    terms: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn for_item_type(item_type: &str) -> Self {
        let own = item_type.trim().to_lowercase();
        let own_plural = format!("{own}s");
        let is_own = |term: &str| term == own || term == own_plural;

        let terms = EXCLUDED_FORMS
            .iter()
            .filter(|group| !group.iter().any(|term| is_own(*term)))
            .flat_map(|group| group.iter())
            .map(|term| term.to_string())
            .collect();

        ExclusionSet { terms }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether any term occurs inside an already-lowercased phrase.
    fn hits(&self, phrase_lower: &str) -> bool {
        self.terms.iter().any(|t| phrase_lower.contains(t.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Pull phrase / volume pairs out of the resolved columns, in table order.
pub fn extract_rows(table: &KeywordTable, columns: ResolvedColumns) -> Vec<KeywordRow> {
    table
        .column(columns.keyword)
        .zip(table.column(columns.search_volume))
        .map(|(phrase, volume)| KeywordRow::new(phrase.as_phrase(), volume.as_search_volume()))
        .collect()
}

/// Apply the volume, type and similarity gates to each row in order.
///
/// The similarity score is only computed for rows that passed the first two.
pub fn filter_keywords(
    rows: &[KeywordRow],
    params: &ProductParams,
    exclusions: &ExclusionSet,
) -> FilteredResult {
    let title_lower = params.title.to_lowercase();
    let item_type_lower = params.item_type.trim().to_lowercase();

    let mut volume_rejects = 0usize;
    let mut type_rejects = 0usize;
    let mut similarity_rejects = 0usize;

    let matches: Vec<KeywordMatch> = rows
        .iter()
        .filter(|row| {
            if row.search_volume <= params.min_search_volume {
                volume_rejects += 1;
                return false;
            }

            let phrase_lower = row.phrase.to_lowercase();
            if !phrase_lower.contains(&item_type_lower) && exclusions.hits(&phrase_lower) {
                type_rejects += 1;
                return false;
            }

            if partial_ratio(&phrase_lower, &title_lower) < params.similarity_threshold {
                similarity_rejects += 1;
                return false;
            }
            true
        })
        .map(KeywordMatch::from)
        .collect();

    log::debug!(
        "filter: {} rows, rejected volume={volume_rejects} type={type_rejects} \
         similarity={similarity_rejects}, kept {}",
        rows.len(),
        matches.len()
    );

    FilteredResult {
        matches,
        rows_scanned: rows.len(),
    }
}

/// Run the whole core on an uploaded table.
///
/// Fails before filtering if the title is blank or the search volume
/// column cannot be found.
pub fn run(table: &KeywordTable, params: &ProductParams) -> Result<FilteredResult, FilterError> {
    if params.title.trim().is_empty() {
        return Err(FilterError::missing_title());
    }
    let columns = resolve_columns(&table.column_names)?;
    log::debug!(
        "keyword column {:?}, search volume column {:?}",
        table.column_names.get(columns.keyword),
        table.column_names.get(columns.search_volume)
    );

    let rows = extract_rows(table, columns);
    let exclusions = ExclusionSet::for_item_type(&params.item_type);
    Ok(filter_keywords(&rows, params, &exclusions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn params(title: &str, min: u64, threshold: u8) -> ProductParams {
        ProductParams {
            title: title.to_string(),
            item_type: "capsule".to_string(),
            min_search_volume: min,
            similarity_threshold: threshold,
        }
    }

    fn run_rows(rows: &[KeywordRow], p: &ProductParams) -> Vec<String> {
        let exclusions = ExclusionSet::for_item_type(&p.item_type);
        filter_keywords(rows, p, &exclusions)
            .matches
            .into_iter()
            .map(|m| m.phrase)
            .collect()
    }

    #[test]
    fn exclusion_set_drops_own_type() {
        let set = ExclusionSet::for_item_type("capsule");
        assert!(!set.contains("capsule"));
        assert!(!set.contains("capsules"));
        assert!(set.contains("gummies"));
        assert!(!set.is_empty());

        let set = ExclusionSet::for_item_type("Tablet ");
        assert!(!set.contains("tablet"));
        assert!(!set.contains("tablets"));
        assert!(set.contains("gummy"));
    }

    #[test]
    fn exclusion_set_drops_whole_synonym_group() {
        let set = ExclusionSet::for_item_type("gummy");
        assert!(!set.contains("gummy"));
        assert!(!set.contains("gummies"));
        assert!(set.contains("powder"));
    }

    #[test]
    fn plural_item_type_keeps_its_singular_form() {
        let set = ExclusionSet::for_item_type("gummies");
        assert!(!set.contains("gummy"));
        assert!(!set.contains("gummies"));

        // "gummy vitamins" lacks "gummies" but is still this product's form
        let p = ProductParams {
            title: "gummy vitamins".into(),
            item_type: "gummies".into(),
            min_search_volume: 0,
            similarity_threshold: 0,
        };
        let rows = vec![
            KeywordRow::new("gummy vitamins", 10),
            KeywordRow::new("vitamin tablets", 10),
        ];
        assert_eq!(run_rows(&rows, &p), vec!["gummy vitamins"]);
    }

    #[test]
    fn volume_gate_is_strict() {
        let title = "egcg capsule";
        let rows = vec![
            KeywordRow::new("egcg capsule", 200),
            KeywordRow::new("egcg capsule", 201),
        ];
        let kept = filter_keywords(
            &rows,
            &params(title, 200, 55),
            &ExclusionSet::for_item_type("capsule"),
        );
        assert_eq!(kept.matches.len(), 1);
        assert_eq!(kept.matches[0].search_volume, 201);
        assert_eq!(kept.rows_scanned, 2);
    }

    #[test]
    fn own_type_bypasses_exclusions() {
        let p = params("vegan capsule gummy style", 0, 0);
        let rows = vec![
            KeywordRow::new("vegan capsule gummy style", 10),
            KeywordRow::new("green tea gummies", 10),
        ];
        assert_eq!(run_rows(&rows, &p), vec!["vegan capsule gummy style"]);
    }

    #[test]
    fn end_to_end_example() {
        let table = KeywordTable::new(
            vec!["Keyword Phrase".into(), "Search Volume".into()],
            vec![
                vec![CellValue::String("egcg 200mg capsule".into()), CellValue::Integer(500)],
                vec![CellValue::String("green tea gummies".into()), CellValue::Integer(1000)],
                vec![CellValue::String("egcg supplement".into()), CellValue::Integer(150)],
            ],
        );
        let result = run(&table, &params("Protocol EGCg 200 mg capsule", 200, 55)).unwrap();
        assert_eq!(
            result.matches,
            vec![KeywordMatch {
                phrase: "egcg 200mg capsule".into(),
                search_volume: 500
            }]
        );
        assert_eq!(result.rows_scanned, 3);
    }

    #[test]
    fn keeps_input_order_and_original_case() {
        let p = params("Green Tea Extract Capsule", 0, 60);
        let rows = vec![
            KeywordRow::new("Tea Extract", 5),
            KeywordRow::new("unrelated zzz", 5),
            KeywordRow::new("GREEN TEA", 5),
        ];
        assert_eq!(run_rows(&rows, &p), vec!["Tea Extract", "GREEN TEA"]);
    }

    #[test]
    fn blank_title_is_configuration_error() {
        let table = KeywordTable::new(vec!["Keyword".into(), "Search Volume".into()], vec![]);
        let err = run(&table, &params("   ", 0, 0)).unwrap_err();
        assert!(matches!(err, FilterError::Configuration(_)));
    }

    #[test]
    fn missing_volume_column_is_schema_error() {
        let table = KeywordTable::new(
            vec!["Search Term".into(), "Vol.".into()],
            vec![vec![CellValue::String("egcg".into()), CellValue::Integer(900)]],
        );
        let err = run(&table, &params("egcg", 0, 0)).unwrap_err();
        assert!(matches!(err, FilterError::Schema { .. }));
    }

    #[test]
    fn malformed_volumes_coerce_to_zero() {
        let table = KeywordTable::new(
            vec!["Keyword Phrase".into(), "Search Volume".into()],
            vec![
                vec![CellValue::String("egcg".into()), CellValue::String("n/a".into())],
                vec![CellValue::String("egcg".into())],
            ],
        );
        let columns = resolve_columns(&table.column_names).unwrap();
        let rows = extract_rows(&table, columns);
        assert_eq!(rows, vec![KeywordRow::new("egcg", 0), KeywordRow::new("egcg", 0)]);
    }

    #[test]
    fn validated_clamps_ranges() {
        let p = ProductParams {
            min_search_volume: 1_000_000,
            similarity_threshold: 250,
            ..ProductParams::default()
        }
        .validated();
        assert_eq!(p.min_search_volume, MAX_MIN_SEARCH_VOLUME);
        assert_eq!(p.similarity_threshold, 100);
    }

    fn phrase_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "egcg", "green tea", "capsule", "gummies", "extract", "vegan", "200 mg", "powder",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn raising_threshold_never_adds_rows(
            phrases in prop::collection::vec(
                prop::collection::vec(phrase_strategy(), 1..4).prop_map(|w| w.join(" ")),
                0..20,
            ),
            low in 0u8..=100,
            bump in 0u8..=100,
        ) {
            let rows: Vec<KeywordRow> = phrases
                .iter()
                .map(|p| KeywordRow::new(p.clone(), 1_000))
                .collect();
            let high = low.saturating_add(bump).min(100);
            let title = "Protocol EGCg Green Tea Extract Vegan Capsules";
            let loose = run_rows(&rows, &params(title, 200, low));
            let strict = run_rows(&rows, &params(title, 200, high));
            prop_assert!(strict.len() <= loose.len());
        }

        #[test]
        fn exclusion_set_never_holds_item_type(item_type in "[a-z]{0,10}") {
            let set = ExclusionSet::for_item_type(&item_type);
            prop_assert!(!set.contains(&item_type));
            let plural = format!("{item_type}s");
            prop_assert!(!set.contains(&plural));
        }
    }
}
