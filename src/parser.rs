// 🏗️ Competitor CSV Parser
// Raw delimited text → loosely-typed rows → CompetitorRecord
//
// Wire format: header row + comma-separated values, NO quoting.
// A value containing a literal comma desynchronises its row; that is the
// format contract, not something to repair here.

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ============================================================================
// COLUMN NAMES
// ============================================================================

pub const COL_CATEGORY: &str = "Category";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_RANK: &str = "Rank";
pub const COL_SCHOOL_NAME: &str = "School Name";
pub const COL_SIMILARITY: &str = "Similarity Score";
pub const COL_STATE: &str = "State";
pub const COL_TYPE: &str = "Type";
pub const COL_RELIGION: &str = "Religion";
pub const COL_ACCEPTANCE_RATE: &str = "Acceptance Rate";
pub const COL_NICHE_GRADE: &str = "Niche Grade";

/// Header line of the published data file, in column order.
pub const EXPECTED_HEADERS: [&str; 10] = [
    COL_CATEGORY,
    COL_DESCRIPTION,
    COL_RANK,
    COL_SCHOOL_NAME,
    COL_SIMILARITY,
    COL_STATE,
    COL_TYPE,
    COL_RELIGION,
    COL_ACCEPTANCE_RATE,
    COL_NICHE_GRADE,
];

// ============================================================================
// RAW RECORD
// ============================================================================

/// One data line mapped positionally onto the header names.
///
/// Columns past the end of a short line are absent, not empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Set a column value. A repeated column name overwrites the earlier value.
    pub fn insert(&mut self, column: &str, value: &str) {
        match self.fields.iter_mut().find(|(name, _)| name == column) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((column.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a column, treating empty text as absent.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every present field is empty text (e.g. a line of bare commas).
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }
}

/// Parse raw CSV text into ordered loosely-typed records.
///
/// Never fails. Blank lines are skipped, short rows produce absent keys,
/// extra trailing values beyond the header are ignored, and no numeric
/// coercion happens here.
pub fn parse_csv(text: &str) -> Vec<RawRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(|h| h.to_string()).collect(),
        Err(e) => {
            warn!(error = %e, "competitor CSV has an unreadable header line");
            return Vec::new();
        }
    };

    if headers.iter().all(|h| h.is_empty()) {
        return Vec::new();
    }

    let mut records = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                // Line numbers are 1-based and the header is line 1
                warn!(line = index + 2, error = %e, "skipping unreadable CSV row");
                continue;
            }
        };

        let mut record = RawRecord::default();
        for (header, value) in headers.iter().zip(row.iter()) {
            record.insert(header, value);
        }

        if record.is_blank() {
            continue;
        }

        records.push(record);
    }

    records
}

// ============================================================================
// COMPETITOR RECORD
// ============================================================================

/// One competitor row. Values stay as text; numeric accessors parse on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub category: String,
    pub description: String,
    pub rank: String,
    pub school_name: String,
    pub similarity_score: String,
    pub state: String,
    pub institution_type: String,
    pub religion: Option<String>,
    pub acceptance_rate: String,
    pub niche_grade: String,
}

impl CompetitorRecord {
    /// Build a typed record from a raw row.
    ///
    /// Returns `None` when the key fields (category, school name) are missing
    /// or empty, or when the row is a repeated header line.
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let category = raw.non_empty(COL_CATEGORY)?;
        let school_name = raw.non_empty(COL_SCHOOL_NAME)?;

        if category == COL_CATEGORY {
            return None;
        }

        let text = |column: &str| raw.get(column).unwrap_or("").to_string();

        Some(CompetitorRecord {
            category: category.to_string(),
            description: text(COL_DESCRIPTION),
            rank: text(COL_RANK),
            school_name: school_name.to_string(),
            similarity_score: text(COL_SIMILARITY),
            state: text(COL_STATE),
            institution_type: text(COL_TYPE),
            religion: raw.non_empty(COL_RELIGION).map(|r| r.to_string()),
            acceptance_rate: text(COL_ACCEPTANCE_RATE),
            niche_grade: text(COL_NICHE_GRADE),
        })
    }

    /// Similarity score as a number; `None` for missing or non-numeric text.
    pub fn similarity(&self) -> Option<f64> {
        parse_decimal(&self.similarity_score)
    }

    /// Acceptance rate as a fraction in [0,1]; `None` when not numeric.
    pub fn acceptance(&self) -> Option<f64> {
        parse_decimal(&self.acceptance_rate)
    }

    pub fn rank_number(&self) -> Option<u32> {
        self.rank.trim().parse::<u32>().ok()
    }
}

fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Parse CSV text straight to competitor records, discarding rows that lack
/// a category or school name.
pub fn parse_competitors(text: &str) -> Vec<CompetitorRecord> {
    let raw = parse_csv(text);
    let total = raw.len();

    let records: Vec<CompetitorRecord> = raw.iter().filter_map(CompetitorRecord::from_raw).collect();

    if records.len() < total {
        debug!(
            discarded = total - records.len(),
            kept = records.len(),
            "discarded rows without category or school name"
        );
    }

    records
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Category,Description,Rank,School Name,Similarity Score,State,Type,Religion,Acceptance Rate,Niche Grade";

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parse_maps_values_onto_headers() {
        let text = csv(&["Faith-Based Alternatives,Religious peers,1,Oral Roberts University,0.30,Oklahoma,Private,Christian,0.71,B"]);
        let records = parse_csv(&text);

        assert_eq!(records.len(), 1);
        let row = &records[0];
        assert_eq!(row.get(COL_CATEGORY), Some("Faith-Based Alternatives"));
        assert_eq!(row.get(COL_SCHOOL_NAME), Some("Oral Roberts University"));
        assert_eq!(row.get(COL_SIMILARITY), Some("0.30"));
        assert_eq!(row.get(COL_NICHE_GRADE), Some("B"));
        assert_eq!(row.len(), EXPECTED_HEADERS.len());
    }

    #[test]
    fn test_short_row_leaves_trailing_keys_absent() {
        let text = csv(&["Regional Powerhouses,Big schools,2,Rice University"]);
        let records = parse_csv(&text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(COL_SCHOOL_NAME), Some("Rice University"));
        assert_eq!(records[0].get(COL_SIMILARITY), None);
        assert_eq!(records[0].get(COL_NICHE_GRADE), None);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = format!("{}\n\n   \n,,,,\n", csv(&["A,desc,1,Rice University,0.2,Texas,Private,,0.1,A+"]));
        let records = parse_csv(&text);

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = format!("{}\r\nA,desc,1,Rice University,0.2,Texas,Private,,0.1,A+\r\n", HEADER);
        let records = parse_competitors(&text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].niche_grade, "A+");
    }

    #[test]
    fn test_embedded_comma_desynchronises_row() {
        // Quotes are literal text, so the comma splits the school name
        let text = csv(&["A,desc,1,\"Sewanee, The University\",0.2,Tennessee,Private,,0.5,A"]);
        let records = parse_csv(&text);

        assert_eq!(records[0].get(COL_SCHOOL_NAME), Some("\"Sewanee"));
        assert_eq!(records[0].get(COL_SIMILARITY), Some("The University\""));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = csv(&[
            "A,desc,1,Rice University,0.2,Texas,Private,,0.1,A+",
            "B,desc,2,Baylor University,0.1,Texas,Private,Baptist,0.5,A-",
        ]);

        assert_eq!(parse_csv(&text), parse_csv(&text));
        assert_eq!(parse_competitors(&text), parse_competitors(&text));
    }

    #[test]
    fn test_rows_without_key_fields_are_discarded() {
        let text = csv(&[
            "A,desc,1,Rice University,0.2,Texas,Private,,0.1,A+",
            ",desc,2,Baylor University,0.1,Texas,Private,,0.5,A-",
            "A,desc,3,,0.1,Texas,Private,,0.5,A-",
            "A,desc",
        ]);
        let records = parse_competitors(&text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].school_name, "Rice University");
    }

    #[test]
    fn test_repeated_header_row_is_discarded() {
        let text = csv(&[HEADER, "A,desc,1,Rice University,0.2,Texas,Private,,0.1,A+"]);
        let records = parse_competitors(&text);

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_record_numeric_accessors() {
        let text = csv(&[
            "A,desc,4,Rice University,0.567,Texas,Private,,0.093,A+",
            "A,desc,x,Tulane University,N/A,Louisiana,Private,,,A+",
        ]);
        let records = parse_competitors(&text);

        assert_eq!(records[0].similarity(), Some(0.567));
        assert_eq!(records[0].acceptance(), Some(0.093));
        assert_eq!(records[0].rank_number(), Some(4));
        assert_eq!(records[0].religion, None);

        assert_eq!(records[1].similarity(), None);
        assert_eq!(records[1].acceptance(), None);
        assert_eq!(records[1].rank_number(), None);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let row = "A,desc,1,Rice University,0.2,Texas,Private,,0.1,A+";
        let records = parse_competitors(&csv(&[row, row]));

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv(HEADER).is_empty());
    }
}
