//! Tab-separated bulk tables for the flat content families.
//!
//! Conditions, pain-management entries and ethics topics have no nested
//! structure beyond string lists, so they can be authored as spreadsheets
//! and exported as TSV. List-valued cells hold items separated by `|`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use medcontent_types::{
    well_known, ConditionEntry, ContentBody, ContentRecord, EthicsEntry, PainEntry,
};

use crate::types::{ContentError, ContentResult};

/// A content family that can be read from a tab-separated table.
pub trait TableSchema {
    /// Expected column names, in order.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Builds a record from one data row.
    fn from_row(row: &Row<'_>) -> ContentResult<ContentRecord>;
}

/// A data row with access by column position.
pub struct Row<'a> {
    record: &'a StringRecord,
}

impl Row<'_> {
    /// Returns the trimmed cell at `index` (empty if absent).
    pub fn text(&self, index: usize) -> String {
        self.record.get(index).unwrap_or("").trim().to_string()
    }

    /// Returns the `|`-separated items of the cell at `index`.
    pub fn list(&self, index: usize) -> Vec<String> {
        parse::list(self.record.get(index).unwrap_or(""))
    }
}

/// Autoimmune condition table (`conditions*.tsv`).
pub struct ConditionTable;

impl TableSchema for ConditionTable {
    const EXPECTED_COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "category",
        "icdCode",
        "description",
        "pathogenesis",
        "autoantibodies",
        "clinicalFeatures",
        "diagnosis",
        "treatment",
        "prognosis",
    ];

    fn from_row(row: &Row<'_>) -> ContentResult<ContentRecord> {
        Ok(ContentRecord::new(
            row.text(0),
            row.text(1),
            ContentBody::Condition(ConditionEntry {
                category: row.text(2),
                icd_code: row.text(3),
                description: row.text(4),
                pathogenesis: row.text(5),
                autoantibodies: row.list(6),
                clinical_features: row.list(7),
                diagnosis: row.list(8),
                treatment: row.text(9),
                prognosis: row.text(10),
            }),
        ))
    }
}

/// Pain-management table (`pain*.tsv`).
pub struct PainTable;

impl TableSchema for PainTable {
    const EXPECTED_COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "category",
        "description",
        "pathophysiology",
        "assessment",
        "management",
        "medications",
        "sideEffects",
        "keyPearls",
        "references",
    ];

    fn from_row(row: &Row<'_>) -> ContentResult<ContentRecord> {
        Ok(ContentRecord::new(
            row.text(0),
            row.text(1),
            ContentBody::PainManagement(PainEntry {
                category: row.text(2),
                description: row.text(3),
                pathophysiology: row.text(4),
                assessment: row.text(5),
                management: row.text(6),
                medications: row.list(7),
                side_effects: row.list(8),
                key_pearls: row.list(9),
                references: row.list(10),
            }),
        ))
    }
}

/// Medical ethics table (`ethics*.tsv`).
pub struct EthicsTable;

impl TableSchema for EthicsTable {
    const EXPECTED_COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "category",
        "description",
        "ethicalPrinciples",
        "legalConsiderations",
        "clinicalScenarios",
        "decisionFramework",
        "keyPearls",
        "references",
    ];

    fn from_row(row: &Row<'_>) -> ContentResult<ContentRecord> {
        Ok(ContentRecord::new(
            row.text(0),
            row.text(1),
            ContentBody::Ethics(EthicsEntry {
                category: row.text(2),
                description: row.text(3),
                ethical_principles: row.list(4),
                legal_considerations: row.list(5),
                clinical_scenarios: row.list(6),
                decision_framework: row.list(7),
                key_pearls: row.list(8),
                references: row.list(9),
            }),
        ))
    }
}

/// A streaming parser for content tables.
pub struct TableParser<R: Read, T: TableSchema> {
    reader: Reader<R>,
    rows_read: usize,
    _marker: PhantomData<T>,
}

impl<T: TableSchema> TableParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or has invalid headers.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ContentResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ContentError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read, T: TableSchema> TableParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R) -> ContentResult<Self> {
        // Cells are free text; quotes carry no meaning.
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(well_known::FIELD_DELIMITER)
            .has_headers(true)
            .flexible(false)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self::validate_headers(&mut csv_reader)?;

        Ok(Self {
            reader: csv_reader,
            rows_read: 0,
            _marker: PhantomData,
        })
    }

    /// Validates that the table has the expected column headers.
    fn validate_headers(reader: &mut Reader<R>) -> ContentResult<()> {
        let headers = reader.headers()?;
        let expected = T::EXPECTED_COLUMNS;

        if headers.len() != expected.len() {
            return Err(ContentError::InvalidHeader {
                expected: expected.len(),
                found: headers.len(),
            });
        }

        for (i, (expected_col, found)) in expected.iter().zip(headers.iter()).enumerate() {
            // Spreadsheet exports often start with a UTF-8 BOM
            let found = found.trim_start_matches('\u{feff}').trim();
            if found != *expected_col {
                return Err(ContentError::UnexpectedColumn {
                    position: i,
                    expected: expected_col.to_string(),
                    found: found.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns the number of data rows read so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Parses every row, stopping at the first error.
    pub fn parse_all(self) -> ContentResult<Vec<ContentRecord>> {
        self.collect()
    }
}

impl<R: Read, T: TableSchema> Iterator for TableParser<R, T> {
    type Item = ContentResult<ContentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.rows_read += 1;

                    if record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(T::from_row(&Row { record: &record }));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing cell values.
pub mod parse {
    use medcontent_types::{well_known, ComplexityLevel, InvalidLevelKey};

    use crate::types::ContentResult;

    /// Splits a list cell on `|`, trimming items and dropping empty ones.
    pub fn list(value: &str) -> Vec<String> {
        value
            .split(well_known::LIST_SEPARATOR)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parses a complexity rank (`"1"` to `"5"`).
    pub fn rank(value: &str) -> ContentResult<ComplexityLevel> {
        value
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(ComplexityLevel::from_rank)
            .ok_or_else(|| InvalidLevelKey(value.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcontent_types::{ComplexityLevel, ContentKind};

    const CONDITION_HEADER: &str = "id\tname\tcategory\ticdCode\tdescription\tpathogenesis\tautoantibodies\tclinicalFeatures\tdiagnosis\ttreatment\tprognosis\n";

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse::list("ANA | Anti-dsDNA|Anti-Smith"),
            vec!["ANA", "Anti-dsDNA", "Anti-Smith"]
        );
        assert!(parse::list("").is_empty());
        assert_eq!(parse::list("a||b|"), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(parse::rank("3").unwrap(), ComplexityLevel::Standard);
        assert_eq!(parse::rank(" 5 ").unwrap(), ComplexityLevel::Expert);
        assert!(matches!(
            parse::rank("6"),
            Err(ContentError::InvalidLevelKey(_))
        ));
        assert!(parse::rank("basic").is_err());
    }

    #[test]
    fn test_condition_table() {
        let data = format!(
            "\u{feff}{}{}\n{}",
            CONDITION_HEADER,
            "celiac-disease\tCeliac Disease\tgastrointestinal\tK90.0\tGluten-sensitive enteropathy with \"villous atrophy\"\tHLA-DQ2/DQ8\tAnti-tTG IgA|Anti-endomysial\tDiarrhea|Weight loss\tSerology|Duodenal biopsy\tGluten-free diet\tExcellent with adherence",
            "\t\t\t\t\t\t\t\t\t\t\n",
        );

        let mut parser =
            TableParser::<_, ConditionTable>::from_reader(data.as_bytes()).unwrap();
        let record = parser.next().unwrap().unwrap();
        assert!(parser.next().is_none());
        assert_eq!(parser.rows_read(), 2);

        assert_eq!(record.id, "celiac-disease");
        assert_eq!(record.kind(), ContentKind::Condition);
        assert_eq!(record.raw_category(), "gastrointestinal");
        match &record.body {
            ContentBody::Condition(entry) => {
                assert_eq!(entry.autoantibodies, vec!["Anti-tTG IgA", "Anti-endomysial"]);
                assert!(entry.description.contains("\"villous atrophy\""));
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_pain_and_ethics_tables() {
        let pain = "id\tname\tcategory\tdescription\tpathophysiology\tassessment\tmanagement\tmedications\tsideEffects\tkeyPearls\treferences\n\
            renal-colic\tRenal Colic\tacute-pain\tFlank pain\tUreteral spasm\tCT KUB\tNSAIDs first\tKetorolac|Morphine\tGI upset\tNSAIDs beat opioids\tEAU 2024\n";
        let records = TableParser::<_, PainTable>::from_reader(pain.as_bytes())
            .unwrap()
            .parse_all()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), ContentKind::PainManagement);

        let ethics = "id\tname\tcategory\tdescription\tethicalPrinciples\tlegalConsiderations\tclinicalScenarios\tdecisionFramework\tkeyPearls\treferences\n\
            informed-consent\tInformed Consent\tinformed-consent\tVoluntary agreement\tAutonomy\tCapacity\tSurgery\tDisclose|Confirm\tDocument\tBeauchamp\n";
        let records = TableParser::<_, EthicsTable>::from_reader(ethics.as_bytes())
            .unwrap()
            .parse_all()
            .unwrap();
        assert_eq!(records[0].raw_category(), "informed-consent");
    }

    #[test]
    fn test_header_validation() {
        let short = "id\tname\tcategory\n";
        assert!(matches!(
            TableParser::<_, ConditionTable>::from_reader(short.as_bytes()),
            Err(ContentError::InvalidHeader { expected: 11, found: 3 })
        ));

        let renamed = CONDITION_HEADER.replace("icdCode", "icd");
        match TableParser::<_, ConditionTable>::from_reader(renamed.as_bytes()) {
            Err(ContentError::UnexpectedColumn {
                position, found, ..
            }) => {
                assert_eq!(position, 3);
                assert_eq!(found, "icd");
            }
            _ => panic!("expected UnexpectedColumn"),
        }
    }

    #[test]
    fn test_from_missing_path() {
        assert!(matches!(
            TableParser::<_, PainTable>::from_path("/nonexistent/pain.tsv"),
            Err(ContentError::FileNotFound { .. })
        ));
    }
}
