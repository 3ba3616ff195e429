use serde::{Deserialize, Serialize};

/// Turnout fields a table column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnoutField {
    Registered,
    Envelopes,
    Valid,
}

/// Maps one cell position in the turnout table to a named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub index: usize,
    pub field: TurnoutField,
}

/// Page-layout knobs for one election's result pages.
///
/// The defaults match the 2017 parliamentary election pages on volby.cz.
/// Pages from other years share the structure but differ in ids and link
/// shapes, so everything layout-specific lives here rather than in the
/// parsing code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Base URL that relative detail links are resolved against.
    pub base_url: String,
    /// Regex with one capture group extracting the municipality code from a
    /// detail link's href.
    pub code_pattern: String,
    /// `id` attribute of the turnout table on a detail page.
    pub turnout_table_id: String,
    /// Substring identifying the party-name column header; tables whose
    /// headers never mention it are not party-results tables.
    pub party_header_marker: String,
    /// Cell positions to read from qualifying turnout rows.
    pub turnout_columns: Vec<ColumnSpec>,
}

impl ScrapeConfig {
    /// Minimum cell count a turnout row must have to be read, derived from
    /// the column map so a layout change stays a data edit.
    pub fn min_turnout_cells(&self) -> usize {
        self.turnout_columns
            .iter()
            .map(|c| c.index + 1)
            .max()
            .unwrap_or(0)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            base_url: "https://www.volby.cz/pls/ps2017nss/".to_string(),
            code_pattern: r"xobec=(\d+)".to_string(),
            turnout_table_id: "ps311_t1".to_string(),
            party_header_marker: "Strana".to_string(),
            turnout_columns: vec![
                ColumnSpec {
                    index: 3,
                    field: TurnoutField::Registered,
                },
                ColumnSpec {
                    index: 4,
                    field: TurnoutField::Envelopes,
                },
                ColumnSpec {
                    index: 7,
                    field: TurnoutField::Valid,
                },
            ],
        }
    }
}
