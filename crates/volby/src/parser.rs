use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::{ScrapeConfig, TurnoutField};
use crate::types::{MunicipalityRef, ResultRecord};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid base URL '{0}': {1}")]
    BaseUrl(String, url::ParseError),
    #[error("Failed to resolve link '{0}': {1}")]
    LinkResolve(String, url::ParseError),
    #[error("Invalid code pattern '{0}': {1}")]
    CodePattern(String, regex::Error),
}

static SEL_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("invalid selector: table"));
static SEL_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));
static SEL_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("invalid selector: td"));
static SEL_HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("invalid selector: th"));
static SEL_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("invalid selector: a"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Strips every whitespace character, not just the edges. Vote counts on the
/// source pages embed thousands separators rendered as spaces or NBSPs.
pub fn clean_number(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses the municipality index page into an ordered list of
/// (code, name, detail URL) entries.
///
/// Every table on the page is scanned; the first two rows of each table are
/// header/separator rows and skipped. A row qualifies with at least 3 data
/// cells; its name sits in the second cell and its detail link in the first.
/// Rows without a link are reported and skipped, they are not municipalities.
pub fn parse_municipality_list(
    html: &str,
    config: &ScrapeConfig,
) -> Result<Vec<MunicipalityRef>, ParseError> {
    let document = Html::parse_document(html);
    let base = Url::parse(&config.base_url)
        .map_err(|e| ParseError::BaseUrl(config.base_url.clone(), e))?;
    let code_re = Regex::new(&config.code_pattern)
        .map_err(|e| ParseError::CodePattern(config.code_pattern.clone(), e))?;

    let mut municipalities = Vec::new();

    for table in document.select(&SEL_TABLE) {
        for row in table.select(&SEL_ROW).skip(2) {
            let cells: Vec<ElementRef> = row.select(&SEL_CELL).collect();
            if cells.len() < 3 {
                continue;
            }

            let name = elem_text(cells[1]).trim().to_string();

            let Some(href) = cells[0]
                .select(&SEL_ANCHOR)
                .next()
                .and_then(|a| a.value().attr("href"))
            else {
                log::warn!("No detail link for municipality '{}', skipping", name);
                continue;
            };

            let detail_url = base
                .join(href)
                .map_err(|e| ParseError::LinkResolve(href.to_string(), e))?;

            let code = code_re
                .captures(href)
                .map(|caps| caps[1].to_string())
                .unwrap_or_default();

            municipalities.push(MunicipalityRef {
                code,
                name,
                detail_url: detail_url.to_string(),
            });
        }
    }

    Ok(municipalities)
}

/// Extracts one municipality's record from its detail page.
///
/// The record always carries the code and name it was called with. Turnout
/// fields come from the table with the configured id, party votes from every
/// table whose headers mention the party column marker; either block may be
/// absent without failing the extraction.
pub fn parse_results(html: &str, code: &str, name: &str, config: &ScrapeConfig) -> ResultRecord {
    let document = Html::parse_document(html);
    let mut record = ResultRecord::new(code, name);

    extract_turnout(&document, &mut record, config);
    extract_party_votes(&document, &mut record, config);

    record
}

fn extract_turnout(document: &Html, record: &mut ResultRecord, config: &ScrapeConfig) {
    let turnout_table = document
        .select(&SEL_TABLE)
        .find(|t| t.value().attr("id") == Some(config.turnout_table_id.as_str()));
    let Some(table) = turnout_table else {
        return;
    };

    let min_cells = config.min_turnout_cells();

    for row in table.select(&SEL_ROW) {
        let cells: Vec<ElementRef> = row.select(&SEL_CELL).collect();
        // Header and footer rows are narrower than the data row.
        if cells.len() < min_cells {
            continue;
        }

        for column in &config.turnout_columns {
            let value = clean_number(&elem_text(cells[column.index]));
            match column.field {
                TurnoutField::Registered => record.registered = Some(value),
                TurnoutField::Envelopes => record.envelopes = Some(value),
                TurnoutField::Valid => record.valid = Some(value),
            }
        }
    }
}

fn extract_party_votes(document: &Html, record: &mut ResultRecord, config: &ScrapeConfig) {
    for table in document.select(&SEL_TABLE) {
        let is_party_table = table
            .select(&SEL_HEADER)
            .any(|th| elem_text(th).contains(&config.party_header_marker));
        if !is_party_table {
            continue;
        }

        for row in table.select(&SEL_ROW) {
            let cells: Vec<ElementRef> = row.select(&SEL_CELL).collect();
            if cells.len() < 3 {
                continue;
            }

            let party = elem_text(cells[1]).trim().to_string();
            if party.is_empty() {
                continue;
            }

            // Duplicate party names within one page: last occurrence wins.
            let votes = clean_number(&elem_text(cells[2]));
            record.parties.insert(party, votes);
        }
    }
}
