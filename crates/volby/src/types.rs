use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// One municipality entry parsed from the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalityRef {
    /// Numeric id taken from the detail link's query string; empty when the
    /// link carries no such parameter.
    pub code: String,
    pub name: String,
    /// Absolute URL of the detail page.
    pub detail_url: String,
}

impl Display for MunicipalityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.code)
        }
    }
}

/// Extracted results for one municipality.
///
/// Known turnout fields are typed; party vote counts are open-ended because
/// different municipalities report different party sets. Party keys are kept
/// ordered so the output column order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub code: String,
    pub location: String,
    pub registered: Option<String>,
    pub envelopes: Option<String>,
    pub valid: Option<String>,
    pub parties: BTreeMap<String, String>,
}

impl ResultRecord {
    pub fn new(code: impl Into<String>, location: impl Into<String>) -> Self {
        ResultRecord {
            code: code.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    /// Looks up a value by output column name: the fixed fields first, then
    /// the party map. Absent fields yield `None`, never an error.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "code" => Some(&self.code),
            "location" => Some(&self.location),
            "registered" => self.registered.as_deref(),
            "envelopes" => self.envelopes.as_deref(),
            "valid" => self.valid.as_deref(),
            _ => self.parties.get(name).map(String::as_str),
        }
    }
}

/// A municipality whose detail page could not be fetched or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeFailure {
    pub code: String,
    pub name: String,
    pub reason: String,
}

impl Display for ScrapeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}: {}", self.name, self.reason)
        } else {
            write!(f, "{} ({}): {}", self.name, self.code, self.reason)
        }
    }
}

/// Outcome of a best-effort batch run: everything that parsed, plus every
/// municipality that didn't.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub records: Vec<ResultRecord>,
    pub failures: Vec<ScrapeFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_covers_fixed_and_party_columns() {
        let mut record = ResultRecord::new("529303", "Benešov");
        record.registered = Some("13104".to_string());
        record.parties.insert("ANO 2011".to_string(), "2577".to_string());

        assert_eq!(record.field("code"), Some("529303"));
        assert_eq!(record.field("location"), Some("Benešov"));
        assert_eq!(record.field("registered"), Some("13104"));
        assert_eq!(record.field("envelopes"), None);
        assert_eq!(record.field("ANO 2011"), Some("2577"));
        assert_eq!(record.field("Nonexistent Party"), None);
    }

    #[test]
    fn failure_display_includes_code_name_and_reason() {
        let failure = ScrapeFailure {
            code: "529303".to_string(),
            name: "Benešov".to_string(),
            reason: "HTTP request failed".to_string(),
        };
        let rendered = failure.to_string();
        assert!(rendered.contains("529303"));
        assert!(rendered.contains("Benešov"));
        assert!(rendered.contains("HTTP request failed"));
    }
}
