use crate::types::ScrapeReport;

use std::collections::BTreeSet;

#[derive(Debug)]
pub struct ScrapeStats {
    pub municipalities: usize,
    pub parties: usize,
    pub failures: usize,
}

impl ScrapeStats {
    pub fn from_report(report: &ScrapeReport) -> ScrapeStats {
        let parties: BTreeSet<&str> = report
            .records
            .iter()
            .flat_map(|r| r.parties.keys())
            .map(String::as_str)
            .collect();

        ScrapeStats {
            municipalities: report.records.len(),
            parties: parties.len(),
            failures: report.failures.len(),
        }
    }
}

impl std::fmt::Display for ScrapeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Municipalities scraped: {}", self.municipalities)?;
        writeln!(f, "  Distinct parties:       {}", self.parties)?;
        writeln!(f, "  Failed municipalities:  {}", self.failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ResultRecord, ScrapeFailure};

    #[test]
    fn stats_count_records_distinct_parties_and_failures() {
        let mut first = ResultRecord::new("1", "A");
        first.parties.insert("X".to_string(), "1".to_string());
        first.parties.insert("Y".to_string(), "2".to_string());
        let mut second = ResultRecord::new("2", "B");
        second.parties.insert("Y".to_string(), "3".to_string());

        let report = ScrapeReport {
            records: vec![first, second],
            failures: vec![ScrapeFailure {
                code: "3".to_string(),
                name: "C".to_string(),
                reason: "timeout".to_string(),
            }],
        };

        let stats = ScrapeStats::from_report(&report);
        assert_eq!(stats.municipalities, 2);
        assert_eq!(stats.parties, 2);
        assert_eq!(stats.failures, 1);

        let rendered = stats.to_string();
        assert!(rendered.contains("Municipalities scraped: 2"));
        assert!(rendered.contains("Failed municipalities:  1"));
    }
}
