use crate::types::ResultRecord;

use std::collections::BTreeSet;
use std::io::Write;

/// Columns that always lead the output, in this order, whether or not any
/// record filled them.
pub const PRIORITY_COLUMNS: [&str; 5] = ["code", "location", "registered", "envelopes", "valid"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Union of column names across all records: the priority columns first,
/// then every party name seen anywhere, lexicographically sorted.
pub fn fieldnames(records: &[ResultRecord]) -> Vec<String> {
    let parties: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.parties.keys())
        .map(String::as_str)
        .collect();

    PRIORITY_COLUMNS
        .iter()
        .copied()
        .chain(parties)
        .map(String::from)
        .collect()
}

/// Writes header plus one row per record. Fields a record does not carry
/// render as empty cells.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[ResultRecord],
    delimiter: u8,
) -> Result<(), ExportError> {
    let fields = fieldnames(records);

    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(&fields)?;
    for record in records {
        out.write_record(fields.iter().map(|f| record.field(f).unwrap_or("")))?;
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, location: &str, parties: &[(&str, &str)]) -> ResultRecord {
        let mut r = ResultRecord::new(code, location);
        for (party, votes) in parties {
            r.parties.insert(party.to_string(), votes.to_string());
        }
        r
    }

    #[test]
    fn fieldnames_start_with_priority_columns_then_sorted_parties() {
        let records = vec![
            record("1", "A", &[("Zelení", "5"), ("ANO 2011", "10")]),
            record("2", "B", &[("ODS", "7")]),
        ];

        let fields = fieldnames(&records);

        assert_eq!(
            fields,
            vec!["code", "location", "registered", "envelopes", "valid", "ANO 2011", "ODS", "Zelení"]
        );
    }

    #[test]
    fn fieldnames_cover_every_record_key() {
        let records = vec![
            record("1", "A", &[("X", "1")]),
            record("2", "B", &[("Y", "2"), ("Z", "3")]),
        ];

        let fields = fieldnames(&records);

        for r in &records {
            for key in r.parties.keys() {
                assert!(fields.iter().any(|f| f == key), "missing column {key}");
            }
        }
    }

    #[test]
    fn round_trip_preserves_values_and_fills_missing_with_empty() {
        let mut first = record("1", "Adamov", &[("Party A", "100")]);
        first.registered = Some("500".to_string());
        first.envelopes = Some("400".to_string());
        first.valid = Some("390".to_string());
        let second = record("2", "Brandýs", &[("Party B", "42")]);

        let records = vec![first, second];
        let mut buf = Vec::new();
        write_csv(&mut buf, &records, b',').unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            vec!["code", "location", "registered", "envelopes", "valid", "Party A", "Party B"]
        );

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0], vec!["1", "Adamov", "500", "400", "390", "100", ""]);
        assert_eq!(rows[1], vec!["2", "Brandýs", "", "", "", "", "42"]);
    }

    #[test]
    fn custom_delimiter_is_honored() {
        let records = vec![record("1", "Obec", &[("P", "9")])];
        let mut buf = Vec::new();
        write_csv(&mut buf, &records, b';').unwrap();

        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "code;location;registered;envelopes;valid;P");
    }
}
