use csv::{QuoteStyle, ReaderBuilder, Trim, WriterBuilder};

use crate::domain::entities::tabular::TabularData;
use crate::error::{CrmError, Result};

/// Parses CSV text with a required header row. Short rows are padded with
/// empty strings to the header width.
pub fn read_table(text: &str) -> Result<TabularData> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|name| name.is_empty()) {
        return Err(CrmError::Import("csv header is required".to_string()));
    }

    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    let header_len = columns.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let row = (0..header_len)
            .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
            .collect();
        rows.push(row);
    }

    Ok(TabularData { columns, rows })
}

/// Writes a header row and data rows, quoting every field.
pub fn write_table(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| CrmError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| CrmError::Export(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_trailing_columns_read_as_empty() {
        let table = read_table("firstName,lastName,email\nJohn,Smith\n").expect("parses");
        assert_eq!(table.columns, vec!["firstName", "lastName", "email"]);
        assert_eq!(table.rows, vec![vec!["John", "Smith", ""]]);
    }

    #[test]
    fn quoted_commas_and_quotes_survive_a_round_trip() {
        let rows = vec![vec![
            "Great, will follow up".to_string(),
            "He said \"soon\"".to_string(),
        ]];
        let text = write_table(&["notes", "quote"], &rows).expect("writes");
        assert!(text.starts_with("\"notes\",\"quote\""));

        let table = read_table(&text).expect("parses");
        assert_eq!(table.rows, rows);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = read_table("title\nCall\n,\nEmail\n").expect("parses");
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(read_table("").is_err());
    }
}
