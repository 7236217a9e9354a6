use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use super::record::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Flat row mapping used by CSV import/export and table rendering.
pub trait Tabular: Sized {
    /// Column names in export order.
    const HEADERS: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;
    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError>;

    /// Key used to detect duplicates on import. Only leads define one.
    fn duplicate_key(&self) -> Option<String> {
        None
    }
}

/// One data row addressed by header name. Missing columns read as "".
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> RowView<'a> {
    pub fn new(columns: &'a [String], values: &'a [String]) -> Self {
        Self { columns, values }
    }

    /// Cell text exactly as read.
    pub fn get(&self, name: &str) -> &'a str {
        self.columns
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(name))
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn text(&self, name: &str) -> String {
        self.get(name).to_string()
    }

    /// Cell text with surrounding whitespace removed, for typed values.
    fn trimmed(&self, name: &str) -> &'a str {
        self.get(name).trim()
    }

    pub fn parse<F: FromStr>(&self, name: &'static str) -> Result<Option<F>, ValidationError> {
        let raw = self.trimmed(name);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<F>()
            .map(Some)
            .map_err(|_| ValidationError::new(name, format!("cannot parse '{raw}'")))
    }

    pub fn amount(&self, name: &'static str) -> Result<Option<f64>, ValidationError> {
        let raw = self.trimmed(name);
        if raw.is_empty() {
            return Ok(None);
        }
        let cleaned: String = raw
            .chars()
            .filter(|ch| !matches!(ch, '$' | ',' | ' '))
            .collect();
        cleaned
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ValidationError::new(name, format!("cannot parse amount '{raw}'")))
    }

    pub fn date(&self, name: &'static str) -> Result<Option<NaiveDate>, ValidationError> {
        let raw = self.trimmed(name);
        if raw.is_empty() {
            return Ok(None);
        }
        parse_date(raw)
            .map(Some)
            .ok_or_else(|| ValidationError::new(name, format!("cannot parse date '{raw}'")))
    }

    pub fn timestamp(&self, name: &'static str) -> Result<Option<DateTime<Utc>>, ValidationError> {
        let raw = self.trimmed(name);
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(at.with_timezone(&Utc)));
        }
        parse_date(raw)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Some(naive.and_utc()))
            .ok_or_else(|| ValidationError::new(name, format!("cannot parse timestamp '{raw}'")))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|at| at.date_naive())
        })
}

pub fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|at| at.to_rfc3339()).unwrap_or_default()
}

pub fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(columns: &[&str], values: &[&str]) -> (Vec<String>, Vec<String>) {
        (
            columns.iter().map(|c| c.to_string()).collect(),
            values.iter().map(|v| v.to_string()).collect(),
        )
    }

    #[test]
    fn text_keeps_padding_while_typed_values_ignore_it() {
        let (columns, values) = row(
            &["notes", "price", "dueDate"],
            &["  call back ", " 12,500 ", " 2024-03-15 "],
        );
        let view = RowView::new(&columns, &values);

        assert_eq!(view.text("notes"), "  call back ");
        assert_eq!(view.amount("price"), Ok(Some(12_500.0)));
        assert_eq!(view.date("dueDate"), Ok(NaiveDate::from_ymd_opt(2024, 3, 15)));
    }

    #[test]
    fn missing_and_blank_columns_read_as_absent() {
        let (columns, values) = row(&["price"], &["   "]);
        let view = RowView::new(&columns, &values);

        assert_eq!(view.text("notes"), "");
        assert_eq!(view.amount("price"), Ok(None));
    }
}
