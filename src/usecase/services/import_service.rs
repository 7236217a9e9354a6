use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::entities::customer::Customer;
use crate::domain::entities::deal::Deal;
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::lead::Lead;
use crate::domain::entities::record::Entity;
use crate::domain::entities::report::Report;
use crate::domain::entities::sale::Sale;
use crate::domain::entities::tabular::{RowView, Tabular};
use crate::domain::entities::task::Task;
use crate::domain::entities::vehicle::Vehicle;
use crate::error::{CrmError, Result};
use crate::infra::tabular::csv::read_table;
use crate::usecase::store::registry::{StoreFor, Stores};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub const ALL: [DataFormat; 2] = [DataFormat::Csv, DataFormat::Json];

    /// Detects the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(DataFormat::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(DataFormat::Json)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataFormat::Csv => "CSV",
            DataFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An input row that did not become a record. `row` counts data rows from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

/// One pending import: the raw input, its parsed records and the rows that
/// were rejected. Nothing reaches storage until it is committed.
pub struct ImportSession<T> {
    format: DataFormat,
    text: String,
    check_duplicates: bool,
    parsed: bool,
    records: Vec<T>,
    rejected: Vec<RejectedRow>,
}

impl<T: Entity + Tabular> ImportSession<T> {
    pub fn from_text(format: DataFormat, text: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
            check_duplicates: false,
            parsed: false,
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let format = DataFormat::from_path(path).ok_or_else(|| {
            CrmError::Import(format!("unsupported file type: {}", path.display()))
        })?;
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(format, text))
    }

    pub fn with_duplicate_check(mut self, enabled: bool) -> Self {
        self.check_duplicates = enabled;
        self
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    pub fn checks_duplicates(&self) -> bool {
        self.check_duplicates
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Splits the input into accepted records and rejected rows. Fails only
    /// when the input as a whole is unreadable.
    pub fn parse(&mut self) -> Result<&[T]> {
        if !self.parsed {
            let kind = T::KIND;
            let (records, rejected) = match self.format {
                DataFormat::Csv => parse_csv(&self.text)?,
                DataFormat::Json => parse_json(&self.text)?,
            };
            for rejected_row in &rejected {
                warn!(%kind, row = rejected_row.row, reason = %rejected_row.reason, "rejected import row");
            }
            debug!(%kind, accepted = records.len(), rejected = rejected.len(), "parsed import");
            self.records = records;
            self.rejected = rejected;
            self.parsed = true;
        }
        Ok(&self.records)
    }

    pub fn preview(&self, limit: usize) -> &[T] {
        &self.records[..limit.min(self.records.len())]
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }
}

/// Imported records always get a fresh id from the store.
fn accept<T: Entity>(mut record: T) -> std::result::Result<T, String> {
    record.set_id(String::new());
    record.validate().map_err(|err| err.to_string())?;
    Ok(record)
}

type Parsed<T> = (Vec<T>, Vec<RejectedRow>);

fn parse_csv<T: Entity + Tabular>(text: &str) -> Result<Parsed<T>> {
    let table = read_table(text)?;
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for (idx, values) in table.rows.iter().enumerate() {
        let row = RowView::new(&table.columns, values);
        match T::from_row(&row).map_err(|err| err.to_string()).and_then(accept) {
            Ok(record) => records.push(record),
            Err(reason) => rejected.push(RejectedRow { row: idx + 1, reason }),
        }
    }
    Ok((records, rejected))
}

fn parse_json<T: Entity>(text: &str) -> Result<Parsed<T>> {
    let values: Vec<Value> =
        serde_json::from_str(text).map_err(|err| CrmError::Import(format!("expected a JSON array of records: {err}")))?;
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value).map_err(|err| err.to_string()).and_then(accept) {
            Ok(record) => records.push(record),
            Err(reason) => rejected.push(RejectedRow { row: idx + 1, reason }),
        }
    }
    Ok((records, rejected))
}

pub struct ImportService {
    stores: Arc<Stores>,
}

impl ImportService {
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }

    /// Adds the session's records in one write. With the duplicate check on,
    /// records whose key already exists in the store or earlier in the batch
    /// are skipped.
    pub fn commit<T>(&self, mut session: ImportSession<T>) -> Result<ImportSummary>
    where
        T: Entity + Tabular,
        Stores: StoreFor<T>,
    {
        session.parse()?;
        let store = StoreFor::<T>::store(self.stores.as_ref());
        let rejected = session.rejected.len();
        let candidates = std::mem::take(&mut session.records);

        let mut duplicates = 0;
        let accepted = if session.check_duplicates {
            let mut seen: HashSet<String> = store
                .get_all()?
                .iter()
                .filter_map(<T as Tabular>::duplicate_key)
                .collect();
            let mut kept = Vec::with_capacity(candidates.len());
            for record in candidates {
                if record.duplicate_key().is_some_and(|key| !seen.insert(key)) {
                    duplicates += 1;
                } else {
                    kept.push(record);
                }
            }
            kept
        } else {
            candidates
        };

        let imported = store.add_many(accepted)?.len();
        let kind = T::KIND;
        let summary = ImportSummary {
            imported,
            duplicates,
            rejected,
        };
        info!(%kind, imported, duplicates, rejected, "import committed");
        Ok(summary)
    }

    /// Reads `path` as records of `kind` and commits them.
    pub fn import_path(&self, kind: EntityKind, path: &Path, check_duplicates: bool) -> Result<ImportSummary> {
        match kind {
            EntityKind::Inventory => self.import_file::<Vehicle>(path, check_duplicates),
            EntityKind::Customers => self.import_file::<Customer>(path, check_duplicates),
            EntityKind::Leads => self.import_file::<Lead>(path, check_duplicates),
            EntityKind::Deals => self.import_file::<Deal>(path, check_duplicates),
            EntityKind::Sales => self.import_file::<Sale>(path, check_duplicates),
            EntityKind::Tasks => self.import_file::<Task>(path, check_duplicates),
            EntityKind::Reports => self.import_file::<Report>(path, check_duplicates),
        }
    }

    fn import_file<T>(&self, path: &Path, check_duplicates: bool) -> Result<ImportSummary>
    where
        T: Entity + Tabular,
        Stores: StoreFor<T>,
    {
        let session = ImportSession::<T>::from_file(path)?.with_duplicate_check(check_duplicates);
        self.commit(session)
    }
}
