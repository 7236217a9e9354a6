use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;
use tracing::info;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::deal::Deal;
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::lead::Lead;
use crate::domain::entities::record::Entity;
use crate::domain::entities::report::Report;
use crate::domain::entities::sale::Sale;
use crate::domain::entities::tabular::Tabular;
use crate::domain::entities::task::Task;
use crate::domain::entities::vehicle::Vehicle;
use crate::domain::query::date_range::{filter_created, DateRange};
use crate::error::{CrmError, Result};
use crate::infra::tabular::csv::write_table;
use crate::usecase::services::import_service::DataFormat;
use crate::usecase::store::registry::{StoreFor, Stores};

/// CSV uses the kind's fixed column order; JSON is a pretty-printed array.
pub fn render<T: Tabular + Serialize>(records: &[T], format: DataFormat) -> Result<String> {
    match format {
        DataFormat::Csv => {
            let rows: Vec<Vec<String>> = records.iter().map(Tabular::to_row).collect();
            write_table(T::HEADERS, &rows)
        }
        DataFormat::Json => serde_json::to_string_pretty(records).map_err(|err| CrmError::Export(err.to_string())),
    }
}

/// Suggested file name, e.g. `leads_export_2024-03-15.csv`.
pub fn export_file_name(kind: EntityKind, format: DataFormat, today: NaiveDate) -> String {
    format!("{}_export_{}.{}", kind.slot_key(), today.format("%Y-%m-%d"), format.extension())
}

pub struct ExportService {
    stores: Arc<Stores>,
}

impl ExportService {
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }

    /// Records of `T` created inside `range`, rendered as `format`.
    pub fn export<T, Tz>(&self, format: DataFormat, range: &DateRange, now: &DateTime<Tz>) -> Result<String>
    where
        T: Entity + Tabular,
        Tz: TimeZone,
        Stores: StoreFor<T>,
    {
        let records = filter_created(StoreFor::<T>::store(self.stores.as_ref()).get_all()?, range, now);
        render(&records, format)
    }

    pub fn export_kind<Tz: TimeZone>(
        &self,
        kind: EntityKind,
        format: DataFormat,
        range: &DateRange,
        now: &DateTime<Tz>,
    ) -> Result<String> {
        match kind {
            EntityKind::Inventory => self.export::<Vehicle, Tz>(format, range, now),
            EntityKind::Customers => self.export::<Customer, Tz>(format, range, now),
            EntityKind::Leads => self.export::<Lead, Tz>(format, range, now),
            EntityKind::Deals => self.export::<Deal, Tz>(format, range, now),
            EntityKind::Sales => self.export::<Sale, Tz>(format, range, now),
            EntityKind::Tasks => self.export::<Task, Tz>(format, range, now),
            EntityKind::Reports => self.export::<Report, Tz>(format, range, now),
        }
    }

    /// Writes the export to `path`, picking the format from its extension.
    pub fn export_to_path<Tz: TimeZone>(
        &self,
        kind: EntityKind,
        path: &Path,
        range: &DateRange,
        now: &DateTime<Tz>,
    ) -> Result<()> {
        let format = DataFormat::from_path(path)
            .ok_or_else(|| CrmError::Export(format!("unsupported file type: {}", path.display())))?;
        let contents = self.export_kind(kind, format, range, now)?;
        std::fs::write(path, contents)?;
        info!(%kind, %format, path = %path.display(), "exported records");
        Ok(())
    }
}
