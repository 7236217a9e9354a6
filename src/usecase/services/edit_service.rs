use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::record::CrmRecord;
use crate::domain::entities::task::Task;
use crate::error::{CrmError, Result};
use crate::usecase::store::registry::Stores;

/// Mutations driven by the presentation layer. Each call is one store operation.
pub struct EditService {
    stores: Arc<Stores>,
}

impl EditService {
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }

    pub fn add(&self, record: CrmRecord) -> Result<CrmRecord> {
        let stores = &self.stores;
        Ok(match record {
            CrmRecord::Inventory(record) => stores.inventory.add(record)?.into(),
            CrmRecord::Customers(record) => stores.customers.add(record)?.into(),
            CrmRecord::Leads(record) => stores.leads.add(record)?.into(),
            CrmRecord::Deals(record) => stores.deals.add(record)?.into(),
            CrmRecord::Sales(record) => stores.sales.add(record)?.into(),
            CrmRecord::Tasks(record) => stores.tasks.add(record)?.into(),
            CrmRecord::Reports(record) => stores.reports.add(record)?.into(),
        })
    }

    /// Shallow-merges `patch` onto a record. Unknown ids are `NotFound`.
    pub fn update(&self, kind: EntityKind, id: &str, patch: Map<String, Value>) -> Result<CrmRecord> {
        let stores = &self.stores;
        let updated: Option<CrmRecord> = match kind {
            EntityKind::Inventory => stores.inventory.update(id, patch)?.map(Into::into),
            EntityKind::Customers => stores.customers.update(id, patch)?.map(Into::into),
            EntityKind::Leads => stores.leads.update(id, patch)?.map(Into::into),
            EntityKind::Deals => stores.deals.update(id, patch)?.map(Into::into),
            EntityKind::Sales => stores.sales.update(id, patch)?.map(Into::into),
            EntityKind::Tasks => stores.tasks.update(id, patch)?.map(Into::into),
            EntityKind::Reports => stores.reports.update(id, patch)?.map(Into::into),
        };
        updated.ok_or_else(|| CrmError::NotFound {
            kind,
            id: id.to_string(),
        })
    }

    pub fn toggle_task(&self, id: &str) -> Result<Task> {
        let task = self
            .stores
            .tasks
            .modify(id, Task::toggle_completion)?
            .ok_or_else(|| CrmError::NotFound {
                kind: EntityKind::Tasks,
                id: id.to_string(),
            })?;
        debug!(id, status = %task.status, "toggled task");
        Ok(task)
    }

    /// Returns whether a record was removed.
    pub fn delete(&self, kind: EntityKind, id: &str) -> Result<bool> {
        let stores = &self.stores;
        match kind {
            EntityKind::Inventory => stores.inventory.delete(id),
            EntityKind::Customers => stores.customers.delete(id),
            EntityKind::Leads => stores.leads.delete(id),
            EntityKind::Deals => stores.deals.delete(id),
            EntityKind::Sales => stores.sales.delete(id),
            EntityKind::Tasks => stores.tasks.delete(id),
            EntityKind::Reports => stores.reports.delete(id),
        }
    }

    /// Wipes every slot, settings and session included.
    pub fn clear_all_data(&self) -> Result<()> {
        self.stores.clear_all()
    }

    /// Wipes every slot, then seeds each collection again.
    pub fn reset_demo_data(&self) -> Result<Vec<EntityKind>> {
        self.stores.clear_all()?;
        let seeded = self.stores.init_all()?;
        info!(kinds = seeded.len(), "reset demo data");
        Ok(seeded)
    }
}
