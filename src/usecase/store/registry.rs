use std::sync::Arc;

use tracing::info;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::deal::Deal;
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::lead::Lead;
use crate::domain::entities::record::{CrmRecord, Entity};
use crate::domain::entities::report::Report;
use crate::domain::entities::sale::Sale;
use crate::domain::entities::session::DemoAccount;
use crate::domain::entities::task::Task;
use crate::domain::entities::vehicle::Vehicle;
use crate::domain::seed;
use crate::error::Result;
use crate::usecase::ports::storage::SlotStorage;
use crate::usecase::store::auth::AuthGate;
use crate::usecase::store::record_store::{system_clock, Clock, RecordStore};
use crate::usecase::store::settings_store::SettingsStore;

/// Every store of the application over one shared slot storage.
pub struct Stores {
    pub inventory: RecordStore<Vehicle>,
    pub customers: RecordStore<Customer>,
    pub leads: RecordStore<Lead>,
    pub deals: RecordStore<Deal>,
    pub sales: RecordStore<Sale>,
    pub tasks: RecordStore<Task>,
    pub reports: RecordStore<Report>,
    pub settings: SettingsStore,
    pub auth: AuthGate,
    storage: Arc<dyn SlotStorage>,
}

impl Stores {
    pub fn new(storage: Arc<dyn SlotStorage>, account: DemoAccount) -> Self {
        Self::with_clock(storage, account, system_clock())
    }

    pub fn with_clock(storage: Arc<dyn SlotStorage>, account: DemoAccount, clock: Clock) -> Self {
        Self {
            inventory: RecordStore::for_entity(storage.clone(), seed::vehicles).with_clock(clock.clone()),
            customers: RecordStore::for_entity(storage.clone(), seed::customers).with_clock(clock.clone()),
            leads: RecordStore::for_entity(storage.clone(), seed::leads).with_clock(clock.clone()),
            deals: RecordStore::for_entity(storage.clone(), seed::deals).with_clock(clock.clone()),
            sales: RecordStore::for_entity(storage.clone(), seed::sales).with_clock(clock.clone()),
            tasks: RecordStore::for_entity(storage.clone(), seed::tasks).with_clock(clock.clone()),
            reports: RecordStore::for_entity(storage.clone(), seed::reports).with_clock(clock.clone()),
            settings: SettingsStore::new(storage.clone()).with_clock(clock.clone()),
            auth: AuthGate::new(storage.clone(), account).with_clock(clock),
            storage,
        }
    }

    /// Seeds every empty collection. Returns the kinds that were seeded.
    pub fn init_all(&self) -> Result<Vec<EntityKind>> {
        let mut seeded = Vec::new();
        for kind in EntityKind::ALL {
            let did_seed = match kind {
                EntityKind::Inventory => self.inventory.init()?,
                EntityKind::Customers => self.customers.init()?,
                EntityKind::Leads => self.leads.init()?,
                EntityKind::Deals => self.deals.init()?,
                EntityKind::Sales => self.sales.init()?,
                EntityKind::Tasks => self.tasks.init()?,
                EntityKind::Reports => self.reports.init()?,
            };
            if did_seed {
                seeded.push(kind);
            }
        }
        Ok(seeded)
    }

    /// Removes every slot, including settings and the session.
    pub fn clear_all(&self) -> Result<()> {
        self.storage.clear()?;
        info!("cleared all stored data");
        Ok(())
    }

    pub fn records(&self, kind: EntityKind) -> Result<Vec<CrmRecord>> {
        fn wrap<T: Entity + Into<CrmRecord>>(records: Vec<T>) -> Vec<CrmRecord> {
            records.into_iter().map(Into::into).collect()
        }

        Ok(match kind {
            EntityKind::Inventory => wrap(self.inventory.get_all()?),
            EntityKind::Customers => wrap(self.customers.get_all()?),
            EntityKind::Leads => wrap(self.leads.get_all()?),
            EntityKind::Deals => wrap(self.deals.get_all()?),
            EntityKind::Sales => wrap(self.sales.get_all()?),
            EntityKind::Tasks => wrap(self.tasks.get_all()?),
            EntityKind::Reports => wrap(self.reports.get_all()?),
        })
    }

    pub fn count(&self, kind: EntityKind) -> Result<usize> {
        match kind {
            EntityKind::Inventory => self.inventory.count(),
            EntityKind::Customers => self.customers.count(),
            EntityKind::Leads => self.leads.count(),
            EntityKind::Deals => self.deals.count(),
            EntityKind::Sales => self.sales.count(),
            EntityKind::Tasks => self.tasks.count(),
            EntityKind::Reports => self.reports.count(),
        }
    }
}

/// Picks the store holding records of type `T`.
pub trait StoreFor<T: Entity> {
    fn store(&self) -> &RecordStore<T>;
}

macro_rules! impl_store_for {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl StoreFor<$ty> for Stores {
                fn store(&self) -> &RecordStore<$ty> {
                    &self.$field
                }
            }
        )*
    };
}

impl_store_for! {
    Vehicle => inventory,
    Customer => customers,
    Lead => leads,
    Deal => deals,
    Sale => sales,
    Task => tasks,
    Report => reports,
}
