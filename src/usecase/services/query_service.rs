use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::record::{headers_for, Entity};
use crate::domain::entities::report::Report;
use crate::domain::entities::tabular::Tabular;
use crate::domain::entities::task::Task;
use crate::domain::query::date_range::{filter_created, DateRange};
use crate::domain::query::search::{search, SearchCriteria, Searchable};
use crate::domain::query::sort::{sort_inventory, InventorySort};
use crate::domain::query::stats::{
    customer_stats, deal_stats, inventory_stats, lead_stats, report_stats, sales_stats, task_stats, CustomerStats,
    DealStats, EntityStats, InventoryStats, LeadStats, ReportStats, SalesStats, TaskStats,
};
use crate::domain::query::task_order::sort_tasks;
use crate::error::Result;
use crate::usecase::store::registry::Stores;

/// What the table of one kind should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewQuery {
    pub search: String,
    pub criteria: SearchCriteria,
    pub range: DateRange,
    pub inventory_sort: InventorySort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
    /// Completion flag, only for tasks.
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub kind: EntityKind,
    pub headers: &'static [&'static str],
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub range: DateRange,
    pub inventory: InventoryStats,
    pub customers: CustomerStats,
    pub leads: LeadStats,
    pub deals: DealStats,
    pub sales: SalesStats,
    pub tasks: TaskStats,
    pub reports: ReportStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRun {
    pub report: Report,
    pub stats: EntityStats,
}

pub struct QueryService {
    stores: Arc<Stores>,
}

impl QueryService {
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }

    /// Date filter on the creation field, then search, then the kind's ordering.
    pub fn view<Tz: TimeZone>(&self, kind: EntityKind, query: &ViewQuery, now: &DateTime<Tz>) -> Result<TableView> {
        let rows = match kind {
            EntityKind::Inventory => {
                let mut vehicles = narrow(self.stores.inventory.get_all()?, query, now);
                sort_inventory(&mut vehicles, query.inventory_sort);
                table_rows(&vehicles)
            }
            EntityKind::Customers => table_rows(&narrow(self.stores.customers.get_all()?, query, now)),
            EntityKind::Leads => table_rows(&narrow(self.stores.leads.get_all()?, query, now)),
            EntityKind::Deals => table_rows(&narrow(self.stores.deals.get_all()?, query, now)),
            EntityKind::Sales => table_rows(&narrow(self.stores.sales.get_all()?, query, now)),
            EntityKind::Tasks => {
                let mut tasks = narrow(self.stores.tasks.get_all()?, query, now);
                sort_tasks(&mut tasks);
                tasks
                    .iter()
                    .map(|task| TableRow {
                        completed: Some(task.is_completed()),
                        ..table_row(task)
                    })
                    .collect()
            }
            EntityKind::Reports => table_rows(&narrow(self.stores.reports.get_all()?, query, now)),
        };

        debug!(%kind, rows = rows.len(), search = %query.search, range = %query.range, "built table view");
        Ok(TableView {
            kind,
            headers: headers_for(kind),
            rows,
        })
    }

    pub fn calculate_stats<Tz: TimeZone>(
        &self,
        kind: EntityKind,
        range: &DateRange,
        now: &DateTime<Tz>,
    ) -> Result<EntityStats> {
        let stats = match kind {
            EntityKind::Inventory => {
                EntityStats::Inventory(inventory_stats(&filter_created(self.stores.inventory.get_all()?, range, now)))
            }
            EntityKind::Customers => {
                EntityStats::Customers(customer_stats(&filter_created(self.stores.customers.get_all()?, range, now)))
            }
            EntityKind::Leads => EntityStats::Leads(lead_stats(&filter_created(self.stores.leads.get_all()?, range, now))),
            EntityKind::Deals => EntityStats::Deals(deal_stats(&filter_created(self.stores.deals.get_all()?, range, now))),
            EntityKind::Sales => EntityStats::Sales(sales_stats(&filter_created(self.stores.sales.get_all()?, range, now))),
            EntityKind::Tasks => EntityStats::Tasks(task_stats(
                &filter_created(self.stores.tasks.get_all()?, range, now),
                now.date_naive(),
            )),
            EntityKind::Reports => {
                EntityStats::Reports(report_stats(&filter_created(self.stores.reports.get_all()?, range, now)))
            }
        };
        Ok(stats)
    }

    pub fn dashboard<Tz: TimeZone>(&self, range: &DateRange, now: &DateTime<Tz>) -> Result<DashboardStats> {
        let stores = &self.stores;
        Ok(DashboardStats {
            range: *range,
            inventory: inventory_stats(&filter_created(stores.inventory.get_all()?, range, now)),
            customers: customer_stats(&filter_created(stores.customers.get_all()?, range, now)),
            leads: lead_stats(&filter_created(stores.leads.get_all()?, range, now)),
            deals: deal_stats(&filter_created(stores.deals.get_all()?, range, now)),
            sales: sales_stats(&filter_created(stores.sales.get_all()?, range, now)),
            tasks: task_stats(&filter_created(stores.tasks.get_all()?, range, now), now.date_naive()),
            reports: report_stats(&filter_created(stores.reports.get_all()?, range, now)),
        })
    }

    pub fn ordered_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks = self.stores.tasks.get_all()?;
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    /// Computes a saved report and stamps its `lastRun`. `None` for an unknown id.
    pub fn run_report<Tz: TimeZone>(&self, id: &str, now: &DateTime<Tz>) -> Result<Option<ReportRun>> {
        let Some(report) = self.stores.reports.get(id)? else {
            return Ok(None);
        };
        let stats = self.calculate_stats(report.kind, &report.range, now)?;
        let ran_at = now.with_timezone(&Utc);
        let report = self
            .stores
            .reports
            .modify(id, |report| report.last_run = Some(ran_at))?
            .unwrap_or(report);
        debug!(id, kind = %report.kind, "ran report");
        Ok(Some(ReportRun { report, stats }))
    }
}

fn narrow<T, Tz>(records: Vec<T>, query: &ViewQuery, now: &DateTime<Tz>) -> Vec<T>
where
    T: Entity + Searchable,
    Tz: TimeZone,
{
    search(filter_created(records, &query.range, now), query.criteria, &query.search)
}

fn table_row<T: Entity + Tabular>(record: &T) -> TableRow {
    TableRow {
        id: record.id().to_string(),
        cells: record.to_row(),
        completed: None,
    }
}

fn table_rows<T: Entity + Tabular>(records: &[T]) -> Vec<TableRow> {
    records.iter().map(table_row).collect()
}
