use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::domain::entities::customer::Customer;
use crate::domain::entities::deal::Deal;
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::lead::{Lead, LeadStatus};
use crate::domain::entities::report::Report;
use crate::domain::entities::sale::Sale;
use crate::domain::entities::task::{Priority, Task};
use crate::domain::entities::vehicle::{Vehicle, VehicleStatus};

/// A percentage rounded to one decimal place. Displays and serializes as a
/// fixed one-decimal string such as `"50.0"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percentage(f64);

impl Percentage {
    /// `part / total * 100`, or exactly zero when `total` is zero.
    pub fn of(part: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0.0);
        }
        let raw = part as f64 / total as f64 * 100.0;
        Self((raw * 10.0).round() / 10.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    pub available: usize,
    pub pending: usize,
    pub sold: usize,
    /// Sticker value of vehicles still available.
    pub available_value: f64,
    pub average_price: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total: usize,
    pub with_email: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStats {
    pub total: usize,
    pub new: usize,
    pub contacted: usize,
    pub qualified: usize,
    pub negotiating: usize,
    pub converted: usize,
    pub lost: usize,
    pub conversion_rate: Percentage,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealStats {
    pub total: usize,
    pub total_value: f64,
    /// Deals in `Closed Won`.
    pub closed: usize,
    pub closed_value: f64,
    pub conversion_rate: Percentage,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total: usize,
    pub revenue: f64,
    pub average_sale: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    pub open_high_priority: usize,
    pub completion_rate: Percentage,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityStats {
    Inventory(InventoryStats),
    Customers(CustomerStats),
    Leads(LeadStats),
    Deals(DealStats),
    Sales(SalesStats),
    Tasks(TaskStats),
    Reports(ReportStats),
}

impl EntityStats {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityStats::Inventory(_) => EntityKind::Inventory,
            EntityStats::Customers(_) => EntityKind::Customers,
            EntityStats::Leads(_) => EntityKind::Leads,
            EntityStats::Deals(_) => EntityKind::Deals,
            EntityStats::Sales(_) => EntityKind::Sales,
            EntityStats::Tasks(_) => EntityKind::Tasks,
            EntityStats::Reports(_) => EntityKind::Reports,
        }
    }

    /// Label/value pairs for a stats panel.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        match self {
            EntityStats::Inventory(stats) => vec![
                ("Total", stats.total.to_string()),
                ("Available", stats.available.to_string()),
                ("Pending", stats.pending.to_string()),
                ("Sold", stats.sold.to_string()),
                ("Available Value", format!("{:.2}", stats.available_value)),
                ("Average Price", format!("{:.2}", stats.average_price)),
            ],
            EntityStats::Customers(stats) => vec![
                ("Total", stats.total.to_string()),
                ("With Email", stats.with_email.to_string()),
            ],
            EntityStats::Leads(stats) => vec![
                ("Total", stats.total.to_string()),
                ("New", stats.new.to_string()),
                ("Contacted", stats.contacted.to_string()),
                ("Converted", stats.converted.to_string()),
                ("Conversion Rate", format!("{}%", stats.conversion_rate)),
            ],
            EntityStats::Deals(stats) => vec![
                ("Total", stats.total.to_string()),
                ("Total Value", format!("{:.2}", stats.total_value)),
                ("Closed", stats.closed.to_string()),
                ("Closed Value", format!("{:.2}", stats.closed_value)),
                ("Conversion Rate", format!("{}%", stats.conversion_rate)),
            ],
            EntityStats::Sales(stats) => vec![
                ("Total", stats.total.to_string()),
                ("Revenue", format!("{:.2}", stats.revenue)),
                ("Average Sale", format!("{:.2}", stats.average_sale)),
            ],
            EntityStats::Tasks(stats) => vec![
                ("Total", stats.total.to_string()),
                ("Completed", stats.completed.to_string()),
                ("Overdue", stats.overdue.to_string()),
                ("Open High Priority", stats.open_high_priority.to_string()),
                ("Completion Rate", format!("{}%", stats.completion_rate)),
            ],
            EntityStats::Reports(stats) => vec![("Total", stats.total.to_string())],
        }
    }
}

pub fn inventory_stats(vehicles: &[Vehicle]) -> InventoryStats {
    let count = |status: VehicleStatus| vehicles.iter().filter(|v| v.status == status).count();
    let available_value: f64 = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Available)
        .map(|v| v.price)
        .sum();
    let price_sum: f64 = vehicles.iter().map(|v| v.price).sum();

    InventoryStats {
        total: vehicles.len(),
        available: count(VehicleStatus::Available),
        pending: count(VehicleStatus::Pending),
        sold: count(VehicleStatus::Sold),
        available_value,
        average_price: average(price_sum, vehicles.len()),
    }
}

pub fn customer_stats(customers: &[Customer]) -> CustomerStats {
    CustomerStats {
        total: customers.len(),
        with_email: customers
            .iter()
            .filter(|c| !c.email.trim().is_empty())
            .count(),
    }
}

pub fn lead_stats(leads: &[Lead]) -> LeadStats {
    let count = |status: LeadStatus| leads.iter().filter(|l| l.status == status).count();
    let converted = count(LeadStatus::Converted);

    LeadStats {
        total: leads.len(),
        new: count(LeadStatus::New),
        contacted: count(LeadStatus::Contacted),
        qualified: count(LeadStatus::Qualified),
        negotiating: count(LeadStatus::Negotiating),
        converted,
        lost: count(LeadStatus::Lost),
        conversion_rate: Percentage::of(converted, leads.len()),
    }
}

pub fn deal_stats(deals: &[Deal]) -> DealStats {
    let won: Vec<&Deal> = deals.iter().filter(|d| d.is_won()).collect();

    DealStats {
        total: deals.len(),
        total_value: deals.iter().map(|d| d.value).sum(),
        closed: won.len(),
        closed_value: won.iter().map(|d| d.value).sum(),
        conversion_rate: Percentage::of(won.len(), deals.len()),
    }
}

pub fn sales_stats(sales: &[Sale]) -> SalesStats {
    let revenue: f64 = sales.iter().map(|s| s.sale_price).sum();
    SalesStats {
        total: sales.len(),
        revenue,
        average_sale: average(revenue, sales.len()),
    }
}

pub fn task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    TaskStats {
        total: tasks.len(),
        completed,
        overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        open_high_priority: tasks
            .iter()
            .filter(|t| !t.is_completed() && t.priority == Priority::High)
            .count(),
        completion_rate: Percentage::of(completed, tasks.len()),
    }
}

pub fn report_stats(reports: &[Report]) -> ReportStats {
    ReportStats {
        total: reports.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::deal::DealStatus;
    use crate::domain::entities::task::TaskStatus;

    #[test]
    fn deal_stats_sum_totals_and_closed_won() {
        let deals = vec![
            Deal::new("Ann", "Civic", 1000.0, DealStatus::ClosedWon),
            Deal::new("Bob", "Accord", 500.0, DealStatus::Pending),
        ];
        let stats = deal_stats(&deals);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.total_value, 1500.0);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.closed_value, 1000.0);
        assert_eq!(stats.conversion_rate.to_string(), "50.0");
    }

    #[test]
    fn empty_collections_report_zero_rates() {
        assert_eq!(deal_stats(&[]).conversion_rate.value(), 0.0);
        assert_eq!(lead_stats(&[]).conversion_rate.value(), 0.0);
        assert_eq!(sales_stats(&[]).average_sale, 0.0);
        assert_eq!(inventory_stats(&[]).average_price, 0.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(Percentage::of(1, 3).to_string(), "33.3");
        assert_eq!(Percentage::of(2, 3).value(), 66.7);
        let json = serde_json::to_string(&Percentage::of(1, 2)).expect("serializes");
        assert_eq!(json, "\"50.0\"");
    }

    #[test]
    fn task_stats_count_overdue_only_when_open() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).expect("valid date");
        let yesterday = today.pred_opt();
        let mut done = Task::new("Call back", Priority::High, yesterday);
        done.status = TaskStatus::Completed;
        let late = Task::new("Send quote", Priority::High, yesterday);
        let later = Task::new("Order parts", Priority::Low, Some(today));

        let stats = task_stats(&[done, late, later], today);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.open_high_priority, 1);
        assert_eq!(stats.completion_rate.to_string(), "33.3");
    }
}
