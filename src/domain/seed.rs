//! Example records inserted the first time a collection is found empty.

use chrono::{Days, Local, NaiveDate};

use crate::domain::entities::customer::{Address, Customer};
use crate::domain::entities::deal::{Deal, DealStatus, FinanceDetails};
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::lead::{Lead, LeadStatus, VehicleInterest};
use crate::domain::entities::report::Report;
use crate::domain::entities::sale::{PaymentMethod, Sale};
use crate::domain::entities::task::{Priority, Task, TaskStatus};
use crate::domain::entities::vehicle::{Vehicle, VehicleStatus};
use crate::domain::query::date_range::DateRange;

fn days_from_today(days: i64) -> Option<NaiveDate> {
    let today = Local::now().date_naive();
    if days >= 0 {
        today.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

pub fn vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            trim: "EX".to_string(),
            vin: "1HGCV1F34LA000001".to_string(),
            color: "Silver".to_string(),
            mileage: 12_450,
            ..Vehicle::new(2022, "Honda", "Accord", 26_500.0)
        },
        Vehicle {
            trim: "XLE".to_string(),
            vin: "4T1G11AK5MU000002".to_string(),
            color: "Blue".to_string(),
            mileage: 8_200,
            ..Vehicle::new(2023, "Toyota", "Camry", 28_900.0)
        },
        Vehicle {
            trim: "Lariat".to_string(),
            vin: "1FTFW1E50NF000003".to_string(),
            color: "Black".to_string(),
            mileage: 21_300,
            status: VehicleStatus::Pending,
            ..Vehicle::new(2021, "Ford", "F-150", 41_750.0)
        },
    ]
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            email: "maria.garcia@example.com".to_string(),
            phone: "(555) 201-3344".to_string(),
            address: Address {
                street: "18 Elm Street".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62704".to_string(),
            },
            ..Customer::new("Maria", "Garcia")
        },
        Customer {
            email: "david.chen@example.com".to_string(),
            phone: "(555) 876-1200".to_string(),
            notes: "Prefers text messages".to_string(),
            ..Customer::new("David", "Chen")
        },
    ]
}

pub fn leads() -> Vec<Lead> {
    vec![
        Lead {
            phone: "(555) 123-4567".to_string(),
            source: "Website".to_string(),
            status: LeadStatus::New,
            interest: "SUV".to_string(),
            assigned_to: "Sarah".to_string(),
            next_follow_up: days_from_today(2),
            vehicle_interest: VehicleInterest {
                make: "Toyota".to_string(),
                model: "RAV4".to_string(),
                year: Some(2023),
                budget: Some(32_000.0),
            },
            ..Lead::new("John", "Smith", "john.smith@example.com")
        },
        Lead {
            phone: "(555) 987-6543".to_string(),
            source: "Referral".to_string(),
            status: LeadStatus::Contacted,
            interest: "Sedan".to_string(),
            notes: "Wants a test drive on the weekend".to_string(),
            assigned_to: "Mike".to_string(),
            last_contact: days_from_today(-1),
            next_follow_up: days_from_today(3),
            vehicle_interest: VehicleInterest {
                make: "Honda".to_string(),
                model: "Accord".to_string(),
                year: Some(2022),
                budget: Some(27_000.0),
            },
            ..Lead::new("Emily", "Johnson", "emily.johnson@example.com")
        },
    ]
}

pub fn deals() -> Vec<Deal> {
    vec![
        Deal {
            finance_details: Some(FinanceDetails {
                down_payment: 5_000.0,
                term_months: 60,
                apr: 4.9,
                lender: "First Auto Credit".to_string(),
            }),
            ..Deal::new("Maria Garcia", "2022 Honda Accord EX", 26_000.0, DealStatus::Negotiating)
        },
        Deal {
            close_date: days_from_today(-5),
            ..Deal::new("David Chen", "2021 Ford F-150 Lariat", 41_000.0, DealStatus::ClosedWon)
        },
    ]
}

pub fn sales() -> Vec<Sale> {
    vec![Sale {
        sale_date: days_from_today(-5),
        salesperson: "Mike".to_string(),
        payment_method: PaymentMethod::Finance,
        ..Sale::new("David Chen", "2021 Ford F-150 Lariat", 41_000.0)
    }]
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task {
            assigned_to: "Sarah".to_string(),
            related_to: "John Smith".to_string(),
            ..Task::new("Follow up with John Smith", Priority::High, days_from_today(1))
        },
        Task {
            description: "Confirm financing paperwork".to_string(),
            assigned_to: "Mike".to_string(),
            related_to: "Maria Garcia".to_string(),
            status: TaskStatus::InProgress,
            ..Task::new("Prepare Accord contract", Priority::Medium, days_from_today(3))
        },
        Task {
            assigned_to: "Sarah".to_string(),
            ..Task::new("Update inventory photos", Priority::Low, days_from_today(7))
        },
    ]
}

pub fn reports() -> Vec<Report> {
    vec![
        Report::new("Monthly Deals", EntityKind::Deals, DateRange::ThisMonth),
        Report::new("Lead Pipeline", EntityKind::Leads, DateRange::AllTime),
    ]
}
