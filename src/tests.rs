use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

use crate::domain::entities::deal::{Deal, DealStatus};
use crate::domain::entities::kind::{EntityKind, SESSION_KEY, SETTINGS_KEY};
use crate::domain::entities::lead::{Lead, LeadStatus};
use crate::domain::entities::record::CrmRecord;
use crate::domain::entities::session::DemoAccount;
use crate::domain::entities::settings::Theme;
use crate::domain::entities::tabular::Tabular;
use crate::domain::entities::task::{Priority, Task, TaskStatus};
use crate::domain::entities::vehicle::Vehicle;
use crate::domain::query::date_range::DateRange;
use crate::domain::query::search::{SearchCriteria, SearchField};
use crate::domain::query::stats::EntityStats;
use crate::domain::query::task_order::sort_tasks;
use crate::domain::seed;
use crate::infra::memory::MemorySlotStorage;
use crate::infra::sqlite::storage::SqliteSlotStorage;
use crate::usecase::ports::storage::SlotStorage;
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::import_service::{DataFormat, ImportService, ImportSession};
use crate::usecase::services::query_service::{QueryService, ViewQuery};
use crate::usecase::store::record_store::{Clock, IdGenerator, RecordStore};
use crate::usecase::store::registry::Stores;
use crate::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn fixed_clock() -> Clock {
    Arc::new(fixed_now)
}

fn sequential_ids() -> IdGenerator {
    let next = Arc::new(AtomicUsize::new(1));
    Arc::new(move || format!("id-{}", next.fetch_add(1, Ordering::Relaxed)))
}

fn memory_storage() -> Arc<dyn SlotStorage> {
    Arc::new(MemorySlotStorage::new())
}

fn lead_store(storage: Arc<dyn SlotStorage>) -> RecordStore<Lead> {
    RecordStore::for_entity(storage, seed::leads)
        .with_clock(fixed_clock())
        .with_id_generator(sequential_ids())
}

fn stores_with(storage: Arc<dyn SlotStorage>) -> Arc<Stores> {
    Arc::new(Stores::with_clock(storage, DemoAccount::default(), fixed_clock()))
}

fn patch(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("patch must be an object, got {other}"),
    }
}

#[test]
fn add_assigns_id_and_creation_stamp_and_get_returns_the_record() {
    let store = lead_store(memory_storage());

    let added = store
        .add(Lead::new("John", "Smith", "john@example.com"))
        .expect("add should succeed");

    assert_eq!(added.id, "id-1");
    assert_eq!(added.date_created, Some(fixed_now()));
    assert_eq!(store.get("id-1").expect("get should succeed"), Some(added.clone()));
    assert_eq!(store.get_all().expect("get_all should succeed"), vec![added]);
}

#[test]
fn absent_slot_reads_as_empty_collection() {
    let store = lead_store(memory_storage());
    assert!(store.get_all().expect("get_all should succeed").is_empty());
    assert_eq!(store.count().expect("count should succeed"), 0);
}

#[test]
fn get_all_returns_an_independent_snapshot() {
    let store = lead_store(memory_storage());
    store
        .add(Lead::new("John", "Smith", "john@example.com"))
        .expect("add should succeed");

    let mut snapshot = store.get_all().expect("get_all should succeed");
    snapshot[0].first_name = "Changed".to_string();

    let stored = store.get("id-1").expect("get should succeed").expect("record exists");
    assert_eq!(stored.first_name, "John");
}

#[test]
fn update_merges_patch_keeps_id_and_stamps_updated_at() {
    let store = lead_store(memory_storage());
    store
        .add(Lead::new("John", "Smith", "john@example.com"))
        .expect("add should succeed");

    let updated = store
        .update(
            "id-1",
            patch(json!({ "id": "hijacked", "status": "Contacted", "phone": "555-0100" })),
        )
        .expect("update should succeed")
        .expect("record exists");

    assert_eq!(updated.id, "id-1");
    assert_eq!(updated.status, LeadStatus::Contacted);
    assert_eq!(updated.phone, "555-0100");
    assert_eq!(updated.first_name, "John");
    assert_eq!(updated.updated_at, Some(fixed_now()));
    assert!(store.get("hijacked").expect("get should succeed").is_none());
}

#[test]
fn update_of_unknown_id_returns_none_and_leaves_storage_untouched() {
    let storage = memory_storage();
    let store = lead_store(storage.clone());
    store
        .add(Lead::new("John", "Smith", "john@example.com"))
        .expect("add should succeed");
    let before = storage.get("leads").expect("slot read should succeed");

    let result = store
        .update("missing", patch(json!({ "firstName": "Nobody" })))
        .expect("update should succeed");

    assert!(result.is_none());
    assert_eq!(storage.get("leads").expect("slot read should succeed"), before);
}

#[test]
fn update_with_wrong_value_type_is_rejected() {
    let store = lead_store(memory_storage());
    store
        .add(Lead::new("John", "Smith", "john@example.com"))
        .expect("add should succeed");

    let result = store.update("id-1", patch(json!({ "status": 42 })));

    assert!(matches!(result, Err(CrmError::InvalidRecord(_))), "got {result:?}");
}

#[test]
fn invalid_records_are_rejected_before_any_write() {
    let storage = memory_storage();
    let store = lead_store(storage.clone());

    let result = store.add(Lead::new("", "Smith", "john@example.com"));

    match result {
        Err(CrmError::Validation(err)) => assert_eq!(err.field, "firstName"),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(storage.get("leads").expect("slot read should succeed").is_none());
}

#[test]
fn delete_shrinks_collection_by_exactly_one_or_zero() {
    let store = lead_store(memory_storage());
    store
        .add_many(vec![
            Lead::new("John", "Smith", "john@example.com"),
            Lead::new("Jane", "Doe", "jane@example.com"),
        ])
        .expect("add_many should succeed");

    assert!(store.delete("id-1").expect("delete should succeed"));
    assert_eq!(store.count().expect("count should succeed"), 1);

    assert!(!store.delete("id-1").expect("delete should succeed"));
    assert_eq!(store.count().expect("count should succeed"), 1);
}

#[test]
fn init_seeds_empty_leads_once() {
    let store = lead_store(memory_storage());

    assert!(store.init().expect("init should succeed"));
    let leads = store.get_all().expect("get_all should succeed");
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].full_name(), "John Smith");
    assert_eq!(leads[0].status, LeadStatus::New);
    assert_eq!(leads[1].full_name(), "Emily Johnson");
    assert_eq!(leads[1].status, LeadStatus::Contacted);
    assert!(leads.iter().all(|lead| !lead.id.is_empty() && lead.date_created.is_some()));

    assert!(!store.init().expect("second init should succeed"));
    assert_eq!(store.count().expect("count should succeed"), 2);
}

#[test]
fn corrupt_slot_surfaces_an_error_and_clear_recovers() {
    let storage = memory_storage();
    storage.set("leads", "{not json").expect("raw write should succeed");
    let store = lead_store(storage.clone());

    let result = store.get_all();
    assert!(
        matches!(&result, Err(CrmError::Corrupt { key, .. }) if key == "leads"),
        "got {result:?}"
    );

    store.clear().expect("clear should succeed");
    assert!(store.get_all().expect("get_all should succeed").is_empty());
}

#[test]
fn sqlite_storage_persists_across_instances() {
    let temp = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp.path().join("nested").join("crm.sqlite");

    {
        let storage: Arc<dyn SlotStorage> =
            Arc::new(SqliteSlotStorage::open(&db_path).expect("sqlite storage should open"));
        lead_store(storage)
            .add(Lead::new("John", "Smith", "john@example.com"))
            .expect("add should succeed");
    }

    let storage: Arc<dyn SlotStorage> =
        Arc::new(SqliteSlotStorage::open(&db_path).expect("sqlite storage should reopen"));
    let leads = lead_store(storage.clone()).get_all().expect("get_all should succeed");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].email, "john@example.com");
    assert_eq!(storage.keys().expect("keys should succeed"), vec!["leads".to_string()]);

    assert!(storage.remove("leads").expect("remove should succeed"));
    assert!(!storage.remove("leads").expect("remove should succeed"));
}

#[test]
fn sqlite_clear_removes_every_slot() {
    let temp = tempfile::tempdir().expect("should create temp dir");
    let storage = SqliteSlotStorage::open(temp.path().join("crm.sqlite")).expect("sqlite storage should open");
    storage.set("a", "1").expect("set should succeed");
    storage.set("a", "2").expect("overwrite should succeed");
    storage.set("b", "3").expect("set should succeed");
    assert_eq!(storage.get("a").expect("get should succeed").as_deref(), Some("2"));

    storage.clear().expect("clear should succeed");
    assert!(storage.keys().expect("keys should succeed").is_empty());
}

#[test]
fn all_time_range_shows_every_record() {
    let stores = stores_with(memory_storage());
    stores.init_all().expect("init_all should succeed");
    let query = QueryService::new(stores.clone());

    let view = query
        .view(EntityKind::Inventory, &ViewQuery::default(), &fixed_now())
        .expect("view should succeed");

    assert_eq!(view.rows.len(), seed::vehicles().len());
    assert_eq!(view.headers, <Vehicle as Tabular>::HEADERS);
}

#[test]
fn date_range_view_excludes_records_outside_the_window() {
    let stores = stores_with(memory_storage());
    let mut old = Deal::new("Old Customer", "Civic", 100.0, DealStatus::Pending);
    old.date_created = Some(fixed_now() - Duration::days(40));
    stores.deals.add(old).expect("add should succeed");
    stores
        .deals
        .add(Deal::new("New Customer", "Accord", 200.0, DealStatus::Pending))
        .expect("add should succeed");

    let query = QueryService::new(stores);
    let view = query
        .view(
            EntityKind::Deals,
            &ViewQuery {
                range: DateRange::ThisMonth,
                ..ViewQuery::default()
            },
            &fixed_now(),
        )
        .expect("view should succeed");

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].cells[0], "New Customer");
}

#[test]
fn search_view_matches_phone_digits_on_leads() {
    let stores = stores_with(memory_storage());
    stores.init_all().expect("init_all should succeed");
    let query = QueryService::new(stores);

    let view = query
        .view(
            EntityKind::Leads,
            &ViewQuery {
                search: "555 987".to_string(),
                criteria: SearchCriteria::Field(SearchField::Phone),
                ..ViewQuery::default()
            },
            &fixed_now(),
        )
        .expect("view should succeed");

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].cells[0], "Emily");
}

#[test]
fn deal_stats_report_totals_and_one_decimal_conversion_rate() {
    let stores = stores_with(memory_storage());
    stores
        .deals
        .add_many(vec![
            Deal::new("Ann", "Civic", 1000.0, DealStatus::ClosedWon),
            Deal::new("Bob", "Accord", 500.0, DealStatus::Pending),
        ])
        .expect("add_many should succeed");
    let query = QueryService::new(stores);

    let stats = query
        .calculate_stats(EntityKind::Deals, &DateRange::AllTime, &fixed_now())
        .expect("stats should succeed");

    let EntityStats::Deals(deals) = stats else {
        panic!("expected deal stats, got {stats:?}");
    };
    assert_eq!(deals.total, 2);
    assert_eq!(deals.total_value, 1500.0);
    assert_eq!(deals.closed, 1);
    assert_eq!(deals.closed_value, 1000.0);
    assert_eq!(deals.conversion_rate.to_string(), "50.0");
}

#[test]
fn empty_collections_have_zero_conversion_rate() {
    let query = QueryService::new(stores_with(memory_storage()));

    let dashboard = query
        .dashboard(&DateRange::AllTime, &fixed_now())
        .expect("dashboard should succeed");

    assert_eq!(dashboard.deals.conversion_rate.value(), 0.0);
    assert_eq!(dashboard.leads.conversion_rate.value(), 0.0);
    assert_eq!(dashboard.tasks.completion_rate.value(), 0.0);
    assert_eq!(dashboard.sales.average_sale, 0.0);
}

#[test]
fn run_report_stamps_last_run_and_returns_stats() {
    let stores = stores_with(memory_storage());
    stores.init_all().expect("init_all should succeed");
    let report_id = stores.reports.get_all().expect("reports load")[1].id.clone();
    let query = QueryService::new(stores.clone());

    let run = query
        .run_report(&report_id, &fixed_now())
        .expect("run should succeed")
        .expect("report exists");

    assert_eq!(run.report.last_run, Some(fixed_now()));
    assert_eq!(run.stats.kind(), EntityKind::Leads);
    assert!(query.run_report("missing", &fixed_now()).expect("run should succeed").is_none());
}

#[test]
fn task_view_orders_open_high_priority_first_and_toggle_persists() {
    let stores = stores_with(memory_storage());
    let due = NaiveDate::from_ymd_opt(2024, 3, 20);
    let mut done = Task::new("Done already", Priority::High, due);
    done.status = TaskStatus::Completed;
    stores
        .tasks
        .add_many(vec![
            Task::new("Low later", Priority::Low, due),
            done,
            Task::new("High soon", Priority::High, due),
        ])
        .expect("add_many should succeed");
    let query = QueryService::new(stores.clone());
    let edit = EditService::new(stores.clone());

    let view = query
        .view(EntityKind::Tasks, &ViewQuery::default(), &fixed_now())
        .expect("view should succeed");
    let titles: Vec<&str> = view.rows.iter().map(|row| row.cells[0].as_str()).collect();
    assert_eq!(titles, vec!["High soon", "Low later", "Done already"]);
    assert_eq!(view.rows[2].completed, Some(true));

    let toggled = edit.toggle_task(&view.rows[0].id).expect("toggle should succeed");
    assert_eq!(toggled.status, TaskStatus::Completed);
    let reloaded = query.ordered_tasks().expect("ordered tasks should load");
    assert_eq!(reloaded[0].title, "Low later");

    let result = edit.toggle_task("missing");
    assert!(matches!(result, Err(CrmError::NotFound { kind: EntityKind::Tasks, .. })));
}

#[test]
fn edit_service_adds_updates_and_deletes_by_kind() {
    let stores = stores_with(memory_storage());
    let edit = EditService::new(stores.clone());

    let added = edit
        .add(CrmRecord::from(Vehicle::new(2022, "Honda", "Civic", 21_000.0)))
        .expect("add should succeed");
    assert_eq!(added.kind(), EntityKind::Inventory);

    let updated = edit
        .update(EntityKind::Inventory, added.id(), patch(json!({ "status": "Sold" })))
        .expect("update should succeed");
    assert_eq!(updated.cells()[8], "Sold");

    assert!(matches!(
        edit.update(EntityKind::Inventory, "missing", Map::new()),
        Err(CrmError::NotFound { .. })
    ));

    assert!(edit.delete(EntityKind::Inventory, added.id()).expect("delete should succeed"));
    assert!(!edit.delete(EntityKind::Inventory, added.id()).expect("delete should succeed"));
    assert_eq!(stores.count(EntityKind::Inventory).expect("count should succeed"), 0);
}

#[test]
fn clear_all_data_wipes_collections_settings_and_session() {
    let storage = memory_storage();
    let stores = stores_with(storage.clone());
    stores.init_all().expect("init_all should succeed");
    stores.settings.toggle_theme().expect("toggle should succeed");
    stores.auth.login("admin", "admin123").expect("login should succeed");
    let edit = EditService::new(stores.clone());

    edit.clear_all_data().expect("clear should succeed");

    assert!(storage.keys().expect("keys should succeed").is_empty());
    assert!(stores.records(EntityKind::Leads).expect("records should load").is_empty());

    let seeded = edit.reset_demo_data().expect("reset should succeed");
    assert_eq!(seeded, EntityKind::ALL.to_vec());
}

#[test]
fn csv_export_round_trips_commas_quotes_and_padding() {
    let stores = stores_with(memory_storage());
    let mut lead = Lead::new("John", "Smith", "john@example.com");
    lead.notes = "  Great, will follow up ".to_string();
    lead.interest = "SUV \"7 seats\"".to_string();
    lead.vehicle_interest.budget = Some(32_000.0);
    let stored = stores.leads.add(lead).expect("add should succeed");

    let exported = ExportService::new(stores.clone())
        .export::<Lead, Utc>(DataFormat::Csv, &DateRange::AllTime, &fixed_now())
        .expect("export should succeed");

    let mut session = ImportSession::<Lead>::from_text(DataFormat::Csv, exported);
    let parsed = session.parse().expect("parse should succeed").to_vec();
    assert!(session.rejected().is_empty(), "rejected: {:?}", session.rejected());
    assert_eq!(parsed.len(), 1);

    let mut expected = stored;
    expected.id = String::new();
    assert_eq!(parsed[0], expected);
}

#[test]
fn json_export_filters_by_creation_range() {
    let stores = stores_with(memory_storage());
    let mut old = Lead::new("Old", "Lead", "old@example.com");
    old.date_created = Some(fixed_now() - Duration::days(3));
    stores.leads.add(old).expect("add should succeed");
    stores
        .leads
        .add(Lead::new("Fresh", "Lead", "fresh@example.com"))
        .expect("add should succeed");

    let exported = ExportService::new(stores)
        .export_kind(EntityKind::Leads, DataFormat::Json, &DateRange::Today, &fixed_now())
        .expect("export should succeed");

    let leads: Vec<Lead> = serde_json::from_str(&exported).expect("export should be a JSON array");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].first_name, "Fresh");
}

#[test]
fn lead_import_skips_duplicate_emails_when_enabled() {
    let text = "firstName,lastName,email\n\
                John,Smith,JOHN@example.com\n\
                Jane,Doe,jane@example.com\n\
                Janet,Doe,Jane@Example.com\n\
                Nobody,,\n";

    let stores = stores_with(memory_storage());
    stores
        .leads
        .add(Lead::new("John", "Smith", "john@example.com"))
        .expect("add should succeed");
    let import = ImportService::new(stores.clone());

    let summary = import
        .commit(ImportSession::<Lead>::from_text(DataFormat::Csv, text).with_duplicate_check(true))
        .expect("commit should succeed");
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.duplicates, 2);
    assert_eq!(summary.rejected, 0);
    assert_eq!(stores.leads.count().expect("count should succeed"), 3);

    let summary = import
        .commit(ImportSession::<Lead>::from_text(DataFormat::Csv, text))
        .expect("commit should succeed");
    assert_eq!(summary.imported, 4);
    assert_eq!(summary.duplicates, 0);
}

#[test]
fn import_collects_rejected_rows_with_reasons() {
    let text = r#"[
        {"firstName": "Ann", "email": "ann@example.com"},
        {"firstName": "", "email": "blank@example.com"},
        {"firstName": "Bob", "email": "bob"},
        5
    ]"#;
    let mut session = ImportSession::<Lead>::from_text(DataFormat::Json, text);
    assert!(!session.is_parsed());

    let accepted = session.parse().expect("parse should succeed").len();

    assert_eq!(accepted, 1);
    assert!(session.is_parsed());
    let rows: Vec<usize> = session.rejected().iter().map(|rejected| rejected.row).collect();
    assert_eq!(rows, vec![2, 3, 4]);
    assert!(session.rejected()[0].reason.contains("firstName"));
    assert_eq!(session.preview(10).len(), 1);
    assert_eq!(session.preview(0).len(), 0);
}

#[test]
fn import_rejects_malformed_input_as_a_whole() {
    let mut session = ImportSession::<Lead>::from_text(DataFormat::Json, "{\"not\": \"an array\"}");
    assert!(matches!(session.parse(), Err(CrmError::Import(_))));
}

#[test]
fn import_path_detects_format_from_extension() {
    let temp = tempfile::tempdir().expect("should create temp dir");
    let csv_path = temp.path().join("leads.CSV");
    std::fs::write(&csv_path, "firstName,email,status\nAnn,ann@example.com,Qualified\nBob,bob@example.com,Bogus\n")
        .expect("should write csv");
    let txt_path = temp.path().join("leads.txt");
    std::fs::write(&txt_path, "whatever").expect("should write txt");

    let stores = stores_with(memory_storage());
    let import = ImportService::new(stores.clone());

    let summary = import
        .import_path(EntityKind::Leads, &csv_path, false)
        .expect("import should succeed");
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.rejected, 1);
    let leads = stores.leads.get_all().expect("leads should load");
    assert_eq!(leads[0].status, LeadStatus::Qualified);

    assert!(matches!(
        import.import_path(EntityKind::Leads, &txt_path, false),
        Err(CrmError::Import(_))
    ));
}

#[test]
fn settings_default_update_theme_and_reset() {
    let storage = memory_storage();
    let stores = stores_with(storage.clone());
    let settings = &stores.settings;

    let defaults = settings.load().expect("load should succeed");
    assert_eq!(defaults.dealership_name, "AutoCRM Motors");
    assert_eq!(defaults.theme, Theme::Light);
    assert!(storage.get(SETTINGS_KEY).expect("slot read").is_none());

    assert_eq!(settings.toggle_theme().expect("toggle should succeed"), Theme::Dark);
    assert_eq!(settings.load().expect("load should succeed").theme, Theme::Dark);

    let updated = settings
        .update(patch(json!({ "itemsPerPage": 50, "dealershipName": "Main Street Autos" })))
        .expect("update should succeed");
    assert_eq!(updated.items_per_page, 50);
    assert_eq!(updated.theme, Theme::Dark);
    assert_eq!(updated.updated_at, Some(fixed_now()));

    assert!(matches!(
        settings.update(patch(json!({ "itemsPerPage": 0 }))),
        Err(CrmError::Validation(_))
    ));

    settings.reset().expect("reset should succeed");
    assert_eq!(settings.load().expect("load should succeed").theme, Theme::Light);
}

#[test]
fn demo_login_stores_session_until_logout() {
    let storage = memory_storage();
    let stores = stores_with(storage.clone());
    let auth = &stores.auth;

    assert!(matches!(auth.login("admin", "wrong"), Err(CrmError::InvalidCredentials)));
    assert!(!auth.is_signed_in().expect("session read should succeed"));

    let session = auth.login(" ADMIN ", "admin123").expect("login should succeed");
    assert_eq!(session.username, "admin");
    assert_eq!(session.display_name, "Demo Manager");
    assert_eq!(session.logged_in_at, fixed_now());
    assert!(storage.get(SESSION_KEY).expect("slot read").is_some());
    assert_eq!(auth.current().expect("session read should succeed"), Some(session));

    assert!(auth.logout().expect("logout should succeed"));
    assert!(!auth.logout().expect("logout should succeed"));
    assert!(auth.current().expect("session read should succeed").is_none());
}

#[test]
fn init_all_reports_only_kinds_that_were_empty() {
    let stores = stores_with(memory_storage());
    stores
        .leads
        .add(Lead::new("Only", "Lead", "only@example.com"))
        .expect("add should succeed");

    let seeded = stores.init_all().expect("init_all should succeed");

    assert!(!seeded.contains(&EntityKind::Leads));
    assert_eq!(seeded.len(), EntityKind::ALL.len() - 1);
    assert_eq!(stores.count(EntityKind::Leads).expect("count should succeed"), 1);
    assert!(stores.records(EntityKind::Tasks).expect("records should load").iter().all(|r| r.kind() == EntityKind::Tasks));
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (any::<bool>(), 0u8..3, proptest::option::of(1u32..=28)).prop_map(|(completed, rank, day)| {
        let priority = match rank {
            0 => Priority::High,
            1 => Priority::Medium,
            _ => Priority::Low,
        };
        let mut task = Task::new("task", priority, day.and_then(|d| NaiveDate::from_ymd_opt(2024, 2, d)));
        if completed {
            task.status = TaskStatus::Completed;
        }
        task
    })
}

proptest! {
    #[test]
    fn sorted_tasks_respect_completion_priority_then_due_date(
        mut tasks in proptest::collection::vec(task_strategy(), 0..40)
    ) {
        sort_tasks(&mut tasks);
        for pair in tasks.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.is_completed() <= b.is_completed());
            if a.is_completed() == b.is_completed() {
                prop_assert!(a.priority.rank() <= b.priority.rank());
                if a.priority == b.priority {
                    match (a.due_date, b.due_date) {
                        (Some(x), Some(y)) => prop_assert!(x <= y),
                        (None, Some(_)) => prop_assert!(false, "undated task sorted before a dated one"),
                        _ => {}
                    }
                }
            }
        }
    }
}
