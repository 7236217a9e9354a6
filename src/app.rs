use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::error;

use autocrm::config::AppConfig;
use autocrm::domain::entities::kind::EntityKind;
use autocrm::domain::entities::session::Session;
use autocrm::domain::entities::settings::{Settings, Theme};
use autocrm::domain::query::date_range::DateRange;
use autocrm::domain::query::search::SearchCriteria;
use autocrm::domain::query::sort::InventorySort;
use autocrm::infra::sqlite::storage::SqliteSlotStorage;
use autocrm::usecase::ports::storage::SlotStorage;
use autocrm::usecase::services::edit_service::EditService;
use autocrm::usecase::services::export_service::{export_file_name, ExportService};
use autocrm::usecase::services::import_service::{DataFormat, ImportService};
use autocrm::usecase::services::query_service::QueryService;
use autocrm::usecase::store::registry::Stores;

use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;

const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 4px 6px;";
const SEARCH_CRITERIA_LABELS: [&str; 16] = [
    "All Fields",
    "Name",
    "Email",
    "Phone",
    "Source",
    "Status",
    "Assigned To",
    "Make",
    "Model",
    "Year",
    "VIN",
    "Customer",
    "Vehicle",
    "Salesperson",
    "Title",
    "Related To",
];

pub struct AppServices {
    pub config: AppConfig,
    pub stores: Arc<Stores>,
    pub query: QueryService,
    pub edit: EditService,
    pub import: ImportService,
    pub export: ExportService,
}

impl AppServices {
    fn open(config: AppConfig) -> anyhow::Result<Self> {
        let db_path = config.db_path()?;
        let storage: Arc<dyn SlotStorage> = Arc::new(
            SqliteSlotStorage::open(&db_path)
                .with_context(|| format!("failed to open store: {}", db_path.display()))?,
        );
        let stores = Arc::new(Stores::new(storage, config.demo_account.clone()));
        Ok(Self {
            query: QueryService::new(stores.clone()),
            edit: EditService::new(stores.clone()),
            import: ImportService::new(stores.clone()),
            export: ExportService::new(stores.clone()),
            stores,
            config,
        })
    }
}

#[derive(Clone)]
pub struct Services(Arc<AppServices>);

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn theme_style(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "background: #ffffff; color: #222222; min-height: 100vh; font-family: sans-serif;",
        Theme::Dark => "background: #1e1f22; color: #e6e6e6; min-height: 100vh; font-family: sans-serif;",
    }
}

fn tab_style(active: bool) -> &'static str {
    if active {
        "margin-right: 4px; padding: 6px 12px; font-weight: bold; border-bottom: 3px solid #3b82f6;"
    } else {
        "margin-right: 4px; padding: 6px 12px;"
    }
}

#[component]
pub fn App() -> Element {
    let services = use_hook(|| {
        AppConfig::load()
            .and_then(AppServices::open)
            .map(|services| Services(Arc::new(services)))
            .map_err(|err| format!("{err:#}"))
    });

    match services {
        Ok(services) => rsx! { Workspace { services } },
        Err(err) => rsx! {
            div {
                p { "Unable to open the CRM store: {err}" }
            }
        },
    }
}

#[component]
fn Workspace(services: Services) -> Element {
    let state = AppState::new();
    let AppState {
        mut session,
        mut settings,
        mut active_kind,
        mut search,
        mut criteria,
        mut range,
        mut inventory_sort,
        mut view,
        mut stats,
        mut page,
        refresh,
        mut show_settings,
        mut busy,
        mut status,
    } = state;

    let services_for_init = services.clone();
    use_effect(move || {
        let services = &services_for_init.0;
        *busy.write() = true;
        match run_blocking(|| services.stores.auth.current()) {
            Ok(current) => session.set(current),
            Err(err) => *status.write() = format!("Failed to read session: {err}"),
        }
        match run_blocking(|| services.stores.settings.load()) {
            Ok(loaded) => {
                range.set(loaded.default_date_range);
                settings.set(loaded);
            }
            Err(err) => *status.write() = format!("Failed to load settings: {err}"),
        }
        if services.config.seed_on_start {
            match run_blocking(|| services.stores.init_all()) {
                Ok(seeded) if !seeded.is_empty() => {
                    *status.write() = format!("Seeded {} collections with example data", seeded.len());
                }
                Ok(_) => {}
                Err(err) => {
                    error!(error = %err, "failed to seed collections");
                    *status.write() = format!("Failed to load data: {err}. Use \"Clear All Data\" to recover.");
                }
            }
        }
        *busy.write() = false;
        state.reload();
    });

    let services_for_view = services.clone();
    use_effect(move || {
        let _tick = refresh();
        let kind = active_kind();
        let query = state.view_query();
        let now = Local::now();
        let services = &services_for_view.0;
        let result = run_blocking(|| {
            let table = services.query.view(kind, &query, &now)?;
            let kind_stats = services.query.calculate_stats(kind, &query.range, &now)?;
            Ok::<_, autocrm::CrmError>((table, kind_stats))
        });
        match result {
            Ok((table, kind_stats)) => {
                view.set(Some(table));
                stats.set(Some(kind_stats));
            }
            Err(err) => {
                view.set(None);
                stats.set(None);
                *status.write() = format!("Failed to load {}: {err}", kind.label());
            }
        }
    });

    if session().is_none() {
        return rsx! {
            div { style: "{theme_style(settings().theme)}",
                LoginPanel { services: services.clone(), session, status }
            }
        };
    }

    let current_settings = settings();
    let current_kind = active_kind();
    let display_name = session().map(|s| s.display_name).unwrap_or_default();
    let per_page = current_settings.items_per_page.max(1) as usize;
    let loaded = view();
    let total_rows = loaded.as_ref().map(|t| t.rows.len()).unwrap_or(0);
    let page_count = total_rows.div_ceil(per_page).max(1);
    let current_page = page().min(page_count - 1);
    let stats_summary = stats().map(|s| s.summary()).unwrap_or_default();
    let is_tasks = current_kind == EntityKind::Tasks;

    let services_for_logout = services.clone();
    let services_for_import = services.clone();
    let services_for_export = services.clone();
    let services_for_clear = services.clone();
    let services_for_reset = services.clone();
    let services_for_settings = services.clone();
    let services_for_rows = services.clone();

    rsx! {
        div { style: "{theme_style(current_settings.theme)}",
            div { style: "display: flex; align-items: center; justify-content: space-between; padding: 8px 12px;",
                h2 { style: "margin: 0;", "{current_settings.dealership_name}" }
                div {
                    span { style: "margin-right: 12px;", "Signed in as {display_name}" }
                    button {
                        onclick: move |_| show_settings.set(!show_settings()),
                        "Settings"
                    }
                    button {
                        style: "margin-left: 4px;",
                        onclick: move |_| {
                            match run_blocking(|| services_for_logout.0.stores.auth.logout()) {
                                Ok(_) => {
                                    session.set(None);
                                    *status.write() = "Signed out".to_string();
                                }
                                Err(err) => *status.write() = format!("Sign-out failed: {err}"),
                            }
                        },
                        "Sign Out"
                    }
                }
            }

            if show_settings() {
                SettingsPanel {
                    services: services_for_settings.clone(),
                    settings,
                    status,
                }
            }

            div { style: "padding: 0 12px;",
                {EntityKind::ALL.iter().map(|kind| {
                    let kind = *kind;
                    rsx!(
                        button {
                            key: "{kind}",
                            style: "{tab_style(kind == current_kind)}",
                            onclick: move |_| {
                                active_kind.set(kind);
                                search.set(String::new());
                                page.set(0);
                            },
                            "{kind.label()}"
                        }
                    )
                })}
            }

            div { style: "display: flex; flex-wrap: wrap; gap: 8px; padding: 8px 12px;",
                input {
                    placeholder: "Search",
                    value: "{search}",
                    oninput: move |event| {
                        search.set(event.value());
                        page.set(0);
                    }
                }
                select {
                    value: "{criteria}",
                    onchange: move |event| {
                        match event.value().parse::<SearchCriteria>() {
                            Ok(next) => criteria.set(next),
                            Err(err) => *status.write() = err.to_string(),
                        }
                    },
                    {SEARCH_CRITERIA_LABELS.iter().map(|label| rsx!(
                        option { key: "{label}", value: "{label}", "{label}" }
                    ))}
                }
                select {
                    value: "{range().label()}",
                    onchange: move |event| {
                        match event.value().parse::<DateRange>() {
                            Ok(next) => {
                                range.set(next);
                                page.set(0);
                            }
                            Err(err) => *status.write() = err.to_string(),
                        }
                    },
                    {DateRange::PRESETS.iter().map(|preset| {
                        let label = preset.label();
                        rsx!(option { key: "{label}", value: "{label}", "{label}" })
                    })}
                }
                if current_kind == EntityKind::Inventory {
                    select {
                        value: "{inventory_sort().label()}",
                        onchange: move |event| {
                            let value = event.value();
                            if let Some(next) = InventorySort::ALL.into_iter().find(|order| order.label() == value) {
                                inventory_sort.set(next);
                            }
                        },
                        {InventorySort::ALL.iter().map(|order| {
                            let label = order.label();
                            rsx!(option { key: "{label}", value: "{label}", "{label}" })
                        })}
                    }
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let Some(file_path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .add_filter("JSON", &["json"])
                            .pick_file()
                        else {
                            return;
                        };
                        let kind = active_kind();
                        let check_duplicates = settings().check_duplicate_leads;
                        *busy.write() = true;
                        *status.write() = format!("Importing {}", file_path.display());
                        let result = run_blocking(|| {
                            services_for_import.0.import.import_path(kind, &file_path, check_duplicates)
                        });
                        match result {
                            Ok(summary) => {
                                *status.write() = format!(
                                    "Imported {} {}, skipped {} duplicates, rejected {} rows",
                                    summary.imported,
                                    kind.slot_key(),
                                    summary.duplicates,
                                    summary.rejected
                                );
                            }
                            Err(err) => *status.write() = format!("Import failed: {err}"),
                        }
                        *busy.write() = false;
                        state.reload();
                    },
                    "Import"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let kind = active_kind();
                        let now = Local::now();
                        let Some(file_path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .add_filter("JSON", &["json"])
                            .set_file_name(export_file_name(kind, DataFormat::Csv, now.date_naive()))
                            .save_file()
                        else {
                            return;
                        };
                        let selected_range = range();
                        let result = run_blocking(|| {
                            services_for_export.0.export.export_to_path(kind, &file_path, &selected_range, &now)
                        });
                        match result {
                            Ok(()) => *status.write() = format!("Exported to {}", file_path.display()),
                            Err(err) => *status.write() = format!("Export failed: {err}"),
                        }
                    },
                    "Export"
                }
            }

            div { style: "display: flex; flex-wrap: wrap; gap: 16px; padding: 4px 12px;",
                {stats_summary.iter().map(|(label, value)| rsx!(
                    div { key: "{label}", style: "border: 1px solid #bbb; border-radius: 4px; padding: 6px 10px;",
                        div { style: "font-size: 12px; opacity: 0.7;", "{label}" }
                        div { style: "font-size: 18px;", "{value}" }
                    }
                ))}
            }

            div { style: "padding: 8px 12px; overflow: auto;",
                if let Some(loaded) = loaded {
                    table { style: "border-collapse: collapse; width: 100%;",
                        thead {
                            tr {
                                if is_tasks {
                                    th { style: "{CELL_STYLE}", "Done" }
                                }
                                {loaded.headers.iter().map(|header| rsx!(
                                    th { key: "{header}", style: "{CELL_STYLE} text-align: left;", "{header}" }
                                ))}
                                th { style: "{CELL_STYLE}", "" }
                            }
                        }
                        tbody {
                            {loaded.rows.iter().skip(current_page * per_page).take(per_page).map(|row| {
                                let row_id = row.id.clone();
                                let toggle_id = row.id.clone();
                                let completed = row.completed;
                                let services_for_toggle = services_for_rows.clone();
                                let services_for_delete = services_for_rows.clone();
                                rsx!(
                                    tr { key: "{row_id}",
                                        if let Some(done) = completed {
                                            td { style: "{CELL_STYLE} text-align: center;",
                                                input {
                                                    r#type: "checkbox",
                                                    checked: done,
                                                    onclick: move |_| {
                                                        let result = run_blocking(|| services_for_toggle.0.edit.toggle_task(&toggle_id));
                                                        if let Err(err) = result {
                                                            *status.write() = format!("Failed to update task: {err}");
                                                        }
                                                        state.reload();
                                                    }
                                                }
                                            }
                                        }
                                        {row.cells.iter().enumerate().map(|(idx, value)| rsx!(
                                            td { key: "{idx}", style: "{CELL_STYLE}", "{value}" }
                                        ))}
                                        td { style: "{CELL_STYLE}",
                                            button {
                                                disabled: busy(),
                                                onclick: move |_| {
                                                    let confirm = MessageDialog::new()
                                                        .set_level(MessageLevel::Warning)
                                                        .set_title("Delete record")
                                                        .set_description("Delete this record? This cannot be undone.")
                                                        .set_buttons(MessageButtons::YesNo)
                                                        .show();
                                                    if confirm != MessageDialogResult::Yes {
                                                        return;
                                                    }
                                                    let kind = active_kind();
                                                    match run_blocking(|| services_for_delete.0.edit.delete(kind, &row_id)) {
                                                        Ok(true) => *status.write() = "Record deleted".to_string(),
                                                        Ok(false) => *status.write() = "Record was already gone".to_string(),
                                                        Err(err) => *status.write() = format!("Delete failed: {err}"),
                                                    }
                                                    state.reload();
                                                },
                                                "Delete"
                                            }
                                        }
                                    }
                                )
                            })}
                        }
                    }
                    div { style: "margin-top: 8px;",
                        button {
                            disabled: current_page == 0,
                            onclick: move |_| page.set(current_page.saturating_sub(1)),
                            "Previous"
                        }
                        span { style: "margin: 0 8px;", "Page {current_page + 1} of {page_count} ({total_rows} records)" }
                        button {
                            disabled: current_page + 1 >= page_count,
                            onclick: move |_| page.set(current_page + 1),
                            "Next"
                        }
                    }
                } else {
                    p { "No data loaded." }
                }
            }

            div { style: "display: flex; gap: 8px; padding: 8px 12px;",
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let confirm = MessageDialog::new()
                            .set_level(MessageLevel::Warning)
                            .set_title("Reset demo data")
                            .set_description("Replace all records with the example data set?")
                            .set_buttons(MessageButtons::YesNo)
                            .show();
                        if confirm != MessageDialogResult::Yes {
                            return;
                        }
                        match run_blocking(|| services_for_reset.0.edit.reset_demo_data()) {
                            Ok(_) => {
                                session.set(None);
                                settings.set(Settings::default());
                                *status.write() = "Demo data restored".to_string();
                            }
                            Err(err) => *status.write() = format!("Reset failed: {err}"),
                        }
                        state.reload();
                    },
                    "Reset Demo Data"
                }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let confirm = MessageDialog::new()
                            .set_level(MessageLevel::Warning)
                            .set_title("Clear all data")
                            .set_description("Delete every record, the settings and the session?")
                            .set_buttons(MessageButtons::YesNo)
                            .show();
                        if confirm != MessageDialogResult::Yes {
                            return;
                        }
                        match run_blocking(|| services_for_clear.0.edit.clear_all_data()) {
                            Ok(()) => {
                                session.set(None);
                                settings.set(Settings::default());
                                *status.write() = "All data cleared".to_string();
                            }
                            Err(err) => *status.write() = format!("Clear failed: {err}"),
                        }
                        state.reload();
                    },
                    "Clear All Data"
                }
            }

            div { style: "padding: 6px 12px; font-size: 12px; opacity: 0.8;", "{status}" }
        }
    }
}

#[component]
fn LoginPanel(
    services: Services,
    mut session: Signal<Option<Session>>,
    mut status: Signal<String>,
) -> Element {
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);

    rsx! {
        div { style: "max-width: 320px; margin: 80px auto; display: flex; flex-direction: column; gap: 8px;",
            h2 { "Sign in" }
            input {
                placeholder: "Username",
                value: "{username}",
                oninput: move |event| username.set(event.value())
            }
            input {
                r#type: "password",
                placeholder: "Password",
                value: "{password}",
                oninput: move |event| password.set(event.value())
            }
            button {
                onclick: move |_| {
                    match run_blocking(|| services.0.stores.auth.login(&username(), &password())) {
                        Ok(signed_in) => {
                            *status.write() = format!("Welcome, {}", signed_in.display_name);
                            password.set(String::new());
                            session.set(Some(signed_in));
                        }
                        Err(err) => *status.write() = err.to_string(),
                    }
                },
                "Sign In"
            }
            p { style: "font-size: 12px; opacity: 0.8;", "{status}" }
        }
    }
}

#[component]
fn SettingsPanel(services: Services, mut settings: Signal<Settings>, mut status: Signal<String>) -> Element {
    let current = settings();
    let mut name_input = use_signal(|| current.dealership_name.clone());
    let mut currency_input = use_signal(|| current.currency.clone());
    let mut per_page_input = use_signal(|| current.items_per_page.to_string());
    let services_for_theme = services.clone();
    let services_for_save = services.clone();

    rsx! {
        div { style: "margin: 0 12px 8px; padding: 8px; border: 1px solid #bbb; border-radius: 4px;",
            div { style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center;",
                label { "Dealership" }
                input { value: "{name_input}", oninput: move |event| name_input.set(event.value()) }
                label { "Currency" }
                input { value: "{currency_input}", oninput: move |event| currency_input.set(event.value()) }
                label { "Rows per page" }
                input { value: "{per_page_input}", oninput: move |event| per_page_input.set(event.value()) }
                label {
                    input {
                        r#type: "checkbox",
                        checked: current.check_duplicate_leads,
                        onclick: move |_| {
                            let mut next = settings();
                            next.check_duplicate_leads = !next.check_duplicate_leads;
                            settings.set(next);
                        }
                    }
                    "Skip duplicate leads on import"
                }
            }
            div { style: "margin-top: 8px;",
                button {
                    onclick: move |_| {
                        match run_blocking(|| services_for_theme.0.stores.settings.toggle_theme()) {
                            Ok(theme) => {
                                let mut next = settings();
                                next.theme = theme;
                                settings.set(next);
                            }
                            Err(err) => *status.write() = format!("Theme change failed: {err}"),
                        }
                    },
                    if current.theme == Theme::Light { "Dark Mode" } else { "Light Mode" }
                }
                button {
                    style: "margin-left: 4px;",
                    onclick: move |_| {
                        let Ok(items_per_page) = per_page_input().trim().parse::<u32>() else {
                            *status.write() = "Rows per page must be a number".to_string();
                            return;
                        };
                        let next = Settings {
                            dealership_name: name_input(),
                            currency: currency_input().trim().to_uppercase(),
                            items_per_page,
                            ..settings()
                        };
                        match run_blocking(|| services_for_save.0.stores.settings.save(&next)) {
                            Ok(()) => {
                                settings.set(next);
                                *status.write() = "Settings saved".to_string();
                            }
                            Err(err) => *status.write() = format!("Settings not saved: {err}"),
                        }
                    },
                    "Save Settings"
                }
            }
        }
    }
}
