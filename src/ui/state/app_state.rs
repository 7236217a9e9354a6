use dioxus::prelude::{use_signal, Signal};

use autocrm::domain::entities::kind::EntityKind;
use autocrm::domain::entities::session::Session;
use autocrm::domain::entities::settings::Settings;
use autocrm::domain::query::date_range::DateRange;
use autocrm::domain::query::search::SearchCriteria;
use autocrm::domain::query::sort::InventorySort;
use autocrm::domain::query::stats::EntityStats;
use autocrm::usecase::services::query_service::{TableView, ViewQuery};

#[derive(Clone, Copy)]
pub struct AppState {
    pub session: Signal<Option<Session>>,
    pub settings: Signal<Settings>,
    pub active_kind: Signal<EntityKind>,
    pub search: Signal<String>,
    pub criteria: Signal<SearchCriteria>,
    pub range: Signal<DateRange>,
    pub inventory_sort: Signal<InventorySort>,
    pub view: Signal<Option<TableView>>,
    pub stats: Signal<Option<EntityStats>>,
    pub page: Signal<usize>,
    /// Bumped after every mutation to reload the whole view.
    pub refresh: Signal<u64>,
    pub show_settings: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: use_signal(|| None::<Session>),
            settings: use_signal(Settings::default),
            active_kind: use_signal(|| EntityKind::Inventory),
            search: use_signal(String::new),
            criteria: use_signal(SearchCriteria::default),
            range: use_signal(DateRange::default),
            inventory_sort: use_signal(InventorySort::default),
            view: use_signal(|| None::<TableView>),
            stats: use_signal(|| None::<EntityStats>),
            page: use_signal(|| 0_usize),
            refresh: use_signal(|| 0_u64),
            show_settings: use_signal(|| false),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }

    pub fn view_query(&self) -> ViewQuery {
        ViewQuery {
            search: (self.search)(),
            criteria: (self.criteria)(),
            range: (self.range)(),
            inventory_sort: (self.inventory_sort)(),
        }
    }

    pub fn reload(&self) {
        let mut refresh = self.refresh;
        *refresh.write() += 1;
    }

    pub fn set_status(&self, message: impl Into<String>) {
        let mut status = self.status;
        status.set(message.into());
    }
}
