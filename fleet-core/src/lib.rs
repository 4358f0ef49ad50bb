pub mod error;

pub mod config;

pub mod i18n;
pub use i18n::{Language, Translator};

pub mod engine {
    pub mod filter;
    pub use filter::{FilterCriteria, SearchField, filter_servers};

    pub mod sort;
    pub use sort::{SortColumn, SortDirection, SortState, sort_servers};

    pub mod highlight;
}

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod bulk;

    pub mod search;

    pub mod server_list;

    pub mod server_detail;

    pub mod action_dispatcher;

    pub mod key_map;

    pub mod event_loop;
    pub use event_loop::EventLoop;
}

pub mod model {
    pub mod server;
    pub use server::{Location, Server, ServerId, ServerPatch, ServerStatus};

    pub mod store;

    pub mod selection;

    pub mod form;

    pub mod cpu_chart;

    pub mod app_state;

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, RedrawFlag, UIMode, UIOverlay, UIState};
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod confirm_dialog;
        pub mod detail_view;
        pub mod filter_bar;
        pub mod help_overlay;
        pub mod notification_overlay;
        pub mod server_form;
        pub mod server_table;
        pub mod status_bar;
    }
}

pub mod logging;
pub use logging::Logger;

pub mod util {
    pub mod debounce;
    pub mod humanize;
}

pub use error::AppError;

pub use model::{app_state::AppState, store::ServerStore, ui_state::UIState};
