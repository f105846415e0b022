mod app;
mod events;
mod loop_run;
mod terminal;
mod ui;

pub use app::TuiApp;
pub use loop_run::run_tui;
pub use terminal::check_tui_support;
