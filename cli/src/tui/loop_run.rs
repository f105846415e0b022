use std::time::Duration;

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use securetask_core::api as core_api;
use securetask_core::controller::{FetchTicket, TaskListController};
use tokio::sync::mpsc;

use super::app::{Action, Mode, TuiApp};
use super::events::InputReader;
use super::terminal::{restore_terminal, setup_terminal};
use super::ui;

type FetchOutcome = (FetchTicket, Result<Vec<core_api::Task>, core_api::RemoteError>);

pub async fn run_tui(
    ctrl: TaskListController,
    cfg: &core_api::TuiConfig,
) -> Result<i32, core_api::CliError> {
    let mut app = TuiApp::new(ctrl);
    let mut terminal = setup_terminal().map_err(core_api::CliError::Command)?;
    let result = run_on_terminal(&mut terminal, &mut app, cfg).await;
    restore_terminal(&mut terminal);
    result
}

async fn run_on_terminal(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut TuiApp,
    cfg: &core_api::TuiConfig,
) -> Result<i32, core_api::CliError> {
    tracing::debug!(target: "securetask.tui", "event loop starting");
    let (input_reader, mut input_rx) = InputReader::start();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut tick = tokio::time::interval(Duration::from_millis(cfg.update_interval_ms.max(16)));

    // Initial load with the filters the controller was constructed with.
    spawn_fetch(&mut app.ctrl, &fetch_tx);

    let mut exit_requested = false;

    terminal
        .draw(|f| ui::draw(f, app))
        .map_err(|e| core_api::CliError::Command(e.to_string()))?;

    loop {
        tokio::select! {
            Some((ticket, result)) = fetch_rx.recv() => {
                app.ctrl.apply_fetch(ticket, result);
                app.clamp_selection();
            }
            Some(key) = input_rx.recv() => {
                match app.handle_key(key) {
                    Action::None => {}
                    Action::Quit => exit_requested = true,
                    // Filter changed: issue a tagged fetch and keep typing;
                    // stale responses are discarded by the controller.
                    Action::Fetch => spawn_fetch(&mut app.ctrl, &fetch_tx),
                    Action::Submit => {
                        app.ctrl.submit().await;
                        if !app.ctrl.editor_open() {
                            app.mode = Mode::Normal;
                        }
                        app.clamp_selection();
                    }
                    Action::Delete(id) => {
                        app.ctrl.remove(&id).await;
                        app.clamp_selection();
                    }
                    Action::Toggle(task) => {
                        app.ctrl.toggle_status(&task).await;
                        app.clamp_selection();
                    }
                }
            }
            _ = tick.tick() => {}
        }

        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| core_api::CliError::Command(e.to_string()))?;

        if exit_requested {
            break;
        }
    }

    input_reader.stop();
    Ok(0)
}

fn spawn_fetch(ctrl: &mut TaskListController, tx: &mpsc::UnboundedSender<FetchOutcome>) {
    let ticket = ctrl.begin_fetch();
    let gateway = ctrl.gateway();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = gateway.list(&ticket.filters).await;
        // Receiver gone means the loop already exited.
        let _ = tx.send((ticket, result));
    });
}
