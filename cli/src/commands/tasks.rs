//! One-shot task subcommands for scripting. They drive the same controller
//! as the TUI so the refresh/message semantics stay in one place.

use std::io::Write;

use securetask_core::api as core_api;
use securetask_core::api::TaskGateway as _;
use securetask_core::controller::TaskListController;

use crate::app::AppServices;
use crate::commands::cli::{AddArgs, DeleteArgs, EditArgs, FilterArgs, IdArgs};

fn controller(services: &AppServices) -> TaskListController {
    TaskListController::new(services.tasks.clone())
}

fn print_tasks(tasks: &[core_api::Task]) {
    if tasks.is_empty() {
        println!("No tasks found. Create your first task!");
        return;
    }
    for task in tasks {
        let mark = match task.status {
            core_api::TaskStatus::Completed => "[x]",
            core_api::TaskStatus::Pending => "[ ]",
        };
        if task.description.is_empty() {
            println!("{mark} {}  ({})", task.title, task.id);
        } else {
            println!("{mark} {}  ({})\n      {}", task.title, task.id, task.description);
        }
    }
}

/// Exit code from the controller's message state after an operation.
fn finish(ctrl: &TaskListController) -> i32 {
    if let Some(error) = &ctrl.error {
        eprintln!("{error}");
        return 20;
    }
    if let Some(message) = &ctrl.success_message {
        println!("{message}");
    }
    0
}

pub async fn list(services: &AppServices, args: &FilterArgs) -> Result<i32, core_api::CliError> {
    let mut ctrl = controller(services);
    ctrl.filters = args.to_filters();
    ctrl.refresh().await;
    if ctrl.error.is_some() {
        return Ok(finish(&ctrl));
    }
    print_tasks(&ctrl.tasks);
    Ok(0)
}

pub async fn add(services: &AppServices, args: &AddArgs) -> Result<i32, core_api::CliError> {
    let mut ctrl = controller(services);
    ctrl.open_create();
    ctrl.draft.title = args.title.clone();
    ctrl.draft.description = args.description.clone();
    ctrl.draft.status = args.status.into();
    ctrl.submit().await;
    Ok(finish(&ctrl))
}

pub async fn edit(services: &AppServices, args: &EditArgs) -> Result<i32, core_api::CliError> {
    let patch = core_api::TaskPatch {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.map(Into::into),
    };
    if patch == core_api::TaskPatch::default() {
        eprintln!("Nothing to update: pass --title, --description or --status");
        return Ok(20);
    }
    let task = services.tasks.update(&args.id, &patch).await?;
    println!("Task updated successfully");
    print_tasks(std::slice::from_ref(&task));
    Ok(0)
}

pub async fn toggle(services: &AppServices, args: &IdArgs) -> Result<i32, core_api::CliError> {
    // The opposite status is computed from the server's current view.
    let mut ctrl = controller(services);
    ctrl.refresh().await;
    if ctrl.error.is_some() {
        return Ok(finish(&ctrl));
    }
    let Some(task) = ctrl.tasks.iter().find(|t| t.id == args.id).cloned() else {
        eprintln!("No task with id {}", args.id);
        return Ok(20);
    };
    ctrl.toggle_status(&task).await;
    Ok(finish(&ctrl))
}

pub async fn delete(services: &AppServices, args: &DeleteArgs) -> Result<i32, core_api::CliError> {
    if !args.yes && !confirm_delete()? {
        // Declined confirmation is a silent no-op, not an error.
        return Ok(0);
    }
    let mut ctrl = controller(services);
    ctrl.remove(&args.id).await;
    Ok(finish(&ctrl))
}

fn confirm_delete() -> Result<bool, core_api::CliError> {
    print!("Are you sure you want to delete this task? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
