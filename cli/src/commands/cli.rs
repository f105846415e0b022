use clap::{Args as ClapArgs, Parser, Subcommand};
use securetask_core::api as core_api;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for core_api::TaskStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => core_api::TaskStatus::Pending,
            StatusArg::Completed => core_api::TaskStatus::Completed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "securetask", version, about = "Terminal client for the SecureTask service")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL override for this invocation.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token override (otherwise read from ~/.securetask/token).
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Search by title. Matching semantics are owned by the server.
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

impl FilterArgs {
    pub fn to_filters(&self) -> core_api::TaskFilters {
        core_api::TaskFilters {
            search: self.search.clone(),
            status: self.status.map(Into::into),
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AddArgs {
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, value_enum, default_value_t = StatusArg::Pending)]
    pub status: StatusArg,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EditArgs {
    pub id: String,

    /// Fields left out stay untouched server-side (partial update).
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IdArgs {
    pub id: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ProfileArgs {
    /// Fields left out stay untouched server-side.
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obtain a token and store it in the token file.
    Login(LoginArgs),
    /// Create an account and store the returned token.
    Register(RegisterArgs),
    /// Remove the stored token.
    Logout,
    /// Show the logged-in profile.
    Whoami,
    /// Update profile fields.
    Profile(ProfileArgs),
    /// List tasks, optionally filtered.
    List(FilterArgs),
    /// Create a task.
    Add(AddArgs),
    /// Update fields of an existing task.
    Edit(EditArgs),
    /// Flip a task between pending and completed.
    Toggle(IdArgs),
    /// Delete a task (asks for confirmation unless --yes).
    Delete(DeleteArgs),
    /// Interactive task board (default when no subcommand is given).
    Tui(FilterArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_args_map_to_core_filters() {
        let args = FilterArgs {
            search: Some("milk".to_string()),
            status: Some(StatusArg::Completed),
        };
        let filters = args.to_filters();
        assert_eq!(filters.search.as_deref(), Some("milk"));
        assert_eq!(filters.status, Some(core_api::TaskStatus::Completed));
    }

    #[test]
    fn delete_requires_confirmation_by_default() {
        let args = Args::try_parse_from(["securetask", "delete", "t1"]).unwrap();
        match args.command {
            Some(Commands::Delete(del)) => assert!(!del.yes),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_overrides_parse_anywhere() {
        let args =
            Args::try_parse_from(["securetask", "list", "--base-url", "http://x/api"]).unwrap();
        assert_eq!(args.base_url.as_deref(), Some("http://x/api"));
    }
}
