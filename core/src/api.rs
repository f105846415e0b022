//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `securetask_core::api` instead of reaching into
//! internal modules.

pub use crate::auth::{
    AuthResponse, LoginPayload, ProfilePatch, RegisterPayload, StaticToken, TokenFile,
    TokenProvider, User,
};
pub use crate::config::{
    get_data_dir, get_token_file_path, load_default, AppConfig, LoggingConfig, ServiceConfig,
    TuiConfig,
};
pub use crate::controller::{EditSession, FetchTicket, FormDraft, TaskListController};
pub use crate::error::{CliError, RemoteError};
pub use crate::gateway::{AuthGateway, HttpAdapter, HttpTaskGateway, TaskGateway};
pub use crate::model::{Task, TaskFilters, TaskInput, TaskPatch, TaskStatus};
