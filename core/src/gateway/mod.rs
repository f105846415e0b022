mod auth;
mod http;
mod tasks;

pub use auth::AuthGateway;
pub use http::HttpAdapter;
pub use tasks::{HttpTaskGateway, TaskGateway};
