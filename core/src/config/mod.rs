mod load;
mod types;

pub use load::{get_data_dir, get_token_file_path, load_default};
pub use types::{AppConfig, LoggingConfig, ServiceConfig, TuiConfig};
