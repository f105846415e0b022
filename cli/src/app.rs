//! Assembly layer: applies CLI overrides to the config and wires the token
//! store and gateways together.

use std::sync::Arc;

use securetask_core::api as core_api;

use crate::commands::cli::Args;

pub struct AppServices {
    pub cfg: core_api::AppConfig,
    pub token_file: Arc<core_api::TokenFile>,
    pub tasks: Arc<dyn core_api::TaskGateway>,
    pub auth: core_api::AuthGateway,
}

pub fn build_services(
    mut cfg: core_api::AppConfig,
    args: &Args,
) -> Result<AppServices, core_api::CliError> {
    if let Some(url) = &args.base_url {
        cfg.service.base_url = url.clone();
    }

    let token_path = core_api::get_token_file_path()
        .map_err(|e| core_api::CliError::Config(e.to_string()))?;
    let token_file = Arc::new(core_api::TokenFile::new(token_path));

    // Credential provider injected into the adapter; one-off overrides win
    // over the persisted token file.
    let token_override = args
        .token
        .clone()
        .or_else(|| std::env::var("SECURETASK_TOKEN").ok())
        .filter(|t| !t.trim().is_empty());
    let provider: Arc<dyn core_api::TokenProvider> = match token_override {
        Some(token) => Arc::new(core_api::StaticToken::new(token)),
        None => token_file.clone(),
    };

    let adapter =
        core_api::HttpAdapter::new(&cfg.service.base_url, cfg.service.timeout_ms, provider)
            .map_err(|e| core_api::CliError::Config(e.to_string()))?;

    Ok(AppServices {
        cfg,
        token_file,
        tasks: Arc::new(core_api::HttpTaskGateway::new(adapter.clone())),
        auth: core_api::AuthGateway::new(adapter),
    })
}
