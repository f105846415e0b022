use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default securetask data directory: ~/.securetask
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".securetask"))
}

pub fn get_token_file_path() -> anyhow::Result<PathBuf> {
    Ok(get_data_dir()?.join("token"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.securetask/config.toml (highest)
    let data_dir = get_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Default the log directory into the data dir when unset.
    if cfg
        .logging
        .directory
        .as_deref()
        .map(str::trim)
        .map(str::is_empty)
        .unwrap_or(true)
    {
        let logs_dir = data_dir.join("logs");
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("SECURETASK_BASE_URL") {
        if !v.trim().is_empty() {
            cfg.service.base_url = v;
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.service.base_url, "http://localhost:5000/api");
        assert_eq!(cfg.service.timeout_ms, 10_000);
        assert!(cfg.tui.enabled);
        assert!(cfg.logging.enabled);
        assert!(!cfg.logging.console);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [service]
            base_url = "https://tasks.example.com/api"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.service.base_url, "https://tasks.example.com/api");
        assert_eq!(cfg.service.timeout_ms, 10_000);
        assert!(cfg.tui.enabled);
    }
}
