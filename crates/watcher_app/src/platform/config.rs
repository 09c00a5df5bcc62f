use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use watcher_engine::WatchConfig;
use watcher_logging::{watch_info, watch_warn};

pub const CONFIG_FILENAME: &str = "listing_watcher.ron";

/// Reads the RON config at `path`, falling back to defaults when the file is absent.
/// A file that exists but does not parse is an error.
pub fn load_or_default(path: &Path) -> anyhow::Result<WatchConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            watch_warn!(
                "No config at {:?}; using built-in defaults with all webhooks disabled",
                path
            );
            return Ok(WatchConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };

    let config: WatchConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    watch_info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_or_default(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, WatchConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(1800));
        assert!(config.webhooks.status.is_none());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                webhooks: (
                    status: Some("https://discord.com/api/webhooks/1/status"),
                ),
                search: (max_pages: 5),
                schedule: (removal_grace_cycles: 0),
            )"#,
        )
        .unwrap();

        let config = load_or_default(&path).unwrap();
        assert_eq!(
            config.webhooks.status.as_deref(),
            Some("https://discord.com/api/webhooks/1/status")
        );
        assert!(config.webhooks.new_listings.is_none());
        assert_eq!(config.search.max_pages, 5);
        assert_eq!(config.search.page_param, "strana");
        assert_eq!(config.cycle_settings().removal_grace_cycles, 0);
        assert_eq!(config.schedule.poll_interval_secs, 1800);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(search: oops").unwrap();
        assert!(load_or_default(&path).is_err());
    }
}
