use crate::events::AppEvent;
use async_channel::Sender;
use circleseek::Config;
use directories::ProjectDirs;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error(transparent)]
    Seek(#[from] circleseek::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "circleseek", "circleseek")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    Ok(circleseek::config::load_config(path)?)
}

/// Falls back to built-in defaults when the file cannot be used.
pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

type WatchEvents = async_channel::Receiver<notify::Result<Event>>;

/// Starts watching the directory holding `config_path`. The watcher must be
/// kept alive for as long as events are wanted.
fn watch_config_dir(config_path: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    let config_dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(config_dir)?;

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, events_rx))
}

/// Whether `event` touched the config file itself.
fn is_config_change(event: &Event, config_path: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    relevant && event.paths.iter().any(|p| p == config_path)
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes, until
/// the receiving side goes away.
pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let (_watcher, events) = match watch_config_dir(&config_path) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config hot reload disabled: {}", e);
            return;
        }
    };
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = events.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if is_config_change(&event, &config_path) && tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("circleseek-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_default_config_matches_builtin_defaults() {
        let dir = scratch_dir("defaults");
        let path = dir.join("config.toml");
        write_default_config(&path).unwrap();

        let config = load_config(&path).unwrap();
        let builtin = Config::default();
        assert_eq!(config.style.progress_color, builtin.style.progress_color);
        assert_eq!(config.style.background_color, builtin.style.background_color);
        assert_eq!(config.style.dot_radius, builtin.style.dot_radius);
        assert_eq!(
            (config.min_value, config.max_value, config.value),
            (builtin.min_value, builtin.max_value, builtin.value)
        );
        assert_eq!(config.direction, builtin.direction);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_default_config_keeps_existing_file() {
        let dir = scratch_dir("existing");
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(&path, "max_value = 7\n").unwrap();

        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap().max_value, 7);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_density_scales_written_defaults() {
        let dir = scratch_dir("density");
        let path = dir.join("config.toml");
        write_default_config(&path).unwrap();

        let written = fs_err::read_to_string(&path).unwrap();
        fs_err::write(&path, written.replace("density = 1.0", "density = 2.0")).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.style.dot_radius, 40.0);
        assert_eq!(config.style.progress_stroke_width, 4.0);
        assert_eq!(config.style.tick_line_width, 4.0);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_only_config_file_changes_reload() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let path = PathBuf::from("/tmp/circleseek/config.toml");
        let event = |kind, p: &str| Event::new(kind).add_path(PathBuf::from(p));

        assert!(is_config_change(
            &event(EventKind::Modify(ModifyKind::Any), "/tmp/circleseek/config.toml"),
            &path
        ));
        assert!(is_config_change(
            &event(EventKind::Create(CreateKind::File), "/tmp/circleseek/config.toml"),
            &path
        ));
        assert!(!is_config_change(
            &event(EventKind::Modify(ModifyKind::Any), "/tmp/circleseek/config.toml.swp"),
            &path
        ));
        assert!(!is_config_change(
            &event(EventKind::Access(AccessKind::Any), "/tmp/circleseek/config.toml"),
            &path
        ));
    }

    #[test]
    fn test_broken_config_falls_back() {
        let dir = scratch_dir("broken");
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(&path, "progress_color = \"not a color\"\n").unwrap();

        assert_eq!(load_or_default(&path), Config::default());

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
