use crate::domain::ComposeProject;
use crate::infra::docker_adapter::DEFAULT_ENGINE_BINARY;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "stackctl.toml";
pub const DEFAULT_COMPOSE_FILE: &str = "srcs/docker-compose.yml";
pub const DEFAULT_SHARED_DIR: &str = "~/shared_data";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"))
        .join(".config/stackctl")
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ComposeConfig {
    pub file: Option<PathBuf>,
    pub project_name: Option<String>,
    pub standalone: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct EngineConfig {
    pub binary: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct SharedConfig {
    pub dir: Option<String>,
    /// Already expanded by the shell; used verbatim
    #[serde(skip)]
    pub dir_override: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub shared: SharedConfig,
}

/// Values given on the command line or through the environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub compose_file: Option<PathBuf>,
    pub shared_dir: Option<PathBuf>,
}

/// Fully resolved configuration, ready to drive the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project: ComposeProject,
    pub engine_binary: String,
    pub shared_dir: PathBuf,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(file) = other.compose.file {
            self.compose.file = Some(file);
        }
        if let Some(name) = other.compose.project_name {
            self.compose.project_name = Some(name);
        }
        if let Some(standalone) = other.compose.standalone {
            self.compose.standalone = Some(standalone);
        }
        if let Some(binary) = other.engine.binary {
            self.engine.binary = Some(binary);
        }
        if let Some(dir) = other.shared.dir {
            self.shared.dir = Some(dir);
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(file) = &overrides.compose_file {
            self.compose.file = Some(file.clone());
        }
        if let Some(dir) = &overrides.shared_dir {
            self.shared.dir_override = Some(dir.clone());
        }
    }

    /// Fills defaults, validates and expands paths
    pub fn resolve(&self) -> Result<Settings> {
        let file = self
            .compose
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPOSE_FILE));
        if file.as_os_str().is_empty() {
            bail!("compose.file não pode ser vazio");
        }

        let engine_binary = self
            .engine
            .binary
            .clone()
            .unwrap_or_else(|| DEFAULT_ENGINE_BINARY.to_string());
        if engine_binary.trim().is_empty() {
            bail!("engine.binary não pode ser vazio");
        }

        let project_name = self
            .compose
            .project_name
            .clone()
            .filter(|name| !name.trim().is_empty());

        let shared_dir = match &self.shared.dir_override {
            Some(dir) if dir.as_os_str().is_empty() => bail!("shared.dir não pode ser vazio"),
            Some(dir) => dir.clone(),
            None => {
                let raw_dir = self.shared.dir.as_deref().unwrap_or(DEFAULT_SHARED_DIR);
                expand_shared_dir(raw_dir)?
            }
        };

        Ok(Settings {
            project: ComposeProject {
                file,
                project_name,
                standalone: self.compose.standalone.unwrap_or(false),
            },
            engine_binary,
            shared_dir,
        })
    }
}

/// Expands `~` and `$VAR` for the invoking user
pub fn expand_shared_dir(raw: &str) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        bail!("shared.dir não pode ser vazio");
    }

    let expanded = shellexpand::full(raw)
        .with_context(|| format!("expandindo diretório compartilhado {raw:?}"))?;

    Ok(PathBuf::from(expanded.into_owned()))
}

fn read_config_file(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("lendo config em {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parse de config em {:?}", path))?;

    debug!("Config carregada de {:?}", path);
    Ok(Some(config))
}

/// Loads `<config_dir>/stackctl.toml`, then merges `<work_dir>/stackctl.toml` over it
pub fn load_app_config(config_dir: &Path, work_dir: &Path) -> Result<AppConfig> {
    let mut app_config =
        read_config_file(&config_dir.join(CONFIG_FILE_NAME))?.unwrap_or_default();

    if let Some(local) = read_config_file(&work_dir.join(CONFIG_FILE_NAME))? {
        app_config.merge(local);
    }

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_configured() {
        let settings = AppConfig::default().resolve().unwrap();

        assert_eq!(settings.project.file, PathBuf::from("srcs/docker-compose.yml"));
        assert_eq!(settings.project.project_name, None);
        assert!(!settings.project.standalone);
        assert_eq!(settings.engine_binary, "docker");
        assert!(settings.shared_dir.ends_with("shared_data"));
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
[compose]
file = "deploy/compose.yml"
project_name = "inception"
standalone = true

[engine]
binary = "podman"

[shared]
dir = "/srv/shared"
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        let settings = config.resolve().unwrap();

        assert_eq!(settings.project.file, PathBuf::from("deploy/compose.yml"));
        assert_eq!(settings.project.project_name.as_deref(), Some("inception"));
        assert!(settings.project.standalone);
        assert_eq!(settings.engine_binary, "podman");
        assert_eq!(settings.shared_dir, PathBuf::from("/srv/shared"));
    }

    #[test]
    fn rejects_unknown_value_types() {
        let toml = r#"
[compose]
standalone = "yes"
"#;
        assert!(toml::from_str::<AppConfig>(toml).is_err());
    }

    #[test]
    fn rejects_empty_values() {
        let mut config = AppConfig::default();
        config.engine.binary = Some("  ".to_string());
        assert!(config.resolve().is_err());

        let mut config = AppConfig::default();
        config.shared.dir = Some(String::new());
        assert!(config.resolve().is_err());

        let mut config = AppConfig::default();
        config.compose.file = Some(PathBuf::new());
        assert!(config.resolve().is_err());
    }

    #[test]
    fn undefined_variable_in_shared_dir_is_an_error() {
        let result = expand_shared_dir("/data/$STACKCTL_SURELY_UNDEFINED_VAR/shared");
        assert!(result.is_err());
    }

    #[test]
    fn merge_prefers_other() {
        let mut base: AppConfig = toml::from_str(
            r#"
[compose]
file = "a.yml"
project_name = "base"
[shared]
dir = "/tmp/a"
"#,
        )
        .unwrap();
        let local: AppConfig = toml::from_str(
            r#"
[compose]
file = "b.yml"
"#,
        )
        .unwrap();

        base.merge(local);

        assert_eq!(base.compose.file, Some(PathBuf::from("b.yml")));
        assert_eq!(base.compose.project_name.as_deref(), Some("base"));
        assert_eq!(base.shared.dir.as_deref(), Some("/tmp/a"));
    }

    #[test]
    fn overrides_win_over_files() {
        let mut config: AppConfig = toml::from_str(
            r#"
[compose]
file = "a.yml"
[shared]
dir = "/tmp/a"
"#,
        )
        .unwrap();

        config.apply_overrides(&Overrides {
            compose_file: Some(PathBuf::from("override.yml")),
            shared_dir: Some(PathBuf::from("/tmp/override")),
        });
        let settings = config.resolve().unwrap();

        assert_eq!(settings.project.file, PathBuf::from("override.yml"));
        assert_eq!(settings.shared_dir, PathBuf::from("/tmp/override"));
    }

    #[test]
    fn override_is_used_verbatim() {
        let mut config = AppConfig::default();
        config.shared.dir = Some("$HOME/ignored".to_string());

        config.apply_overrides(&Overrides {
            compose_file: None,
            shared_dir: Some(PathBuf::from("/tmp/price$5data/~x")),
        });
        let settings = config.resolve().unwrap();

        assert_eq!(settings.shared_dir, PathBuf::from("/tmp/price$5data/~x"));
    }

    #[test]
    fn empty_override_is_rejected() {
        let mut config = AppConfig::default();
        config.apply_overrides(&Overrides {
            compose_file: None,
            shared_dir: Some(PathBuf::new()),
        });
        assert!(config.resolve().is_err());
    }

    #[test]
    fn loads_global_then_local() {
        let global = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();

        fs::write(
            global.path().join(CONFIG_FILE_NAME),
            "[compose]\nfile = \"global.yml\"\nproject_name = \"g\"\n",
        )
        .unwrap();
        fs::write(
            local.path().join(CONFIG_FILE_NAME),
            "[compose]\nfile = \"local.yml\"\n",
        )
        .unwrap();

        let config = load_app_config(global.path(), local.path()).unwrap();

        assert_eq!(config.compose.file, Some(PathBuf::from("local.yml")));
        assert_eq!(config.compose.project_name.as_deref(), Some("g"));
    }

    #[test]
    fn missing_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_app_config(&dir.path().join("nope"), dir.path()).unwrap();
        assert!(config.compose.file.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[compose\nfile=").unwrap();

        assert!(load_app_config(dir.path(), dir.path()).is_err());
    }
}
