use anyhow::Result;
use stackctl::cli::{Lifecycle, LifecycleCommand, load_settings};
use stackctl::infra::config::Overrides;
use stackctl::test_support::MockEngine;
use std::fs;
use std::sync::Arc;

fn write_config(dir: &std::path::Path, shared: &std::path::Path) -> Result<()> {
    let toml = format!(
        r#"
[compose]
file = "srcs/docker-compose.yml"
project_name = "inception"

[shared]
dir = "{}"
"#,
        shared.display()
    );
    fs::write(dir.join("stackctl.toml"), toml)?;
    Ok(())
}

#[test]
fn test_workflow_start_then_stop() -> Result<()> {
    // 1. Setup Temp Config
    let temp_dir = tempfile::tempdir()?;
    let shared = temp_dir.path().join("home/user/shared_data");
    write_config(temp_dir.path(), &shared)?;

    // 2. Setup Mock Engine
    let mock = Arc::new(MockEngine::new());
    let settings = load_settings(
        &temp_dir.path().join("no-global"),
        temp_dir.path(),
        &Overrides::default(),
    )?;
    let lifecycle = Lifecycle::with_runtime(settings, mock.clone());

    assert!(!shared.exists());

    // 3. "all"
    lifecycle.run(LifecycleCommand::All)?;

    assert!(shared.is_dir(), "shared dir should exist after start");
    assert!(
        mock.get_commands()
            .contains(&"compose_up:srcs/docker-compose.yml:build:detached".to_string())
    );

    // 4. "down"
    fs::remove_dir(&shared)?;
    lifecycle.run(LifecycleCommand::Down)?;

    let commands = mock.get_commands();
    assert!(commands.contains(&"compose_down:srcs/docker-compose.yml".to_string()));
    assert!(!shared.exists(), "stop must not touch the shared dir");

    Ok(())
}

#[test]
fn test_start_never_fails_on_existing_dir() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let shared = temp_dir.path().join("shared_data");
    write_config(temp_dir.path(), &shared)?;
    let settings = load_settings(temp_dir.path(), temp_dir.path(), &Overrides::default())?;

    let mock = Arc::new(MockEngine::new());
    let lifecycle = Lifecycle::with_runtime(settings, mock.clone());

    // absent
    lifecycle.start()?;
    // present, empty
    lifecycle.start()?;
    // present, with content
    fs::write(shared.join("wordpress.sql"), "dump")?;
    lifecycle.rebuild()?;

    assert_eq!(fs::read_to_string(shared.join("wordpress.sql"))?, "dump");
    let ups = mock
        .get_commands()
        .iter()
        .filter(|c| c.starts_with("compose_up"))
        .count();
    assert_eq!(ups, 3);

    Ok(())
}

#[test]
fn test_up_failure_propagates() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let shared = temp_dir.path().join("shared_data");
    write_config(temp_dir.path(), &shared)?;
    let settings = load_settings(temp_dir.path(), temp_dir.path(), &Overrides::default())?;

    let mock = Arc::new(MockEngine::new());
    mock.set_fail_on("compose_up");
    let lifecycle = Lifecycle::with_runtime(settings, mock);

    assert!(lifecycle.run(LifecycleCommand::All).is_err());
    // directory is prepared before the engine is invoked
    assert!(shared.is_dir());

    Ok(())
}

#[test]
fn test_cli_override_beats_config_file() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    write_config(temp_dir.path(), &temp_dir.path().join("from_file"))?;

    let overrides = Overrides {
        compose_file: Some("other/compose.yml".into()),
        shared_dir: Some(temp_dir.path().join("from_cli")),
    };
    let settings = load_settings(temp_dir.path(), temp_dir.path(), &overrides)?;

    let mock = Arc::new(MockEngine::new());
    let lifecycle = Lifecycle::with_runtime(settings, mock.clone());
    lifecycle.start()?;

    assert!(temp_dir.path().join("from_cli").is_dir());
    assert!(!temp_dir.path().join("from_file").exists());
    assert_eq!(
        lifecycle.settings().project.project_name.as_deref(),
        Some("inception")
    );
    assert!(
        mock.get_commands()
            .contains(&"compose_up:other/compose.yml:build:detached".to_string())
    );

    Ok(())
}

#[test]
fn test_shared_dir_override_with_dollar_is_literal() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let shared = temp_dir.path().join("price$5data");

    let overrides = Overrides {
        compose_file: None,
        shared_dir: Some(shared.clone()),
    };
    let settings = load_settings(temp_dir.path(), temp_dir.path(), &overrides)?;
    assert_eq!(settings.shared_dir, shared);

    let mock = Arc::new(MockEngine::new());
    Lifecycle::with_runtime(settings, mock).start()?;
    assert!(shared.is_dir());

    Ok(())
}
