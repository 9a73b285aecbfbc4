use std::fs;
use std::sync::Arc;

use cder::{CderConfig, ShellWorkspace, Trigger, Workspace};
use clap::Parser;

use super::{RawMapping, RawSettings};
use crate::cli::CliArgs;
use crate::settings::errors::SettingsError;
use crate::settings::load;

fn workspace() -> Arc<dyn Workspace> {
    Arc::new(ShellWorkspace::new())
}

#[test]
fn cli_overrides_take_precedence() {
    let cli = CliArgs::parse_from([
        "cder",
        "--title",
        "Projects",
        "--dir-command",
        "fd  --type=d . /srv",
        "--previewer-command",
        "tree -L 1",
        "--pager-command",
        "cat",
    ]);

    let mut raw = RawSettings {
        prompt_title: Some("from file".into()),
        pager_command: Some("less".into()),
        ..RawSettings::default()
    };
    raw.apply_cli_overrides(&cli);

    assert_eq!(raw.prompt_title.as_deref(), Some("Projects"));
    assert_eq!(
        raw.dir_command,
        Some(vec![
            "fd".to_string(),
            "--type=d".into(),
            ".".into(),
            "/srv".into()
        ])
    );
    assert_eq!(raw.previewer_command.as_deref(), Some("tree -L 1"));
    assert_eq!(raw.pager_command.as_deref(), Some("cat"));
}

#[test]
fn mappings_resolve_to_builtin_handlers() {
    let raw = RawSettings {
        mappings: vec![
            RawMapping {
                trigger: "default".into(),
                handler: "tcd".into(),
            },
            RawMapping {
                trigger: "<C-g>".into(),
                handler: "cd".into(),
            },
        ],
        ..RawSettings::default()
    };

    let overrides = raw.into_overrides(workspace()).expect("valid");
    assert!(overrides.mappings.contains_key(&Trigger::Default));
    assert!(overrides.mappings.contains_key(&"<C-g>".parse::<Trigger>().expect("trigger")));
}

#[test]
fn unknown_handlers_are_rejected() {
    let raw = RawSettings {
        mappings: vec![RawMapping {
            trigger: "<C-x>".into(),
            handler: "rm".into(),
        }],
        ..RawSettings::default()
    };

    let err = raw.into_overrides(workspace()).expect_err("unknown handler");
    assert!(matches!(err, SettingsError::UnknownHandler { ref name, .. } if name == "rm"));
    assert!(err.to_string().contains("cd, tcd"));
}

#[test]
fn invalid_triggers_are_rejected() {
    let raw = RawSettings {
        mappings: vec![RawMapping {
            trigger: "<C-x".into(),
            handler: "cd".into(),
        }],
        ..RawSettings::default()
    };

    let err = raw.into_overrides(workspace()).expect_err("bad notation");
    assert!(matches!(err, SettingsError::InvalidTrigger { .. }));
}

#[test]
fn empty_commands_are_rejected() {
    let raw = RawSettings {
        command_executor: Some(vec![" ".into()]),
        ..RawSettings::default()
    };
    let err = raw.into_overrides(workspace()).expect_err("empty executor");
    assert!(matches!(
        err,
        SettingsError::EmptyCommand {
            key: "command_executor"
        }
    ));
}

#[test]
fn loads_a_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cder.toml");
    fs::write(
        &path,
        r#"
prompt_title = "Work"
dir_command = ["fd", "--type=d", ".", "/srv"]
command_executer = ["sh", "-c"]
previewer_command = "tree -L 2"

[[mappings]]
trigger = "<C-y>"
handler = "tcd"
"#,
    )
    .expect("write config");

    let cli = CliArgs::parse_from([
        "cder",
        "--no-config",
        "--config",
        path.to_str().expect("utf-8 path"),
        "--pager-command",
        "cat",
    ]);
    let overrides = load(&cli, workspace()).expect("load");
    let config = CderConfig::new(workspace()).merged(overrides);

    assert_eq!(config.prompt_title.resolve().expect("title"), "Work");
    assert_eq!(config.dir_command, ["fd", "--type=d", ".", "/srv"]);
    assert_eq!(config.command_executor, ["sh", "-c"]);
    assert_eq!(config.previewer_command, "tree -L 2");
    assert_eq!(config.pager_command, "cat");
    assert!(config.handler(&"<C-y>".parse().expect("trigger")).is_some());
    assert!(config.handler(&Trigger::Default).is_some());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let cli = CliArgs::parse_from(["cder", "--no-config", "--config", "/nonexistent/cder.toml"]);
    assert!(load(&cli, workspace()).is_err());
}
