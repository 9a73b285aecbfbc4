use cder::CderConfig;
use clap::{CommandFactory, FromArgMatches, Parser};

use super::{CliArgs, OutputFormat};

#[test]
fn command_definition_is_consistent() {
    CliArgs::command().debug_assert();
}

#[test]
fn parse_cli_accepts_default_arguments() {
    let command = CliArgs::command();
    let mut matches = command.get_matches_from(vec!["cder"]);
    let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
    assert_eq!(parsed.output, OutputFormat::Plain);
    assert!(parsed.title.is_none());
    assert!(!parsed.no_config);
}

#[test]
fn parses_overrides_and_repeated_configs() {
    let parsed = CliArgs::parse_from([
        "cder",
        "-n",
        "-c",
        "a.toml",
        "--config",
        "b.toml",
        "--title",
        "Projects",
        "--dir-command",
        "fd --type=d . /srv",
        "-o",
        "json",
    ]);
    assert!(parsed.no_config);
    assert_eq!(parsed.config.len(), 2);
    assert_eq!(parsed.title.as_deref(), Some("Projects"));
    assert_eq!(parsed.dir_command.as_deref(), Some("fd --type=d . /srv"));
    assert_eq!(parsed.output, OutputFormat::Json);
}

#[test]
fn preview_help_shows_the_built_in_commands() {
    let command = CliArgs::command();
    let help_for = |id: &str| {
        command
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_help())
            .map(ToString::to_string)
            .expect("documented")
    };

    let pager = format!("(default: {})", CderConfig::DEFAULT_PAGER);
    assert!(help_for("pager_command").ends_with(&pager));
    let previewer = format!("(default: {})", CderConfig::DEFAULT_PREVIEWER);
    assert!(help_for("previewer_command").ends_with(&previewer));
}
