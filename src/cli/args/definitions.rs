use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `cder` binary.
#[derive(Parser, Debug)]
#[command(
    name = "cder",
    version,
    long_version = long_version(),
    about = "Fuzzy-pick a directory, preview it, and change into it",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "CDER_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Set the prompt title (default: Cder)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        long = "dir-command",
        value_name = "COMMAND",
        help = "Directory listing command, split on whitespace (default: fd --type=d . $HOME)"
    )]
    pub(crate) dir_command: Option<String>,
    #[arg(
        long = "previewer-command",
        value_name = "COMMAND",
        help = "Command listing the highlighted directory (default: ls -a)"
    )]
    pub(crate) previewer_command: Option<String>,
    #[arg(
        long = "pager-command",
        value_name = "COMMAND",
        help = r#"Command the preview is piped through (default: bat --plain --paging=always --pager="less -RS")"#
    )]
    pub(crate) pager_command: Option<String>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration to stderr before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to report the chosen directory"
    )]
    pub(crate) output: OutputFormat,
}
