use std::fmt::Write;
use std::path::PathBuf;

use cder::{app_dirs, logging};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

/// `--version` text: where cder reads `config.toml` from and where `CDER_LOG` output goes.
pub(super) fn long_version() -> &'static str {
    let details = version_details(app_dirs::get_config_dir(), logging::log_file_path());
    Box::leak(details.into_boxed_str())
}

fn version_details(
    config_dir: anyhow::Result<PathBuf>,
    log_file: anyhow::Result<PathBuf>,
) -> String {
    let describe = |path: anyhow::Result<PathBuf>| match path {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("cder {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {}", describe(config_dir));
    let _ = writeln!(details, "log file ({}): {}", logging::LOG_ENV, describe(log_file));
    details
}

pub(super) fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_names_the_log_variable_and_missing_dirs() {
        let details = version_details(
            Ok(PathBuf::from("/home/u/.config/cder")),
            Err(anyhow::anyhow!("no home directory")),
        );
        assert!(details.starts_with(&format!("cder {}\n", env!("CARGO_PKG_VERSION"))));
        assert!(details.contains("config directory: /home/u/.config/cder\n"));
        assert!(details.contains(&format!(
            "log file ({}): unavailable (no home directory)",
            logging::LOG_ENV
        )));
    }
}
