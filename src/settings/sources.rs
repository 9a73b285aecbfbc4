use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use cder::app_dirs;
use config::{Config, ConfigError, Environment, File};

use crate::cli::CliArgs;

/// Settings given as argv lists; `CDER__<KEY>` values for these split on commas.
const LIST_KEYS: &[&str] = &["dir_command", "command_executor"];

/// Layer cder's settings: `config.toml` in the user config dir, then `.cder.toml` in the
/// working directory, then every `--config` file, then `CDER__*` variables.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(environment_overrides());

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn environment_overrides() -> Environment {
    LIST_KEYS.iter().fold(
        Environment::with_prefix("cder")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(key),
    )
}

/// Optional cder.toml files, the per-user one before the per-project one.
pub(super) fn default_config_files() -> Vec<PathBuf> {
    let user = app_dirs::get_config_dir()
        .ok()
        .map(|dir| dir.join("config.toml"));
    let project = env::current_dir()
        .ok()
        .map(|dir| dir.join(".cder.toml"));

    user.into_iter().chain(project).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_file_is_read_after_the_user_file() {
        let files = default_config_files();
        let project = files
            .iter()
            .position(|path| path.ends_with(".cder.toml"))
            .expect("project file listed");
        if let Some(user) = files.iter().position(|path| path.ends_with("config.toml")) {
            assert!(user < project);
        }
        assert_eq!(project, files.len() - 1);
    }

    #[test]
    fn argv_settings_from_the_environment_split_on_commas() {
        let vars = config::Map::from([
            ("CDER__DIR_COMMAND".to_string(), "fd,--type=d,.,/srv".to_string()),
            ("CDER__TITLE".to_string(), "a,b".to_string()),
        ]);
        let config = Config::builder()
            .add_source(environment_overrides().source(Some(vars)))
            .build()
            .expect("builds");

        let dir_command: Vec<String> = config.get("dir_command").expect("list");
        assert_eq!(dir_command, ["fd", "--type=d", ".", "/srv"]);
        let title: String = config.get("title").expect("string");
        assert_eq!(title, "a,b");
    }
}
