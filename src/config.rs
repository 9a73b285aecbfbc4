//! The picker configuration and the override merge applied per invocation.

use std::fmt::{self, Write};
use std::sync::Arc;

use cder_picker_api::{EntryMaker, Trigger};
use indexmap::IndexMap;

use crate::command::{EntryValueFn, entry_value_fn};
use crate::entry::{entry_maker, home_prefix};
use crate::handlers::{self, Workspace};
use crate::platform::Platform;

/// Callback receiving the chosen directory.
pub type DirHandler = Arc<dyn Fn(&str) -> anyhow::Result<()> + Send + Sync>;

pub type TitleProducer = dyn Fn() -> anyhow::Result<String> + Send + Sync;

/// A prompt title given either directly or computed at launch.
#[derive(Clone)]
pub enum Title {
    Literal(String),
    Producer(Arc<TitleProducer>),
}

impl Title {
    pub fn producer<F>(produce: F) -> Self
    where
        F: Fn() -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Title::Producer(Arc::new(produce))
    }

    /// Return the literal, or invoke the producer once. Producer errors are
    /// returned as is.
    pub fn resolve(&self) -> anyhow::Result<String> {
        match self {
            Title::Literal(title) => Ok(title.clone()),
            Title::Producer(produce) => produce(),
        }
    }
}

impl From<&str> for Title {
    fn from(title: &str) -> Self {
        Title::Literal(title.to_string())
    }
}

impl From<String> for Title {
    fn from(title: String) -> Self {
        Title::Literal(title)
    }
}

impl fmt::Debug for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Title::Literal(title) => f.debug_tuple("Literal").field(title).finish(),
            Title::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Everything the picker needs to launch.
///
/// `mappings` always holds [`Trigger::Default`]; merging can replace its
/// handler but never remove it.
#[derive(Clone)]
pub struct CderConfig {
    /// Shell family the preview pipeline is built for.
    pub platform: Platform,
    pub prompt_title: Title,
    pub dir_command: Vec<String>,
    pub command_executor: Vec<String>,
    pub previewer_command: String,
    pub pager_command: String,
    pub entry_value_fn: Arc<EntryValueFn>,
    pub entry_maker: Arc<EntryMaker>,
    pub mappings: IndexMap<Trigger, DirHandler>,
}

impl CderConfig {
    pub const DEFAULT_TITLE: &'static str = "Cder";
    pub const DEFAULT_PREVIEWER: &'static str = "ls -a";
    pub const DEFAULT_PAGER: &'static str = r#"bat --plain --paging=always --pager="less -RS""#;
    pub const WINDOW_TRIGGER: &'static str = "<C-t>";

    /// Defaults for the running platform, with `cd`/`tcd` bound to `workspace`.
    pub fn new(workspace: Arc<dyn Workspace>) -> Self {
        let platform = Platform::current();
        Self::for_platform(platform, home_prefix(platform), workspace)
    }

    pub fn for_platform(
        platform: Platform,
        home: Option<String>,
        workspace: Arc<dyn Workspace>,
    ) -> Self {
        let search_root = home.clone().unwrap_or_else(|| ".".to_string());
        let dir_command = ["fd", "--type=d", ".", search_root.as_str()]
            .iter()
            .map(|arg| arg.to_string())
            .collect();

        let mut mappings: IndexMap<Trigger, DirHandler> = IndexMap::new();
        mappings.insert(Trigger::Default, handlers::cd(Arc::clone(&workspace)));
        if let Ok(trigger) = Self::WINDOW_TRIGGER.parse() {
            mappings.insert(trigger, handlers::tcd(workspace));
        }

        Self {
            platform,
            prompt_title: Title::from(Self::DEFAULT_TITLE),
            dir_command,
            command_executor: platform.default_executor(),
            previewer_command: Self::DEFAULT_PREVIEWER.to_string(),
            pager_command: Self::DEFAULT_PAGER.to_string(),
            entry_value_fn: entry_value_fn(platform),
            entry_maker: entry_maker(platform, home),
            mappings,
        }
    }

    /// Produce a new configuration with `overrides` applied on top of `self`.
    ///
    /// Plain fields are replaced when overridden; `mappings` is merged key by
    /// key with the override winning.
    pub fn merged(&self, overrides: Overrides) -> Self {
        let mut config = self.clone();
        let Overrides {
            prompt_title,
            dir_command,
            command_executor,
            previewer_command,
            pager_command,
            entry_value_fn,
            entry_maker,
            mappings,
        } = overrides;

        if let Some(title) = prompt_title {
            config.prompt_title = title;
        }
        if let Some(argv) = dir_command {
            config.dir_command = argv;
        }
        if let Some(argv) = command_executor {
            config.command_executor = argv;
        }
        if let Some(command) = previewer_command {
            config.previewer_command = command;
        }
        if let Some(command) = pager_command {
            config.pager_command = command;
        }
        if let Some(transform) = entry_value_fn {
            config.entry_value_fn = transform;
        }
        if let Some(maker) = entry_maker {
            config.entry_maker = maker;
        }
        for (trigger, handler) in mappings {
            config.mappings.insert(trigger, handler);
        }
        config
    }

    pub fn handler(&self, trigger: &Trigger) -> Option<&DirHandler> {
        self.mappings.get(trigger)
    }

    /// Human readable dump used by `--print-config`.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let title = match &self.prompt_title {
            Title::Literal(title) => title.clone(),
            Title::Producer(_) => "<computed at launch>".to_string(),
        };
        let _ = writeln!(out, "prompt_title      = {title}");
        let _ = writeln!(out, "dir_command       = {}", self.dir_command.join(" "));
        let _ = writeln!(out, "command_executor  = {}", self.command_executor.join(" "));
        let _ = writeln!(out, "previewer_command = {}", self.previewer_command);
        let _ = writeln!(out, "pager_command     = {}", self.pager_command);
        let triggers: Vec<String> = self.mappings.keys().map(Trigger::to_string).collect();
        let _ = writeln!(out, "mappings          = {}", triggers.join(", "));
        out
    }
}

impl fmt::Debug for CderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CderConfig")
            .field("platform", &self.platform)
            .field("prompt_title", &self.prompt_title)
            .field("dir_command", &self.dir_command)
            .field("command_executor", &self.command_executor)
            .field("previewer_command", &self.previewer_command)
            .field("pager_command", &self.pager_command)
            .field("mappings", &self.mappings.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Partial configuration layered over a [`CderConfig`].
#[derive(Clone, Default)]
pub struct Overrides {
    pub prompt_title: Option<Title>,
    pub dir_command: Option<Vec<String>>,
    pub command_executor: Option<Vec<String>>,
    pub previewer_command: Option<String>,
    pub pager_command: Option<String>,
    pub entry_value_fn: Option<Arc<EntryValueFn>>,
    pub entry_maker: Option<Arc<EntryMaker>>,
    pub mappings: IndexMap<Trigger, DirHandler>,
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("prompt_title", &self.prompt_title)
            .field("dir_command", &self.dir_command)
            .field("command_executor", &self.command_executor)
            .field("previewer_command", &self.previewer_command)
            .field("pager_command", &self.pager_command)
            .field("mappings", &self.mappings.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Overrides {
    pub fn with_title(mut self, title: impl Into<Title>) -> Self {
        self.prompt_title = Some(title.into());
        self
    }

    pub fn with_dir_command<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dir_command = Some(argv.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_command_executor<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command_executor = Some(argv.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_previewer_command(mut self, command: impl Into<String>) -> Self {
        self.previewer_command = Some(command.into());
        self
    }

    pub fn with_pager_command(mut self, command: impl Into<String>) -> Self {
        self.pager_command = Some(command.into());
        self
    }

    pub fn with_mapping(mut self, trigger: Trigger, handler: DirHandler) -> Self {
        self.mappings.insert(trigger, handler);
        self
    }

    /// Layer `other` on top of `self`, `other` winning.
    pub fn and(mut self, other: Overrides) -> Self {
        self.prompt_title = other.prompt_title.or(self.prompt_title);
        self.dir_command = other.dir_command.or(self.dir_command);
        self.command_executor = other.command_executor.or(self.command_executor);
        self.previewer_command = other.previewer_command.or(self.previewer_command);
        self.pager_command = other.pager_command.or(self.pager_command);
        self.entry_value_fn = other.entry_value_fn.or(self.entry_value_fn);
        self.entry_maker = other.entry_maker.or(self.entry_maker);
        self.mappings.extend(other.mappings);
        self
    }
}
