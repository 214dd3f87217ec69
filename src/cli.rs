use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::config::{self, ThemeConfig};
use crate::palette::Theme;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// JSON file holding the persisted theme (the local-storage stand-in).
    #[arg(long, global = true, default_value = ".theme.json")]
    pub store: PathBuf,

    /// Key the theme is persisted under.
    #[arg(long, global = true, default_value = config::DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    /// Selector of the navigation container the toggle is prepended to.
    #[arg(long, global = true, default_value = config::DEFAULT_NAV_SELECTOR)]
    pub nav_selector: String,

    #[arg(long, global = true, default_value = config::DEFAULT_TOGGLE_ID)]
    pub toggle_id: String,

    #[arg(long, global = true, default_value = config::DEFAULT_TOGGLE_CLASS)]
    pub toggle_class: String,

    /// Global function the toggle calls when clicked.
    #[arg(long, global = true, default_value = config::DEFAULT_GLOBAL_NAME)]
    pub global_name: String,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub progress: ProgressMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply the persisted theme to pages and attach the toggle where the navigation exists.
    Init {
        #[command(flatten)]
        pages: PageArgs,

        /// Keep re-reading each page until its navigation container appears.
        #[arg(long)]
        wait: bool,

        /// How often to re-read a page while waiting.
        #[arg(long, default_value_t = config::DEFAULT_POLL_INTERVAL.as_millis() as u64)]
        poll_interval_ms: u64,

        /// Give up waiting after this long. Waits forever when omitted.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Apply an explicit theme to pages and persist it.
    Set {
        theme: Theme,

        #[command(flatten)]
        pages: PageArgs,
    },
    /// Flip the theme of each page, or the persisted theme when no page is given.
    Toggle {
        #[command(flatten)]
        pages: PageArgs,
    },
    /// Print the persisted theme and the label the toggle shows for it.
    Show,
    /// Verify that pages carry a consistent theme and at most one toggle.
    Check {
        #[arg(required = true)]
        pages: Vec<PathBuf>,
    },
    /// Emit CSS with both palettes keyed on `data-theme`.
    Stylesheet {
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct PageArgs {
    /// HTML pages to update.
    pub pages: Vec<PathBuf>,

    /// Write updated pages into this directory instead of in place.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl Args {
    pub fn theme_config(&self) -> ThemeConfig {
        let poll_interval = match &self.command {
            Command::Init {
                poll_interval_ms, ..
            } => Duration::from_millis(*poll_interval_ms),
            _ => config::DEFAULT_POLL_INTERVAL,
        };
        ThemeConfig {
            storage_key: self.storage_key.clone(),
            nav_selector: self.nav_selector.clone(),
            toggle_id: self.toggle_id.clone(),
            toggle_class: self.toggle_class.clone(),
            global_name: self.global_name.clone(),
            poll_interval,
        }
    }
}
