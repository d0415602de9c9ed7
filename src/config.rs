//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use indoc::indoc;
use tracing::Level;

use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, SHELL_EDGE_MARGIN};
use crate::desktop::dock::DockEntry;
use crate::error::ShellError;
use crate::window::SizePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizePolicyArg {
    /// Windows never shrink below the minimum size.
    Clamp,
    /// Rubber-band: a drag may collapse or invert a window.
    Allow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

const KEYS_HELP: &str = indoc! {"
    Keys:
      Ctrl+Q            quit the shell
      Ctrl+W            close the focused window
      Ctrl+R            restart the focused window
      Shift+Tab, F6     focus the next window
      F1 / F2 / F3      open Calculator / Text Edit / Desktop
"};

#[derive(Parser, Debug)]
#[command(
    name = "simplifyc-shell",
    version = env!("CARGO_PKG_VERSION"),
    about = "A floating-window desktop shell for the terminal",
    after_help = KEYS_HELP
)]
pub struct ShellCli {
    /// Directory whose `.os`/`.osdir` entries appear as desktop icons.
    #[arg(long, value_name = "DIR", default_value = "Home/Desktop")]
    pub desktop_dir: PathBuf,

    /// Directory holding the bundled application pages.
    #[arg(long, value_name = "DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Cells from a window edge that select a resize zone.
    #[arg(long, value_name = "CELLS", default_value_t = SHELL_EDGE_MARGIN)]
    pub edge_margin: i32,

    #[arg(long, value_enum, default_value_t = SizePolicyArg::Clamp)]
    pub size_policy: SizePolicyArg,

    /// Minimum window width under the clamp policy.
    #[arg(long, value_name = "CELLS", default_value_t = MIN_WINDOW_WIDTH)]
    pub min_width: i32,

    /// Minimum window height under the clamp policy.
    #[arg(long, value_name = "CELLS", default_value_t = MIN_WINDOW_HEIGHT)]
    pub min_height: i32,

    /// Input poll interval.
    #[arg(long, value_name = "MILLIS", default_value_t = 16)]
    pub poll_ms: u64,

    /// Extra dock entry launching an external program. Repeatable.
    #[arg(long = "launch", value_name = "LABEL=COMMAND")]
    pub launch: Vec<String>,

    /// Write logs to this file. Without it logs are discarded.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub desktop_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub edge_margin: i32,
    pub size_policy: SizePolicy,
    pub poll_interval: Duration,
    pub launch_entries: Vec<DockEntry>,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl TryFrom<&ShellCli> for ShellConfig {
    type Error = ShellError;

    fn try_from(cli: &ShellCli) -> Result<Self, Self::Error> {
        if !(1..=8).contains(&cli.edge_margin) {
            return Err(ShellError::InvalidConfig(
                "edge margin must be between 1 and 8 cells".to_string(),
            ));
        }
        if !(1..=1000).contains(&cli.poll_ms) {
            return Err(ShellError::InvalidConfig(
                "poll interval must be between 1 and 1000 ms".to_string(),
            ));
        }
        if cli.min_width < 1 || cli.min_height < 1 {
            return Err(ShellError::InvalidConfig(
                "minimum window size must be at least 1x1".to_string(),
            ));
        }
        let size_policy = match cli.size_policy {
            SizePolicyArg::Clamp => SizePolicy::Clamp {
                min_width: cli.min_width,
                min_height: cli.min_height,
            },
            SizePolicyArg::Allow => SizePolicy::Allow,
        };
        let launch_entries = cli
            .launch
            .iter()
            .map(|entry| DockEntry::parse(entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            desktop_dir: cli.desktop_dir.clone(),
            assets_dir: cli.assets_dir.clone(),
            edge_margin: cli.edge_margin,
            size_policy,
            poll_interval: Duration::from_millis(cli.poll_ms),
            launch_entries,
            log_file: cli.log_file.clone(),
            log_level: cli.log_level.into(),
        })
    }
}
