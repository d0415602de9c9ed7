//! Built-in applications hosted in desktop windows.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::components::{Component, DesktopFilesComponent, WebPageComponent};
use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AppKind {
    Calculator,
    TextEdit,
    DesktopFiles,
}

impl AppKind {
    pub const ALL: [AppKind; 3] = [AppKind::Calculator, AppKind::TextEdit, AppKind::DesktopFiles];

    pub fn title(self) -> &'static str {
        match self {
            AppKind::Calculator => "Calculator",
            AppKind::TextEdit => "Text Edit",
            AppKind::DesktopFiles => "Desktop",
        }
    }

    pub fn initial_size(self) -> Size {
        match self {
            AppKind::Calculator => Size::new(32, 12),
            AppKind::TextEdit => Size::new(60, 18),
            AppKind::DesktopFiles => Size::new(40, 14),
        }
    }

    /// Directory name of the bundled page under the assets directory.
    fn asset_dir(self) -> Option<&'static str> {
        match self {
            AppKind::Calculator => Some("calculator"),
            AppKind::TextEdit => Some("textedit"),
            AppKind::DesktopFiles => None,
        }
    }

    pub fn build(self, env: &AppEnv) -> Box<dyn Component> {
        match self.asset_dir() {
            Some(dir) => Box::new(WebPageComponent::new(
                self.title(),
                env.assets_dir.join(dir).join("index.html"),
            )),
            None => Box::new(DesktopFilesComponent::new(env.desktop_dir.clone())),
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Filesystem locations applications read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnv {
    pub assets_dir: PathBuf,
    pub desktop_dir: PathBuf,
}

impl AppEnv {
    pub fn new(assets_dir: impl AsRef<Path>, desktop_dir: impl AsRef<Path>) -> Self {
        Self {
            assets_dir: assets_dir.as_ref().to_path_buf(),
            desktop_dir: desktop_dir.as_ref().to_path_buf(),
        }
    }
}
