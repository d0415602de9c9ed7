use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::AppKind;
use crate::constants::DOCK_HEIGHT;
use crate::error::{Result, ShellError};
use crate::theme::Theme;
use crate::ui::{UiFrame, rect_contains, truncate_to_width};
use crate::window::WindowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockAction {
    Open(AppKind),
    Launch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockEntry {
    pub label: String,
    pub action: DockAction,
}

impl DockEntry {
    pub fn app(kind: AppKind) -> Self {
        Self {
            label: kind.title().to_string(),
            action: DockAction::Open(kind),
        }
    }

    pub fn launch(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: DockAction::Launch(command.into()),
        }
    }

    /// Parse `LABEL=COMMAND`.
    pub fn parse(entry: &str) -> Result<Self> {
        let (label, command) = entry.split_once('=').ok_or_else(|| {
            ShellError::InvalidConfig(format!("launch entry {entry:?} must be LABEL=COMMAND"))
        })?;
        let label = label.trim();
        let command = command.trim();
        if label.is_empty() {
            return Err(ShellError::InvalidConfig(format!(
                "launch entry {entry:?} has an empty label"
            )));
        }
        if command.is_empty() {
            return Err(ShellError::EmptyCommand);
        }
        Ok(Self::launch(label, command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockHit {
    Entry(DockAction),
    Window(WindowId),
}

/// Per-window data the dock shows in its window list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockWindow {
    pub id: WindowId,
    pub title: String,
    pub focused: bool,
}

/// Bottom bar: launcher entries on the left, open windows on the right.
#[derive(Debug)]
pub struct Dock {
    entries: Vec<DockEntry>,
    area: Rect,
    hits: Vec<(Rect, DockHit)>,
}

impl Dock {
    pub fn new(entries: Vec<DockEntry>) -> Self {
        Self {
            entries,
            area: Rect::default(),
            hits: Vec::new(),
        }
    }

    pub fn with_builtin_apps(extra: Vec<DockEntry>) -> Self {
        let mut entries: Vec<DockEntry> = AppKind::ALL.into_iter().map(DockEntry::app).collect();
        entries.extend(extra);
        Self::new(entries)
    }

    pub fn entries(&self) -> &[DockEntry] {
        &self.entries
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Reserve the dock row at the bottom of `area` and return the rest.
    pub fn split_area(&mut self, area: Rect) -> Rect {
        let height = DOCK_HEIGHT.min(area.height);
        self.area = Rect {
            x: area.x,
            y: area.y + area.height - height,
            width: area.width,
            height,
        };
        Rect {
            height: area.height - height,
            ..area
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<DockHit> {
        self.hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, hit)| hit.clone())
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, theme: &Theme, windows: &[DockWindow]) {
        self.hits.clear();
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().bg(theme.dock_bg()).fg(theme.foreground());
        frame.fill(area, base);

        let max_x = area.x.saturating_add(area.width);
        let y = area.y;
        let mut x = area.x;
        for entry in &self.entries {
            let chunk = format!(" {} ", entry.label);
            let width = chunk.chars().count() as u16;
            if x.saturating_add(width) > max_x {
                break;
            }
            frame.set_string(x, y, &chunk, base.add_modifier(Modifier::BOLD));
            self.hits.push((
                Rect::new(x, y, width, 1),
                DockHit::Entry(entry.action.clone()),
            ));
            x = x.saturating_add(width + 1);
        }

        // Window list, packed against the right edge.
        let mut right = max_x;
        for window in windows.iter().rev() {
            let label = truncate_to_width(&window.title, 16);
            let chunk = format!("[{label}]");
            let width = chunk.chars().count() as u16;
            let Some(start) = right.checked_sub(width) else {
                break;
            };
            if start < x {
                break;
            }
            let style = if window.focused {
                Style::default()
                    .bg(theme.accent())
                    .fg(theme.foreground())
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            frame.set_string(start, y, &chunk, style);
            self.hits
                .push((Rect::new(start, y, width, 1), DockHit::Window(window.id)));
            right = start.saturating_sub(1);
        }
    }
}
