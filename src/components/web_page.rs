use std::path::{Path, PathBuf};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::error::{Result, ShellError};
use crate::ui::{UiFrame, truncate_to_width};

use super::{Component, ComponentContext};

const OPEN_LABEL: &str = "[ Open in browser ]";

/// Opens a page in the system browser. Tests swap in a recorder.
pub type BrowserFn = Box<dyn FnMut(&Path) -> std::io::Result<()>>;

/// Stand-in for an embedded web view: shows the bundled page and hands it to
/// the system browser on Enter or a click on the button.
pub struct WebPageComponent {
    title: String,
    path: PathBuf,
    browser: BrowserFn,
    status: Option<String>,
}

impl WebPageComponent {
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::with_browser(
            title,
            path,
            Box::new(|path: &Path| webbrowser::open(&path.to_string_lossy())),
        )
    }

    pub fn with_browser(
        title: impl Into<String>,
        path: impl Into<PathBuf>,
        browser: BrowserFn,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            browser,
            status: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn open(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Err(ShellError::Browser {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "page not found"),
            });
        }
        (self.browser)(&self.path).map_err(|source| ShellError::Browser {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(page = %self.path.display(), "opened page in browser");
        Ok(())
    }

    fn open_and_report(&mut self) {
        self.status = Some(match self.open() {
            Ok(()) => "Opened.".to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "browser launch failed");
                err.to_string()
            }
        });
    }
}

impl Component for WebPageComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        frame.set_string(area.x, area.y, &truncate_to_width(&self.title, width), bold);
        let lines = [
            (2, self.path.display().to_string(), Style::default()),
            (
                4,
                OPEN_LABEL.to_string(),
                if ctx.focused() {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                },
            ),
        ];
        for (dy, text, style) in lines {
            if dy < area.height {
                frame.set_string(area.x, area.y + dy, &truncate_to_width(&text, width), style);
            }
        }
        if let Some(status) = &self.status
            && area.height > 6
        {
            frame.set_string(
                area.x,
                area.y + 6,
                &truncate_to_width(status, width),
                Style::default(),
            );
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release && key.code == KeyCode::Enter => {
                self.open_and_report();
                true
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let on_button =
                    mouse.row == 4 && (mouse.column as usize) < OPEN_LABEL.chars().count();
                if on_button {
                    self.open_and_report();
                }
                on_button
            }
            _ => false,
        }
    }
}
