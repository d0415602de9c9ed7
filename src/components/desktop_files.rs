use std::path::{Path, PathBuf};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState};

use crate::desktop::items::{DesktopItem, ItemKind, list_items};
use crate::ui::UiFrame;

use super::{Component, ComponentContext};

/// Scrollable listing of the desktop directory.
pub struct DesktopFilesComponent {
    dir: PathBuf,
    items: Vec<(String, DesktopItem)>,
    selected: usize,
    offset: usize,
    error: Option<String>,
}

impl DesktopFilesComponent {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut component = Self {
            dir: dir.into(),
            items: Vec::new(),
            selected: 0,
            offset: 0,
            error: None,
        };
        component.refresh();
        component
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Re-read the directory. A read failure is shown in place of the list.
    pub fn refresh(&mut self) {
        match list_items(&self.dir) {
            Ok(items) => {
                self.items = items.into_iter().collect();
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "desktop listing failed");
                self.items.clear();
                self.error = Some(err.to_string());
            }
        }
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &DesktopItem> {
        self.items.iter().map(|(_, item)| item)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&DesktopItem> {
        self.items.get(self.selected).map(|(_, item)| item)
    }

    fn bump_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.items.len() - 1);
        }
    }

    fn keep_selected_in_view(&mut self, view: usize) {
        if view == 0 || self.items.is_empty() {
            self.offset = 0;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + view {
            self.offset = self.selected + 1 - view;
        }
    }

    fn label(item: &DesktopItem) -> String {
        let marker = match item.kind {
            ItemKind::File => ' ',
            ItemKind::Directory => '/',
            ItemKind::Unknown => '?',
        };
        format!("{marker} {}", item.display_name)
    }
}

impl Component for DesktopFilesComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if let Some(error) = &self.error {
            frame.set_string(area.x, area.y, error, Style::default());
            return;
        }
        if self.items.is_empty() {
            frame.set_string(area.x, area.y, "(empty)", Style::default());
            return;
        }
        let view = area.height as usize;
        self.keep_selected_in_view(view);
        let rows = self
            .items
            .iter()
            .skip(self.offset)
            .take(view)
            .map(|(_, item)| ListItem::new(Self::label(item)))
            .collect::<Vec<_>>();
        let mut state = ListState::default();
        state.select(Some(self.selected - self.offset));
        let list =
            List::new(rows).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.bump_selection(-1);
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.bump_selection(1);
                    true
                }
                KeyCode::Home => {
                    self.selected = 0;
                    true
                }
                KeyCode::End => {
                    self.selected = self.items.len().saturating_sub(1);
                    true
                }
                KeyCode::F(5) | KeyCode::Char('r') => {
                    self.refresh();
                    true
                }
                _ => false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    let row = self.offset + mouse.row as usize;
                    if row < self.items.len() {
                        self.selected = row;
                    }
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.bump_selection(1);
                    true
                }
                MouseEventKind::ScrollUp => {
                    self.bump_selection(-1);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}
