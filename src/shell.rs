//! Top-level runtime: key bindings, request handling and the draw loop.

use std::io;
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};

use crate::apps::AppEnv;
use crate::config::ShellConfig;
use crate::desktop::dock::Dock;
use crate::desktop::{Desktop, DesktopOptions, ShellRequest};
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::{Action, KeyBindings};
use crate::launcher;
use crate::theme::Theme;

pub struct Shell {
    desktop: Desktop,
    keybindings: KeyBindings,
    requests: Receiver<ShellRequest>,
}

impl Shell {
    pub fn new(config: &ShellConfig) -> Self {
        let (tx, rx) = channel();
        let dock = Dock::with_builtin_apps(config.launch_entries.clone());
        let options = DesktopOptions {
            edge_margin: config.edge_margin,
            size_policy: config.size_policy,
        };
        let env = AppEnv::new(&config.assets_dir, &config.desktop_dir);
        let mut desktop = Desktop::new(Theme::default(), options, env, dock, tx);
        if let Err(err) = desktop.load_icons() {
            tracing::warn!(error = %err, "desktop icons unavailable");
        }
        desktop.subscribe(Box::new(|id, signal| {
            tracing::debug!(window = %id, %signal, "signal delivered");
        }));
        Self {
            desktop,
            keybindings: KeyBindings::default(),
            requests: rx,
        }
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut Desktop {
        &mut self.desktop
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Release {
                return ControlFlow::Continue;
            }
            if let Some(action) = self.keybindings.action_for_key(key) {
                return self.perform(action);
            }
        }
        self.desktop.handle_event(event);
        ControlFlow::Continue
    }

    fn perform(&mut self, action: Action) -> ControlFlow {
        tracing::debug!(%action, "key binding");
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::CloseWindow => {
                self.desktop.close_focused();
            }
            Action::RestartWindow => {
                self.desktop.restart_focused();
            }
            Action::CycleWindow => {
                self.desktop.cycle_focus();
            }
            Action::OpenApp(kind) => {
                self.desktop.open_app(kind);
            }
        }
        ControlFlow::Continue
    }

    /// Act on everything queued by the dock and restart callbacks.
    pub fn drain_requests(&mut self) {
        while let Ok(request) = self.requests.try_recv() {
            match request {
                ShellRequest::Open(kind) => {
                    self.desktop.open_app(kind);
                }
                ShellRequest::Launch(command) => {
                    if let Err(err) = launcher::launch(&command) {
                        tracing::warn!(error = %err, "launch failed");
                    }
                }
            }
        }
    }

    pub fn run<D, O>(&mut self, driver: D, output: &mut O, poll: Duration) -> io::Result<()>
    where
        D: InputDriver,
        O: OutputDriver,
    {
        let mut event_loop = EventLoop::new(driver, poll);
        event_loop.driver().set_mouse_capture(true)?;
        tracing::info!("shell started");
        event_loop.run(|_driver, event| {
            let Some(event) = event else {
                self.drain_requests();
                if self.desktop.needs_repaint() {
                    output.draw(|mut frame| self.desktop.render(&mut frame))?;
                }
                return Ok(ControlFlow::Continue);
            };
            let flow = self.handle_event(&event);
            if flow == ControlFlow::Quit {
                tracing::info!("shell quitting");
            }
            Ok(flow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::AppKind;
    use crate::drivers::testing::ScriptedDriver;
    use crate::ui::UiFrame;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    #[derive(Default)]
    struct BufferOutput {
        frames: usize,
        last: Option<Buffer>,
    }

    impl OutputDriver for BufferOutput {
        fn enter(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn exit(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn draw<F>(&mut self, f: F) -> io::Result<()>
        where
            F: FnOnce(UiFrame<'_>),
        {
            let area = Rect::new(0, 0, 100, 30);
            let mut buffer = Buffer::empty(area);
            f(UiFrame::from_parts(area, &mut buffer));
            self.frames += 1;
            self.last = Some(buffer);
            Ok(())
        }
    }

    fn config(dir: &std::path::Path) -> ShellConfig {
        let cli = <crate::config::ShellCli as clap::Parser>::parse_from([
            "simplifyc-shell",
            "--desktop-dir",
            dir.to_str().unwrap(),
        ]);
        ShellConfig::try_from(&cli).unwrap()
    }

    fn key(code: KeyCode, mods: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, mods))
    }

    #[test]
    fn bindings_open_close_and_quit() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = Shell::new(&config(dir.path()));
        shell.handle_event(&key(KeyCode::F(1), KeyModifiers::NONE));
        assert_eq!(shell.desktop().windows().len(), 1);
        assert_eq!(shell.desktop().windows()[0].title(), AppKind::Calculator.title());
        shell.handle_event(&key(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert!(shell.desktop().windows().is_empty());
        assert_eq!(
            shell.handle_event(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            ControlFlow::Quit
        );
    }

    #[test]
    fn restart_reopens_through_request_queue() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = Shell::new(&config(dir.path()));
        shell.handle_event(&key(KeyCode::F(2), KeyModifiers::NONE));
        let first = shell.desktop().windows()[0].id();
        shell.handle_event(&key(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(shell.desktop().windows().is_empty());
        shell.drain_requests();
        let windows = shell.desktop().windows();
        assert_eq!(windows.len(), 1);
        assert_ne!(windows[0].id(), first);
        assert_eq!(windows[0].title(), AppKind::TextEdit.title());
    }

    #[test]
    fn run_draws_and_quits() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt.os"), b"").unwrap();
        let mut shell = Shell::new(&config(dir.path()));
        let driver = ScriptedDriver::new([
            key(KeyCode::F(3), KeyModifiers::NONE),
            key(KeyCode::Char('q'), KeyModifiers::CONTROL),
        ]);
        let mut output = BufferOutput::default();
        shell
            .run(driver, &mut output, Duration::from_millis(0))
            .unwrap();
        assert_eq!(output.frames, 1);
        let buffer = output.last.unwrap();
        let row: String = (1..10)
            .map(|x| buffer.cell((x, 1)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(row, "notes.txt");
        assert_eq!(shell.desktop().icons().len(), 1);
    }
}
