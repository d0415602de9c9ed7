use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded message pump: the only place that polls the input driver.
///
/// The handler is called with `None` once per iteration before polling
/// (drawing and request draining happen there), then with `Some(event)` for
/// every queued event. Bursts such as mouse drags are drained in one go so
/// rendering does not fall behind the input stream.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::testing::ScriptedDriver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn drains_burst_and_stops_on_quit() {
        let driver = ScriptedDriver::new([key('a'), key('b'), key('q'), key('z')]);
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        let mut seen = Vec::new();
        let mut ticks = 0;
        event_loop
            .run(|_, event| {
                let Some(Event::Key(k)) = event else {
                    ticks += 1;
                    return Ok(ControlFlow::Continue);
                };
                let KeyCode::Char(c) = k.code else {
                    return Ok(ControlFlow::Continue);
                };
                seen.push(c);
                Ok(if c == 'q' {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(seen, vec!['a', 'b', 'q']);
        assert_eq!(ticks, 1);
        assert_eq!(event_loop.driver().events.len(), 1);
    }

    #[test]
    fn idle_tick_can_quit() {
        let mut event_loop = EventLoop::new(ScriptedDriver::default(), Duration::from_millis(0));
        let mut ticks = 0;
        event_loop
            .run(|_, _| {
                ticks += 1;
                Ok(if ticks == 3 {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(ticks, 3);
    }
}
