//! Minimal terminal host for step-by-step interactive models.
//! A model consumes one key at a time and returns its next state; the host
//! only draws the model's view and feeds it keys until it asks to quit.

use crate::error::{Error, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};

/// Discrete input events understood by interactive models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Backspace,
    Esc,
    /// ctrl+c, accepted as cancellation everywhere.
    Interrupt,
    Char(char),
}

impl Key {
    /// Maps a crossterm key press to a model event; other keys are dropped.
    pub fn from_event(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Key::Interrupt)
            }
            KeyCode::Char(c) => Some(Key::Char(c)),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Esc => Some(Key::Esc),
            _ => None,
        }
    }
}

/// Result of feeding one event to a model.
#[derive(Debug)]
pub enum Update<M> {
    /// Keep going with the new state.
    Continue(M),
    /// The model reached a terminal state.
    Quit(M),
}

/// A component that can initialize, consume an input event producing its
/// next state, and render its current state as text.
pub trait Model: Sized {
    type Event;

    fn init(self) -> Self;
    fn update(self, event: Self::Event) -> Update<Self>;
    fn view(&self) -> String;
}

/// Feeds `events` to an initialized model until it quits or the events run out.
pub fn drive<M, I>(model: M, events: I) -> M
where
    M: Model,
    I: IntoIterator<Item = M::Event>,
{
    let mut model = model.init();
    for event in events {
        match model.update(event) {
            Update::Continue(next) => model = next,
            Update::Quit(last) => return last,
        }
    }
    model
}

/// Raw mode held for as long as the guard lives.
struct RawMode {
    restore: fn() -> io::Result<()>,
}

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { restore: disable_raw_mode })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = (self.restore)();
    }
}

struct TerminalSession<W: Write> {
    out: W,
    // Dropped after the screen is restored.
    _raw: RawMode,
}

impl TerminalSession<Stdout> {
    fn new() -> io::Result<Self> {
        let raw = RawMode::enable()?;
        Self::start(io::stdout(), raw)
    }
}

impl<W: Write> TerminalSession<W> {
    /// Switches `out` to the alternate screen. On failure `raw` is dropped,
    /// which leaves raw mode again.
    fn start(mut out: W, raw: RawMode) -> io::Result<Self> {
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out, _raw: raw })
    }

    fn draw(&mut self, view: &str) -> io::Result<()> {
        // Raw mode does not translate "\n" into a carriage return.
        let text = view.replace('\n', "\r\n");
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0), Print(text))?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
    }
}

fn terminal_error(e: io::Error) -> Error {
    Error::PromptError(e.to_string())
}

/// Runs a model against the real terminal, blocking on each key press.
pub fn run_in_terminal<M: Model<Event = Key>>(model: M) -> Result<M> {
    let mut session = TerminalSession::new().map_err(terminal_error)?;
    let mut model = model.init();

    loop {
        session.draw(&model.view()).map_err(terminal_error)?;

        let key = match event::read().map_err(terminal_error)? {
            Event::Key(key) => Key::from_event(key),
            _ => None,
        };
        let Some(key) = key else { continue };

        match model.update(key) {
            Update::Continue(next) => model = next,
            Update::Quit(last) => return Ok(last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Counter(i32);

    impl Model for Counter {
        type Event = Key;

        fn init(self) -> Self {
            Counter(self.0 * 10)
        }

        fn update(self, event: Key) -> Update<Self> {
            match event {
                Key::Up => Update::Continue(Counter(self.0 + 1)),
                Key::Down => Update::Continue(Counter(self.0 - 1)),
                _ => Update::Quit(self),
            }
        }

        fn view(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_drive_stops_at_quit() {
        let model = drive(Counter(1), [Key::Up, Key::Up, Key::Enter, Key::Up]);
        assert_eq!(model.view(), "12");
    }

    #[test]
    fn test_drive_runs_out_of_events() {
        let model = drive(Counter(0), [Key::Down]);
        assert_eq!(model.0, -1);
    }

    struct BrokenTerminal;

    impl Write for BrokenTerminal {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_raw_mode_is_left_when_screen_setup_fails() {
        use std::sync::atomic::{AtomicBool, Ordering};

        static RESTORED: AtomicBool = AtomicBool::new(false);
        fn restore() -> io::Result<()> {
            RESTORED.store(true, Ordering::SeqCst);
            Ok(())
        }

        let raw = RawMode { restore };
        assert!(TerminalSession::start(BrokenTerminal, raw).is_err());
        assert!(RESTORED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_key_from_event() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(ctrl_c), Some(Key::Interrupt));

        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(Key::from_event(plain_c), Some(Key::Char('c')));

        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(Key::from_event(tab), None);
    }
}
