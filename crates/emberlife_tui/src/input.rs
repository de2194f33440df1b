use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use emberlife_core::io::InputSource;
use emberlife_data::Button;

/// Maps keys to the two panel buttons.
///
/// `b`, `r` and space reseed; `x`, `q`, Esc and Ctrl+C halt. Key presses are
/// latched between polls so a tap during a sting is not lost.
#[derive(Debug, Default)]
pub struct KeyboardInput {
    reseed: bool,
    halt: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button_for(key: &KeyEvent) -> Option<Button> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Button::Halt)
            }
            KeyCode::Char('b') | KeyCode::Char('r') | KeyCode::Char(' ') => Some(Button::Reseed),
            KeyCode::Char('x') | KeyCode::Char('q') | KeyCode::Esc => Some(Button::Halt),
            _ => None,
        }
    }

    fn latch(&mut self, button: Button) {
        match button {
            Button::Reseed => self.reseed = true,
            Button::Halt => self.halt = true,
        }
    }

    fn drain_events(&mut self) {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    tracing::warn!("Input poll failed: {e}");
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(button) = Self::button_for(&key) {
                        self.latch(button);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Input read failed: {e}");
                    break;
                }
            }
        }
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self, button: Button) -> bool {
        self.drain_events();
        let slot = match button {
            Button::Reseed => &mut self.reseed,
            Button::Halt => &mut self.halt,
        };
        std::mem::take(slot)
    }
}
