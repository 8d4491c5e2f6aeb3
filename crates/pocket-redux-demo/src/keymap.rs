//! Key bindings - translate key presses into demo commands

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the demo to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleSwitch,
    VanillaIncrease,
    VanillaDecrease,
    CounterIncrease,
    CounterDecrease,
    TodoInsert,
    TodoToggle,
    TodoRemove,
    TodoNext,
    TodoPrevious,
    AsyncIncrease,
    AsyncDecrease,
    ClearLog,
}

pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('l') => Some(Command::ClearLog),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('t') => Command::ToggleSwitch,
        KeyCode::Char('+') => Command::VanillaIncrease,
        KeyCode::Char('-') => Command::VanillaDecrease,
        KeyCode::Char('u') => Command::CounterIncrease,
        KeyCode::Char('d') => Command::CounterDecrease,
        KeyCode::Char('n') => Command::TodoInsert,
        KeyCode::Char(' ') | KeyCode::Enter => Command::TodoToggle,
        KeyCode::Char('x') | KeyCode::Delete => Command::TodoRemove,
        KeyCode::Char('j') | KeyCode::Down => Command::TodoNext,
        KeyCode::Char('k') | KeyCode::Up => Command::TodoPrevious,
        KeyCode::Char('a') => Command::AsyncIncrease,
        KeyCode::Char('z') => Command::AsyncDecrease,
        _ => return None,
    };
    Some(command)
}
