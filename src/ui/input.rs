//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::io;

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Initials => match key {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Highscores => match key {
            KeyCode::Char('c') => Some(Action::ClearHighscores),
            KeyCode::Char('b') | KeyCode::Esc => Some(Action::GoBack),
            _ => navigation(key),
        },
        AppMode::Start | AppMode::Question => navigation(key),
    }
}

fn navigation(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
        KeyCode::Char('h') => Some(Action::ViewHighscores),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|d| Action::Pick(d as usize - 1)),
        _ => None,
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(app.mode(), key) {
        Ok(app.dispatch(action))
    } else {
        Ok(false)
    }
}
