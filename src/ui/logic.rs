//! 业务逻辑处理 (Update/Dispatch)
//!
//! 把 Action 翻译成控制器事件

use std::time::Instant;

use super::actions::Action;
use super::state::{App, AppMode};
use crate::quiz::{ChoiceKind, QuizEvent};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::Pick(index) => {
                if index < self.choices().len() {
                    self.selected_index = index;
                    self.activate_selected();
                }
            }

            Action::Submit => match self.mode() {
                AppMode::Initials => self.submit_initials(),
                _ => self.activate_selected(),
            },

            Action::ViewHighscores => {
                self.message = None;
                self.send(QuizEvent::ViewHighscoresClicked);
            }
            Action::ClearHighscores => {
                self.send(QuizEvent::ClearClicked);
                self.message = Some("高分榜已清空".to_string());
            }
            Action::GoBack => {
                self.message = None;
                self.send(QuizEvent::BackClicked);
            }

            Action::Input(c) => {
                if self.mode() == AppMode::Initials {
                    self.input_buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if self.mode() == AppMode::Initials {
                    self.input_buffer.pop();
                }
            }

            Action::Tick => self.on_tick(Instant::now()),
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.choices().len() {
            self.selected_index += 1;
        }
    }

    // ============ 选项相关 ============

    /// 按选项种类投递对应事件
    pub fn activate_selected(&mut self) {
        let Some(kind) = self.choices().get(self.selected_index).map(|c| c.kind) else {
            return;
        };
        self.message = None;
        let event = match kind {
            ChoiceKind::Normal => QuizEvent::ChoiceClicked(self.selected_index),
            ChoiceKind::Start => QuizEvent::StartClicked,
            ChoiceKind::Back => QuizEvent::BackClicked,
            ChoiceKind::Clear => {
                self.message = Some("高分榜已清空".to_string());
                QuizEvent::ClearClicked
            }
        };
        self.send(event);
    }

    /// 提交姓名缩写
    pub fn submit_initials(&mut self) {
        let initials = std::mem::take(&mut self.input_buffer);
        self.message = Some(format!("已记录 {}", initials));
        self.send(QuizEvent::InitialsSubmitted(initials));
    }

    // ============ 计时相关 ============

    pub fn on_tick(&mut self, now: Instant) {
        let before = self.quiz.phase();
        self.quiz.poll_timer(now);
        if self.quiz.phase() != before {
            self.message = Some("时间到！".to_string());
            self.selected_index = 0;
        }
        self.clamp_selection();
    }

    /// 投递事件后重置选中项
    fn send(&mut self, event: QuizEvent) {
        self.quiz.handle(event);
        self.selected_index = 0;
        self.clamp_selection();
    }
}
