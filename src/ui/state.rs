//! App 状态定义 (Model)
//!
//! 包含应用状态结构体、视图模型及相关枚举

use crate::models::QuestionBank;
use crate::quiz::{Choice, FeedbackTone, Phase, QuizController, QuizRules, QuizView};

/// 控制器渲染指令的落点，视图层从这里读取内容
#[derive(Debug, Default, Clone)]
pub struct Screen {
    pub header: String,
    pub body: String,
    pub feedback: String,
    pub feedback_tone: FeedbackTone,
    pub choices: Vec<Choice>,
    pub time_left: i64,
    pub initials_form: bool,
}

impl QuizView for Screen {
    fn render_header(&mut self, text: &str) {
        self.header = text.to_string();
    }

    fn render_body(&mut self, text: &str) {
        self.body = text.to_string();
    }

    fn render_feedback(&mut self, text: &str, tone: FeedbackTone) {
        self.feedback = text.to_string();
        self.feedback_tone = tone;
    }

    fn render_choices(&mut self, choices: &[Choice]) {
        self.choices = choices.to_vec();
    }

    fn render_timer(&mut self, seconds: i64) {
        self.time_left = seconds;
    }

    fn show_initials_form(&mut self, visible: bool) {
        self.initials_form = visible;
    }
}

/// 应用状态
pub struct App {
    pub quiz: QuizController<Screen>,
    pub selected_index: usize,
    pub input_buffer: String,
    pub message: Option<String>,
}

/// 应用模式，决定按键映射
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Start,
    Question,
    Initials,
    Highscores,
}

impl App {
    /// 创建新的应用实例
    pub fn new(bank: QuestionBank, rules: QuizRules) -> Self {
        Self {
            quiz: QuizController::new(bank, rules, Screen::default()),
            selected_index: 0,
            input_buffer: String::new(),
            message: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        self.quiz.view()
    }

    pub fn choices(&self) -> &[Choice] {
        &self.screen().choices
    }

    pub fn mode(&self) -> AppMode {
        match self.quiz.phase() {
            Phase::Start => AppMode::Start,
            Phase::InQuiz => AppMode::Question,
            Phase::AwaitingInitials { .. } => AppMode::Initials,
            Phase::ViewingHighscores { .. } => AppMode::Highscores,
        }
    }

    /// 确保选中索引有效
    pub fn clamp_selection(&mut self) {
        let len = self.choices().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }
}
