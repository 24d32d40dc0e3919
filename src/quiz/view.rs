//! 控制器与表现层之间的渲染契约

/// 选项按钮的种类，决定点击后投递哪种事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    Normal,
    Start,
    Back,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub kind: ChoiceKind,
}

impl Choice {
    pub fn new(label: impl Into<String>, kind: ChoiceKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

/// 反馈文本的语气
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackTone {
    #[default]
    Neutral,
    Positive,
    Negative,
}

/// 表现层
///
/// 每次调用都是覆盖而非追加。
pub trait QuizView {
    fn render_header(&mut self, text: &str);
    fn render_body(&mut self, text: &str);
    fn render_feedback(&mut self, text: &str, tone: FeedbackTone);
    fn render_choices(&mut self, choices: &[Choice]);
    fn render_timer(&mut self, seconds: i64);
    fn show_initials_form(&mut self, visible: bool);

    fn clear_feedback(&mut self) {
        self.render_feedback("", FeedbackTone::Neutral);
    }
}
