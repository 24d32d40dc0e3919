//! 测验状态机
//!
//! Start → InQuiz → AwaitingInitials → Start，高分榜可以从任意界面进入，
//! 返回时回到进入前的界面。

use std::time::{Duration, Instant};

use super::events::QuizEvent;
use super::timer::CountdownTimer;
use super::view::{Choice, ChoiceKind, FeedbackTone, QuizView};
use crate::config::Settings;
use crate::models::{HighscoreEntry, Highscores, Question, QuestionBank, START_LABEL};

pub const START_BODY: &str = "Press start below to begin your quiz!";
pub const RESULT_BODY: &str = "Enter your initials below to save your score!";
pub const HIGHSCORES_HEADER: &str = "Highscores:";
pub const CLEAR_LABEL: &str = "Clear highscores";
pub const BACK_LABEL: &str = "Go back to quiz";
pub const CORRECT_FEEDBACK: &str = "Correct! Keep it up!";

/// 一轮测验的规则
#[derive(Debug, Clone)]
pub struct QuizRules {
    pub time_limit: i64,
    pub penalty: i64,
    pub title: String,
    pub tick: Duration,
}

impl Default for QuizRules {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for QuizRules {
    fn from(settings: &Settings) -> Self {
        Self {
            time_limit: settings.time_limit,
            penalty: settings.wrong_answer_penalty,
            title: settings.title.clone(),
            tick: settings.tick_interval(),
        }
    }
}

/// 当前界面
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Start,
    InQuiz,
    AwaitingInitials { percentage: f64 },
    ViewingHighscores { returns_to: ReturnTo },
}

/// 高分榜关闭后回到的界面
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReturnTo {
    Start,
    Question,
    Result { percentage: f64 },
}

pub struct QuizController<V: QuizView> {
    bank: QuestionBank,
    rules: QuizRules,
    view: V,
    phase: Phase,
    current: usize,
    score: u32,
    time_remaining: i64,
    highscores: Highscores,
    timer: CountdownTimer,
}

impl<V: QuizView> QuizController<V> {
    /// 创建控制器并渲染开始界面
    pub fn new(bank: QuestionBank, rules: QuizRules, view: V) -> Self {
        let timer = CountdownTimer::new(rules.tick);
        let mut controller = Self {
            bank,
            time_remaining: rules.time_limit,
            rules,
            view,
            phase: Phase::Start,
            current: 0,
            score: 0,
            highscores: Highscores::new(),
            timer,
        };
        controller.return_to_start();
        controller
    }

    // ============ 事件分发 ============

    pub fn handle(&mut self, event: QuizEvent) {
        tracing::debug!(?event, phase = ?self.phase, "处理事件");
        match event {
            QuizEvent::ChoiceClicked(index) => self.select_choice(index),
            QuizEvent::StartClicked => self.start(),
            QuizEvent::BackClicked => self.go_back(),
            QuizEvent::ClearClicked => self.clear_scores(),
            QuizEvent::InitialsSubmitted(initials) => self.submit_initials(initials),
            QuizEvent::ViewHighscoresClicked => self.display_scores(),
            QuizEvent::Tick => self.tick(),
        }
    }

    // ============ 状态转换 ============

    /// 开始测验：启动计时并进入第一题
    pub fn start(&mut self) {
        if self.phase != Phase::Start || self.current != 0 {
            tracing::debug!(phase = ?self.phase, "忽略开始：不在开始界面");
            return;
        }
        self.timer.arm(Instant::now());
        tracing::info!(
            time_limit = self.time_remaining,
            generation = self.timer.generation(),
            "测验开始"
        );
        self.advance();
    }

    /// 选择答案
    pub fn select_choice(&mut self, index: usize) {
        if !matches!(self.phase, Phase::Start | Phase::InQuiz) {
            tracing::debug!(phase = ?self.phase, index, "忽略选择：当前没有题目");
            return;
        }
        let Some(question) = self.bank.get(self.current) else {
            return;
        };
        if index >= question.choices.len() {
            tracing::warn!(index, choices = question.choices.len(), "选项序号越界");
            return;
        }

        if self.current != 0 {
            if question.is_correct(index) {
                self.score += 1;
                self.view
                    .render_feedback(CORRECT_FEEDBACK, FeedbackTone::Positive);
            } else {
                self.time_remaining -= self.rules.penalty;
                let text = format!(
                    "Incorrect! {} seconds lost in time!",
                    self.rules.penalty
                );
                self.view.render_feedback(&text, FeedbackTone::Negative);
            }
            tracing::debug!(
                question = self.current,
                index,
                score = self.score,
                time_remaining = self.time_remaining,
                "已作答"
            );
        }

        self.advance();
    }

    /// 前进到下一题，最后一题之后结束测验
    ///
    /// 反馈文本在题目之间保留，只有结束和回到开始时清除。
    pub fn advance(&mut self) {
        if self.current == self.bank.last_index() {
            self.finish();
            return;
        }
        self.current += 1;
        self.phase = Phase::InQuiz;
        self.render_question();
    }

    /// 结束测验：停止计时，显示成绩和姓名缩写表单
    pub fn finish(&mut self) {
        self.timer.cancel();
        let percentage = self.bank.percentage(self.score);
        tracing::info!(
            score = self.score,
            percentage,
            time_remaining = self.time_remaining,
            "测验结束"
        );
        self.render_result(percentage);
    }

    /// 保存高分记录；姓名缩写原样接受，包括空字符串
    pub fn submit_initials(&mut self, initials: String) {
        let Phase::AwaitingInitials { percentage } = self.phase else {
            tracing::debug!(phase = ?self.phase, "忽略提交：不在成绩界面");
            return;
        };
        tracing::info!(initials = %initials, percentage, "记录高分");
        self.highscores.push(HighscoreEntry::new(initials, percentage));
        self.view.show_initials_form(false);
        self.return_to_start();
    }

    /// 重置状态并回到开始界面，高分榜保留
    pub fn return_to_start(&mut self) {
        self.timer.cancel();
        self.score = 0;
        self.time_remaining = self.rules.time_limit;
        self.current = 0;
        self.phase = Phase::Start;

        self.view.render_timer(self.time_remaining);
        self.view.render_header(&self.rules.title);
        self.view.render_body(START_BODY);
        self.view.clear_feedback();
        self.view
            .render_choices(&[Choice::new(START_LABEL, ChoiceKind::Start)]);
    }

    /// 显示高分榜
    pub fn display_scores(&mut self) {
        let returns_to = match self.phase {
            Phase::Start => ReturnTo::Start,
            Phase::InQuiz => ReturnTo::Question,
            Phase::AwaitingInitials { percentage } => {
                self.view.show_initials_form(false);
                ReturnTo::Result { percentage }
            }
            Phase::ViewingHighscores { returns_to } => returns_to,
        };
        self.phase = Phase::ViewingHighscores { returns_to };
        self.render_highscores();
    }

    pub fn clear_scores(&mut self) {
        if !matches!(self.phase, Phase::ViewingHighscores { .. }) {
            return;
        }
        tracing::info!(cleared = self.highscores.len(), "清空高分榜");
        self.highscores.clear();
        self.render_highscores();
    }

    /// 离开高分榜；测验进行中时不影响得分和计时
    pub fn go_back(&mut self) {
        let Phase::ViewingHighscores { returns_to } = self.phase else {
            return;
        };
        if self.current == 0 {
            self.return_to_start();
            return;
        }
        match returns_to {
            ReturnTo::Result { percentage } => self.render_result(percentage),
            ReturnTo::Start | ReturnTo::Question => {
                self.phase = Phase::InQuiz;
                self.render_question();
            }
        }
    }

    // ============ 计时 ============

    /// 一次计时跳动；没有活动计时器时丢弃
    pub fn tick(&mut self) {
        if !self.timer.is_armed() {
            tracing::trace!("丢弃过期的计时跳动");
            return;
        }
        if self.time_remaining <= 0 {
            tracing::info!("时间到");
            self.finish();
            return;
        }
        self.time_remaining -= 1;
        tracing::trace!(time_remaining = self.time_remaining, "计时");
        self.view.render_timer(self.time_remaining);
    }

    /// 触发所有已到期的计时跳动
    pub fn poll_timer(&mut self, now: Instant) {
        let due = self.timer.take_due(now);
        for _ in 0..due {
            if !self.timer.is_armed() {
                break;
            }
            self.handle(QuizEvent::Tick);
        }
    }

    /// 距离下一次计时跳动的时间
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    // ============ 渲染 ============

    fn render_question(&mut self) {
        let Some(question) = self.bank.get(self.current) else {
            return;
        };
        let choices: Vec<Choice> = question
            .choices
            .iter()
            .map(|label| Choice::new(label.as_str(), ChoiceKind::Normal))
            .collect();
        self.view
            .render_header(&format!("Question {}", self.current));
        self.view.render_body(&question.text);
        self.view.render_choices(&choices);
    }

    fn render_result(&mut self, percentage: f64) {
        self.phase = Phase::AwaitingInitials { percentage };
        self.view.render_header(&format!(
            "You finished with a score of {:.2}%",
            percentage
        ));
        self.view.render_body(RESULT_BODY);
        self.view.render_choices(&[]);
        self.view.clear_feedback();
        self.view.show_initials_form(true);
    }

    fn render_highscores(&mut self) {
        let body = self
            .highscores
            .ranked()
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.ranked_line(i + 1))
            .collect::<Vec<_>>()
            .join("\n");

        self.view.render_header(HIGHSCORES_HEADER);
        self.view.render_body(&body);
        self.view.clear_feedback();
        self.view.render_choices(&[
            Choice::new(CLEAR_LABEL, ChoiceKind::Clear),
            Choice::new(BACK_LABEL, ChoiceKind::Back),
        ]);
    }

    // ============ 查询 ============

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> i64 {
        self.time_remaining
    }

    #[allow(dead_code)]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[allow(dead_code)]
    pub fn current_question(&self) -> Option<&Question> {
        self.bank.get(self.current)
    }

    pub fn highscores(&self) -> &Highscores {
        &self.highscores
    }

    #[allow(dead_code)]
    pub fn timer_running(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    #[allow(dead_code)]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
