use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};

/// 开始页的伪题目文本
pub const START_PROMPT_TEXT: &str = "Press the button below to start your quiz!";
pub const START_LABEL: &str = "Start Quiz";

/// 单道选择题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub choices: Vec<String>,
    pub correct: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, choices: &[&str], correct: usize) -> Self {
        Self {
            text: text.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct,
        }
    }

    /// 开始页伪题目，只用于进入测验，不计分
    pub fn start_prompt() -> Self {
        Self::new(START_PROMPT_TEXT, &[START_LABEL], 0)
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        self.correct == choice
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.choices.is_empty() {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: "没有选项".to_string(),
            });
        }
        if self.correct >= self.choices.len() {
            return Err(QuizError::InvalidQuestion {
                index,
                reason: format!(
                    "正确答案序号 {} 超出选项数量 {}",
                    self.correct,
                    self.choices.len()
                ),
            });
        }
        Ok(())
    }
}

/// 题库：下标 0 永远是开始页伪题目
///
/// 只能通过 [`QuestionBank::new`] 或 [`QuestionBank::builtin`] 构造，
/// 因此至少有一道计分题，所有正确答案序号都在范围内。
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// 由计分题构造题库，自动在前面插入开始页
    pub fn new(scoring: Vec<Question>) -> Result<Self> {
        if scoring.is_empty() {
            return Err(QuizError::EmptyBank);
        }
        for (i, question) in scoring.iter().enumerate() {
            // 对外报告的序号从 1 开始，与 "Question N" 一致
            question.validate(i + 1)?;
        }

        let mut questions = Vec::with_capacity(scoring.len() + 1);
        questions.push(Question::start_prompt());
        questions.extend(scoring);
        Ok(Self { questions })
    }

    /// 内置的 JavaScript 题库
    pub fn builtin() -> Self {
        let scoring = vec![
            Question::new(
                "Inside which HTML element do we put the JavaScript?",
                &["<scripting>", "<javascript>", "<script>", "<js>"],
                2,
            ),
            Question::new(
                "How do you write \"Hello World\" in an alert box?",
                &[
                    "alert(\"Hello World\");",
                    "alertBox(\"Hello World\");",
                    "msgBox(\"Hello World\");",
                    "msg(\"Hello World\");",
                ],
                0,
            ),
            Question::new(
                "Which of the following is a correct function declaration?",
                &[
                    "function = myFunction()",
                    "function:myFunction()",
                    "function myFunction()",
                ],
                2,
            ),
            Question::new(
                "Which is correct syntax for starting a FOR loop?",
                &[
                    "for i = 1 to 5",
                    "for (i = 0; i <= 5)",
                    "for (i = 0; i <= 5; i++)",
                    "for (i <= 5; i++)",
                ],
                2,
            ),
            Question::new(
                "How do you add a comment to JavaScript code?",
                &[
                    "\"This is a comment\"",
                    "<!-- This is a comment -->",
                    "// This is a comment",
                    "!! This is a comment !!",
                ],
                2,
            ),
        ];

        Self {
            questions: std::iter::once(Question::start_prompt())
                .chain(scoring)
                .collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// 题目总数（含开始页）
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// 计分题数量
    pub fn scoring_len(&self) -> usize {
        self.questions.len() - 1
    }

    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// 得分百分比，保留两位小数
    pub fn percentage(&self, score: u32) -> f64 {
        let raw = f64::from(score) / self.scoring_len() as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    }
}

/// 高分记录
#[derive(Debug, Clone, PartialEq)]
pub struct HighscoreEntry {
    pub initials: String,
    pub percentage: f64,
    pub recorded_at: DateTime<Local>,
}

impl HighscoreEntry {
    pub fn new(initials: String, percentage: f64) -> Self {
        Self {
            initials,
            percentage,
            recorded_at: Local::now(),
        }
    }

    /// 高分榜中的一行，例如 `1. AB - 100.00`
    pub fn ranked_line(&self, rank: usize) -> String {
        format!("{}. {} - {:.2}", rank, self.initials, self.percentage)
    }
}

/// 高分榜，按插入顺序保存
#[derive(Debug, Clone, Default)]
pub struct Highscores {
    entries: Vec<HighscoreEntry>,
}

impl Highscores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HighscoreEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按百分比降序排列；`sort_by` 是稳定排序，同分保持插入顺序
    pub fn ranked(&self) -> Vec<&HighscoreEntry> {
        let mut sorted: Vec<&HighscoreEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_shape() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 6);
        assert_eq!(bank.scoring_len(), 5);
        assert_eq!(bank.get(0).unwrap().text, START_PROMPT_TEXT);
        for question in bank.iter() {
            assert!(question.correct < question.choices.len());
        }
    }

    #[test]
    fn test_bank_rejects_invalid_questions() {
        assert!(matches!(QuestionBank::new(vec![]), Err(QuizError::EmptyBank)));

        let out_of_range = Question::new("Q", &["a", "b"], 2);
        assert!(matches!(
            QuestionBank::new(vec![out_of_range]),
            Err(QuizError::InvalidQuestion { index: 1, .. })
        ));

        let no_choices = Question {
            text: "Q".to_string(),
            choices: vec![],
            correct: 0,
        };
        let ok = Question::new("Q", &["a"], 0);
        assert!(matches!(
            QuestionBank::new(vec![ok, no_choices]),
            Err(QuizError::InvalidQuestion { index: 2, .. })
        ));
    }

    #[test]
    fn test_percentage_rounding() {
        let bank = QuestionBank::new(vec![
            Question::new("a", &["x"], 0),
            Question::new("b", &["x"], 0),
            Question::new("c", &["x"], 0),
        ])
        .unwrap();
        assert_eq!(bank.percentage(0), 0.0);
        assert_eq!(bank.percentage(1), 33.33);
        assert_eq!(bank.percentage(2), 66.67);
        assert_eq!(bank.percentage(3), 100.0);
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let mut scores = Highscores::new();
        scores.push(HighscoreEntry::new("A".to_string(), 50.0));
        scores.push(HighscoreEntry::new("B".to_string(), 90.0));
        scores.push(HighscoreEntry::new("C".to_string(), 90.0));

        let order: Vec<&str> = scores
            .ranked()
            .iter()
            .map(|e| e.initials.as_str())
            .collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ranked_line_format() {
        let entry = HighscoreEntry::new("AB".to_string(), 100.0);
        assert_eq!(entry.ranked_line(1), "1. AB - 100.00");

        let empty = HighscoreEntry::new(String::new(), 40.0);
        assert_eq!(empty.ranked_line(2), "2.  - 40.00");
    }
}
