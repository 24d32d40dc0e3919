use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{QuizError, Result};
use crate::models::{Question, QuestionBank};

/// 题库文件结构，只包含计分题
#[derive(Debug, Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

/// 从TOML文件加载题库
pub fn load_questions(path: &Path) -> Result<QuestionBank> {
    let content = fs::read_to_string(path).map_err(|source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_questions(&content, path)
}

fn parse_questions(content: &str, path: &Path) -> Result<QuestionBank> {
    let data: QuestionFile = toml::from_str(content).map_err(|source| QuizError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let bank = QuestionBank::new(data.questions)?;
    tracing::info!(path = %path.display(), count = bank.scoring_len(), "题库已加载");
    Ok(bank)
}
