//! 错误类型
//!
//! 状态机本身没有可恢复错误；这里只覆盖题库加载和配置解析

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("无法读取 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("无法解析 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("第 {index} 题无效: {reason}")]
    InvalidQuestion { index: usize, reason: String },

    #[error("题库中没有可计分的题目")]
    EmptyBank,

    #[error("配置项 {key} 无效: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, QuizError>;
