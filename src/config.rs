//! 运行配置
//!
//! 优先级：命令行 > 环境变量 > 配置文件 > 默认值

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{QuizError, Result};

pub const DEFAULT_TIME_LIMIT: i64 = 60;
pub const DEFAULT_PENALTY: i64 = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 每轮测验的秒数
    pub time_limit: i64,
    /// 答错扣除的秒数
    pub wrong_answer_penalty: i64,
    pub tick_millis: u64,
    pub title: String,
    pub questions_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            wrong_answer_penalty: DEFAULT_PENALTY,
            tick_millis: 1000,
            title: "JavaScript Quiz".into(),
            questions_file: None,
            log_filter: "info".into(),
        }
    }
}

/// 命令行覆盖项
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub time_limit: Option<i64>,
    pub questions_file: Option<PathBuf>,
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    fn validate(self) -> Result<Self> {
        if self.time_limit <= 0 {
            return Err(QuizError::InvalidSetting {
                key: "time_limit",
                reason: format!("必须大于 0，实际为 {}", self.time_limit),
            });
        }
        if self.wrong_answer_penalty < 0 {
            return Err(QuizError::InvalidSetting {
                key: "wrong_answer_penalty",
                reason: format!("不能为负数，实际为 {}", self.wrong_answer_penalty),
            });
        }
        if self.tick_millis == 0 {
            return Err(QuizError::InvalidSetting {
                key: "tick_millis",
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(self)
    }
}

/// 默认配置文件路径 (~/.config/quizclock/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quizclock").join("config.toml"))
}

/// 加载配置
///
/// `explicit` 为命令行指定的文件，必须存在；默认路径的文件不存在时使用默认值。
pub fn load_settings(explicit: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let mut settings = match explicit {
        Some(path) => read_settings_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_settings_file(&path)?,
            _ => Settings::default(),
        },
    };

    apply_env(&mut settings, |key| std::env::var(key).ok())?;

    if let Some(limit) = overrides.time_limit {
        settings.time_limit = limit;
    }
    if let Some(path) = &overrides.questions_file {
        settings.questions_file = Some(path.clone());
    }

    settings.validate()
}

fn read_settings_file(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path).map_err(|source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| QuizError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(v) = lookup("QUIZCLOCK_TIME_LIMIT") {
        settings.time_limit = parse_seconds("time_limit", &v)?;
    }
    if let Some(v) = lookup("QUIZCLOCK_PENALTY") {
        settings.wrong_answer_penalty = parse_seconds("wrong_answer_penalty", &v)?;
    }
    if let Some(v) = lookup("QUIZCLOCK_QUESTIONS") {
        settings.questions_file = Some(PathBuf::from(v));
    }
    Ok(())
}

fn parse_seconds(key: &'static str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| QuizError::InvalidSetting {
            key,
            reason: e.to_string(),
        })
}

/// 获取数据目录路径 (~/.local/share/quizclock/)
pub fn data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("quizclock");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}
