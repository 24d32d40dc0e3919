mod config;
mod error;
mod logging;
mod models;
mod quiz;
mod storage;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::config::{Overrides, load_settings};
use crate::models::QuestionBank;
use crate::quiz::QuizRules;
use crate::storage::load_questions;
use crate::ui::{Action, App, render};

/// 无计时器时的事件轮询间隔
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "quizclock", version, about = "限时选择题测验")]
struct Cli {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 题库文件 (TOML)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// 每轮秒数
    #[arg(short, long)]
    time_limit: Option<i64>,

    /// 日志文件路径
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = Overrides {
        time_limit: cli.time_limit,
        questions_file: cli.questions.clone(),
    };
    let settings = load_settings(cli.config.as_deref(), &overrides).context("加载配置失败")?;

    let log_path = match cli.log_file {
        Some(path) => path,
        None => config::data_dir()
            .context("无法创建数据目录")?
            .join("quizclock.log"),
    };
    logging::init(&log_path, &settings.log_filter).context("初始化日志失败")?;

    let bank = match &settings.questions_file {
        Some(path) => load_questions(path).context("加载题库失败")?,
        None => QuestionBank::builtin(),
    };
    tracing::info!(questions = bank.scoring_len(), time_limit = settings.time_limit, "启动");

    // 创建应用状态
    let mut app = App::new(bank, QuizRules::from(&settings));

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "异常退出");
    }
    tracing::info!(highscores = app.quiz.highscores().len(), "退出");

    result.context("运行失败")
}

/// 按键与计时跳动在同一个循环里串行处理
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        let timeout = app
            .quiz
            .next_tick_in(std::time::Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
        }

        app.dispatch(Action::Tick);
    }
    Ok(())
}
