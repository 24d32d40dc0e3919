//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::state::{App, AppMode};
use crate::quiz::FeedbackTone;
use components::{render_choice_list, render_dialog_framework, render_input_widget};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题 + 计时
            Constraint::Min(5),    // 题目 / 高分榜
            Constraint::Length(8), // 选项
            Constraint::Length(3), // 反馈
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_choice_list(frame, chunks[2], app.choices(), app.selected_index);
    render_feedback(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);

    if app.screen().initials_form {
        render_initials_dialog(frame, app);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen();
    let timer_color = if screen.time_left <= 10 {
        Color::Red
    } else {
        Color::Green
    };

    let line = Line::from(vec![
        Span::styled(
            screen.header.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(
            format!("Time left: {}s", screen.time_left),
            Style::default().fg(timer_color),
        ),
    ]);

    let title = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen();

    let lines: Vec<Line> = if app.mode() == AppMode::Highscores {
        let ranked = app.quiz.highscores().ranked();
        if ranked.is_empty() {
            vec![Line::styled("暂无记录", Style::default().fg(Color::Gray))]
        } else {
            // 正文与排序后的记录一一对应，附上记录时间
            screen
                .body
                .lines()
                .zip(ranked)
                .map(|(text, entry)| {
                    Line::from(vec![
                        Span::raw(text.to_string()),
                        Span::styled(
                            format!("  ({})", entry.recorded_at.format("%Y-%m-%d %H:%M")),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ])
                })
                .collect()
        }
    } else {
        screen.body.lines().map(|l| Line::raw(l.to_string())).collect()
    };

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(body, area);
}

fn render_feedback(frame: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen();
    let color = match screen.feedback_tone {
        FeedbackTone::Positive => Color::LightGreen,
        FeedbackTone::Negative => Color::LightRed,
        FeedbackTone::Neutral => Color::Gray,
    };

    let feedback = Paragraph::new(screen.feedback.as_str())
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(feedback, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode() {
        AppMode::Start => "[Enter] 开始  [h] 高分榜  [q] 退出",
        AppMode::Question => "[j/k] 选择  [1-9] 直接作答  [Enter] 作答  [h] 高分榜  [q] 退出",
        AppMode::Initials => "输入姓名缩写后按 [Enter] 保存  [Esc] 退出",
        AppMode::Highscores => "[c] 清空  [b] 返回  [j/k] 选择  [Enter] 确认  [q] 退出",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_initials_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 30, frame.area());
    let inner = render_dialog_framework(frame, area, "保存成绩");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let screen = app.screen();
    frame.render_widget(
        Paragraph::new(format!("{}\n{}", screen.header, screen.body))
            .style(Style::default().fg(Color::White)),
        chunks[0],
    );

    render_input_widget(
        frame,
        chunks[1],
        "姓名缩写",
        &app.input_buffer,
        true,
        Color::Yellow,
    );

    let hint = Paragraph::new("按 Enter 保存，Esc 退出").style(Style::default().fg(Color::Gray));
    frame.render_widget(hint, chunks[2]);
}
