//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 选项
    Pick(usize), // 数字键直接选择
    Submit,      // Enter

    // 高分榜
    ViewHighscores,
    ClearHighscores,
    GoBack,

    // 姓名缩写输入
    Input(char),
    DeleteChar,

    // 计时器到期
    Tick,
}
