//! 测验核心
//!
//! 与终端无关：控制器通过 [`QuizView`] 输出渲染指令，
//! 通过 [`QuizEvent`] 接收输入。

pub mod controller;
pub mod events;
pub mod timer;
pub mod view;

pub use controller::{Phase, QuizController, QuizRules};
pub use events::QuizEvent;
pub use view::{Choice, ChoiceKind, FeedbackTone, QuizView};
