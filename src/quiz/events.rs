/// 投递给控制器的输入事件
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    ChoiceClicked(usize),
    StartClicked,
    BackClicked,
    ClearClicked,
    InitialsSubmitted(String),
    ViewHighscoresClicked,
    Tick,
}
