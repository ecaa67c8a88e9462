use std::time::Duration;

use crate::model::ProgressMsg;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Esc,
    CtrlC,
    Up,
    Down,
    Backspace,
    Char(char),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    Key(Key),
    Progress(ProgressMsg),
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cmd {
    None,
    Quit,
}

/// An interactive screen: state plus `update` for events and `view` to
/// render the current state as text.
pub trait Program: Send {
    fn init(&mut self) -> Cmd {
        Cmd::None
    }

    fn update(&mut self, msg: Msg) -> Cmd;

    fn view(&self) -> String;

    /// When set, the host delivers [`Msg::Tick`] at this interval.
    fn tick_interval(&self) -> Option<Duration> {
        None
    }
}
