//! User input for the init wizard.
//!
//! Everything that asks the user something goes through [`Prompter`], so the
//! wizard can be driven by a scripted prompter in tests and by the terminal
//! implementation in [`terminal`] at runtime.

use anyhow::Result;
use crossbeam_channel::Receiver;

mod program;
pub use self::program::{Cmd, Key, Msg, Program};

pub mod terminal;

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Raised by a prompt when the user leaves the wizard (Esc or Ctrl-C).
///
/// It travels up unchanged through every gathering step and is never
/// wrapped with phase context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("exiting command")]
pub struct ExitConsole;

pub fn is_exit_console(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ExitConsole>().is_some()
}

pub type Validator = fn(&str) -> Result<(), String>;

#[derive(Clone, Debug, Default)]
pub struct TextInputOptions {
    /// Returned when the user submits an empty line.
    pub default: Option<String>,
    pub placeholder: Option<String>,
    pub validate: Option<Validator>,
    /// Hide typed characters.
    pub mask: bool,
    /// Extra text shown above the input.
    pub help: Option<String>,
}

impl TextInputOptions {
    pub fn with_default(default: impl Into<String>) -> Self {
        Self {
            default: Some(default.into()),
            ..Self::default()
        }
    }

    pub fn validated(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn masked(mut self) -> Self {
        self.mask = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

pub trait Prompter: Send + Sync {
    /// Ask for a line of text. Implementations re-ask until `validate`
    /// accepts the answer.
    fn text_input(&self, label: &str, options: TextInputOptions) -> Result<String>;

    /// Ask the user to pick one of `choices`; returns the chosen string.
    fn list_input(&self, choices: &[String], label: &str) -> Result<String>;

    /// Host an interactive program until it returns [`Cmd::Quit`] or, when
    /// `inbox` is given, until the inbox is closed.
    fn run_program(&self, program: &mut dyn Program, inbox: Option<Receiver<Msg>>) -> Result<()>;
}

/// Yes/no question presented as a two-item list.
pub fn yes_no(prompter: &dyn Prompter, label: &str) -> Result<bool> {
    let choices = [YES.to_string(), NO.to_string()];
    let answer = prompter.list_input(&choices, label)?;
    Ok(answer == YES)
}
