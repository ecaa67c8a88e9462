use std::io::{Stdout, Write, stderr, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, never, select, tick};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::{Cmd, ExitConsole, Key, Msg, Program, Prompter, TextInputOptions};

type Term = Terminal<CrosstermBackend<Stdout>>;

const POLL: Duration = Duration::from_millis(50);

/// Prompter backed by a full-screen ratatui session per question.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn text_input(&self, label: &str, options: TextInputOptions) -> Result<String> {
        with_terminal(|terminal| {
            let mut state = TextInputState::default();
            loop {
                terminal
                    .draw(|frame| {
                        let para = Paragraph::new(text_input_lines(label, &options, &state))
                            .block(Block::default().borders(Borders::ALL).title("rad init"))
                            .wrap(Wrap { trim: false });
                        frame.render_widget(para, frame.area());
                    })
                    .context("draw text input")?;

                if let Some(key) = read_key(POLL)? {
                    match state.handle_key(key, &options) {
                        TextOutcome::Pending => {}
                        TextOutcome::Submitted(value) => return Ok(value),
                        TextOutcome::Exit => return Err(ExitConsole.into()),
                    }
                }
            }
        })
    }

    fn list_input(&self, choices: &[String], label: &str) -> Result<String> {
        if choices.is_empty() {
            anyhow::bail!("no choices to select from for {:?}", label);
        }
        with_terminal(|terminal| {
            let mut state = ListInputState::new(choices.len());
            loop {
                terminal
                    .draw(|frame| {
                        let para = Paragraph::new(list_input_lines(label, choices, &state))
                            .block(Block::default().borders(Borders::ALL).title("rad init"))
                            .wrap(Wrap { trim: false });
                        frame.render_widget(para, frame.area());
                    })
                    .context("draw list input")?;

                if let Some(key) = read_key(POLL)? {
                    match state.handle_key(key) {
                        ListOutcome::Pending => {}
                        ListOutcome::Chosen(idx) => return Ok(choices[idx].clone()),
                        ListOutcome::Exit => return Err(ExitConsole.into()),
                    }
                }
            }
        })
    }

    fn run_program(&self, program: &mut dyn Program, inbox: Option<Receiver<Msg>>) -> Result<()> {
        let ended = with_terminal(|terminal| host_program(terminal, program, inbox))?;
        if let Some(frame) = leftover_frame(program, ended) {
            let mut err = stderr();
            write!(err, "{}", frame).ok();
            err.flush().ok();
        }
        Ok(())
    }
}

/// How a hosted program stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ended {
    Quit,
    InboxClosed,
}

/// The alternate screen is gone once a program ends. A program whose feed
/// stopped before it quit keeps its last frame on the normal screen.
pub(crate) fn leftover_frame(program: &dyn Program, ended: Ended) -> Option<String> {
    match ended {
        Ended::Quit => None,
        Ended::InboxClosed => Some(program.view()).filter(|view| !view.is_empty()),
    }
}

fn with_terminal<T>(f: impl FnOnce(&mut Term) -> Result<T>) -> Result<T> {
    let _held = crate::logging::hold_stderr();
    let mut out = stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(out, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let res = f(&mut terminal);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn host_program(
    terminal: &mut Term,
    program: &mut dyn Program,
    inbox: Option<Receiver<Msg>>,
) -> Result<Ended> {
    let inbox = inbox.unwrap_or_else(never);
    let ticker = program.tick_interval().map(tick).unwrap_or_else(never);

    let mut cmd = program.init();
    loop {
        let view = program.view();
        terminal
            .draw(|frame| {
                frame.render_widget(Paragraph::new(view), frame.area());
            })
            .context("draw program")?;

        if cmd == Cmd::Quit {
            return Ok(Ended::Quit);
        }

        select! {
            recv(inbox) -> msg => match msg {
                Ok(msg) => cmd = program.update(msg),
                Err(_) => return Ok(Ended::InboxClosed),
            },
            recv(ticker) -> _ => cmd = program.update(Msg::Tick),
            default(POLL) => {}
        }

        if cmd != Cmd::Quit
            && let Some(key) = read_key(Duration::ZERO)?
        {
            cmd = program.update(Msg::Key(key));
        }
    }
}

fn read_key(timeout: Duration) -> Result<Option<Key>> {
    if !event::poll(timeout).context("poll")? {
        return Ok(None);
    }
    match event::read().context("read event")? {
        Event::Key(k) if k.kind == KeyEventKind::Press => Ok(Some(key_from_event(k))),
        _ => Ok(None),
    }
}

pub(crate) fn key_from_event(k: KeyEvent) -> Key {
    match k.code {
        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => Key::CtrlC,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}

#[derive(Debug, Default)]
pub(crate) struct TextInputState {
    value: String,
    error: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum TextOutcome {
    Pending,
    Submitted(String),
    Exit,
}

impl TextInputState {
    pub(crate) fn handle_key(&mut self, key: Key, options: &TextInputOptions) -> TextOutcome {
        match key {
            Key::Esc | Key::CtrlC => TextOutcome::Exit,
            Key::Char(c) => {
                self.value.push(c);
                self.error = None;
                TextOutcome::Pending
            }
            Key::Backspace => {
                self.value.pop();
                self.error = None;
                TextOutcome::Pending
            }
            Key::Enter => {
                let value = match (&options.default, self.value.is_empty()) {
                    (Some(default), true) => default.clone(),
                    _ => self.value.clone(),
                };
                if let Some(validate) = options.validate
                    && let Err(msg) = validate(&value)
                {
                    self.error = Some(msg);
                    return TextOutcome::Pending;
                }
                TextOutcome::Submitted(value)
            }
            _ => TextOutcome::Pending,
        }
    }
}

fn text_input_lines<'a>(
    label: &'a str,
    options: &'a TextInputOptions,
    state: &TextInputState,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    if let Some(help) = &options.help {
        for l in help.lines() {
            lines.push(Line::from(l));
        }
        lines.push(Line::from(""));
    }

    let mut heading = vec![Span::styled(
        label,
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(default) = &options.default
        && !options.mask
    {
        heading.push(Span::styled(
            format!(" ({})", default),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::from(heading));

    let shown = if options.mask {
        "*".repeat(state.value.chars().count())
    } else {
        state.value.clone()
    };
    if shown.is_empty()
        && let Some(placeholder) = &options.placeholder
    {
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(placeholder.clone(), Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        lines.push(Line::from(format!("> {}", shown)));
    }

    if let Some(err) = &state.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

#[derive(Debug)]
pub(crate) struct ListInputState {
    selected: usize,
    len: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ListOutcome {
    Pending,
    Chosen(usize),
    Exit,
}

impl ListInputState {
    pub(crate) fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub(crate) fn handle_key(&mut self, key: Key) -> ListOutcome {
        match key {
            Key::Esc | Key::CtrlC => ListOutcome::Exit,
            Key::Up | Key::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                ListOutcome::Pending
            }
            Key::Down | Key::Char('j') => {
                if self.selected + 1 < self.len {
                    self.selected += 1;
                }
                ListOutcome::Pending
            }
            Key::Enter => ListOutcome::Chosen(self.selected),
            _ => ListOutcome::Pending,
        }
    }
}

fn list_input_lines<'a>(
    label: &'a str,
    choices: &'a [String],
    state: &ListInputState,
) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            label,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (idx, choice) in choices.iter().enumerate() {
        if idx == state.selected {
            lines.push(Line::from(Span::styled(
                format!("> {}", choice),
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from(format!("  {}", choice)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "up/down to move, enter to select, esc to exit",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

#[cfg(test)]
#[path = "../tests/prompt/terminal_tests.rs"]
mod tests;
