//! Everything the session needs from the terminal: reading a line and
//! presenting styled output.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use colored::Colorize;
use dialoguer::Input;
use thiserror::Error;

const BANNER_TITLE: &str = "ZARCO BANK - BANKING SYSTEM";
const BANNER_WIDTH: usize = 60;
const SEPARATOR_WIDTH: usize = 50;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input interrupted")]
    Interrupted,
    #[error("cannot read input: {0}")]
    Io(io::Error),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => PromptError::Interrupted,
            _ => PromptError::Io(e),
        }
    }
}

pub trait Prompter {
    /// Shows `message` and returns the line typed in reply, without the
    /// trailing newline.
    fn prompt(&mut self, message: &str) -> Result<String, PromptError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Title,
    Info,
    Success,
    Warning,
    Error,
    Highlight,
}

pub trait Screen {
    fn clear(&mut self);
    fn banner(&mut self);
    fn separator(&mut self);
    fn print(&mut self, style: Style, text: &str);
    fn pause(&mut self, duration: Duration);

    fn blank(&mut self) {
        self.print(Style::Plain, "");
    }
}

/// The real console: ANSI colors on stdout, line input on stdin.
#[derive(Debug, Default)]
pub struct Terminal;

impl Prompter for Terminal {
    fn prompt(&mut self, message: &str) -> Result<String, PromptError> {
        if io::stdin().is_terminal() {
            return Input::<String>::new()
                .with_prompt(message)
                .allow_empty(true)
                .interact_text()
                .map_err(|err| match err {
                    dialoguer::Error::IO(e) => PromptError::from(e),
                });
        }

        // Piped input: no line editing, just read the next line.
        print!("{}: ", message.cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(PromptError::Interrupted);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

impl Screen for Terminal {
    fn clear(&mut self) {
        print!("\x1B[2J\x1B[1;1H");
        let _ = io::stdout().flush();
    }

    fn banner(&mut self) {
        let rule = "=".repeat(BANNER_WIDTH);
        let title = format!("{:^width$}", BANNER_TITLE, width = BANNER_WIDTH);

        println!("{}", rule.on_blue().white().bold());
        println!("{}", title.on_blue().white().bold());
        println!("{}", rule.on_blue().white().bold());
        println!();
    }

    fn separator(&mut self) {
        println!("{}", "-".repeat(SEPARATOR_WIDTH).cyan());
    }

    fn print(&mut self, style: Style, text: &str) {
        let styled = match style {
            Style::Plain => text.normal(),
            Style::Title => text.yellow().bold(),
            Style::Info => text.cyan(),
            Style::Success => text.green().bold(),
            Style::Warning => text.yellow(),
            Style::Error => text.red(),
            Style::Highlight => text.purple().bold(),
        };

        println!("{styled}");
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
