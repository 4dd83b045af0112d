//! Interactive line loop.
//!
//! Each line is split on whitespace. A word that is a keypad symbol
//! (`√`, `1/x`, `DEL`, `×` ...) is applied as a token; any other word
//! is typed key by key through the keyboard mapping. An empty line is
//! Enter. `:quit` or `:exit` leaves.

use rustyline::{error::ReadlineError, DefaultEditor};

use calc_engine::tokens::Token;

use crate::error::{Result, RuntimeError};
use crate::keyboard::Key;
use crate::render::{render_json, render_text};
use crate::session::{KeyboardListener, Session};

/// One unit of input decoded from a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Token(Token),
    Key(Key),
}

/// What a line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    Quit,
    Inputs(Vec<Input>),
}

pub fn interpret_line(line: &str) -> LineAction {
    let trimmed = line.trim();
    if trimmed == ":quit" || trimmed == ":exit" {
        return LineAction::Quit;
    }
    if trimmed.is_empty() {
        return LineAction::Inputs(vec![Input::Key(Key::Enter)]);
    }

    let inputs = trimmed
        .split_whitespace()
        .flat_map(|word| match word.parse::<Token>() {
            Ok(token) => vec![Input::Token(token)],
            Err(_) => word.chars().map(|c| Input::Key(Key::Char(c))).collect(),
        })
        .collect();
    LineAction::Inputs(inputs)
}

/// Feed decoded inputs through an attached keyboard.
pub fn feed(keyboard: &mut KeyboardListener<'_>, inputs: &[Input]) -> Result<()> {
    for input in inputs {
        match *input {
            Input::Token(token) => {
                keyboard.session_mut().apply(token)?;
            }
            Input::Key(key) => {
                if keyboard.key(key)?.is_none() {
                    tracing::warn!(?key, "key ignored");
                }
            }
        }
    }
    Ok(())
}

pub struct Repl {
    session: Session,
    show_history: bool,
    json: bool,
}

impl Repl {
    pub fn new(session: Session, show_history: bool, json: bool) -> Self {
        Self {
            session,
            show_history,
            json,
        }
    }

    /// Run until `:quit`, Ctrl-C or end of input. The keyboard stays
    /// attached for the whole loop and is detached on every exit path.
    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(|err| {
            RuntimeError::from(std::io::Error::new(std::io::ErrorKind::Other, err))
        })?;
        let (show_history, json) = (self.show_history, self.json);
        let mut keyboard = self.session.attach_keyboard();

        loop {
            match editor.readline("calc> ") {
                Ok(line) => {
                    let inputs = match interpret_line(&line) {
                        LineAction::Quit => break,
                        LineAction::Inputs(inputs) => inputs,
                    };
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.trim()).ok();
                    }
                    feed(&mut keyboard, &inputs)?;

                    let view = keyboard.session().view();
                    if json {
                        match render_json(&view) {
                            Ok(text) => println!("{text}"),
                            Err(err) => eprintln!("error: {err}"),
                        }
                    } else {
                        print!("{}", render_text(&view, show_history));
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    return Err(RuntimeError::from(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        err,
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_engine::tokens::UnaryOp;

    #[test]
    fn test_quit_commands() {
        assert_eq!(interpret_line(":quit"), LineAction::Quit);
        assert_eq!(interpret_line("  :exit "), LineAction::Quit);
    }

    #[test]
    fn test_empty_line_is_enter() {
        assert_eq!(interpret_line(""), LineAction::Inputs(vec![Input::Key(Key::Enter)]));
    }

    #[test]
    fn test_symbols_and_keys() {
        let LineAction::Inputs(inputs) = interpret_line("12*3 √") else {
            panic!("expected inputs");
        };
        assert_eq!(
            inputs,
            vec![
                Input::Key(Key::Char('1')),
                Input::Key(Key::Char('2')),
                Input::Key(Key::Char('*')),
                Input::Key(Key::Char('3')),
                Input::Token(Token::Special(UnaryOp::SquareRoot)),
            ]
        );
    }

    #[test]
    fn test_feed_lines_through_keyboard() {
        let mut session = Session::new();
        {
            let mut keyboard = session.attach_keyboard();
            for line in ["12*3", "", "x²"] {
                if let LineAction::Inputs(inputs) = interpret_line(line) {
                    feed(&mut keyboard, &inputs).unwrap();
                }
            }
        }
        assert!(!session.keyboard_attached());
        let view = session.view();
        assert_eq!(view.display, "1296");
        assert_eq!(view.history, vec!["x²(36) = 1296", "12 × 3 = 36"]);
    }
}
