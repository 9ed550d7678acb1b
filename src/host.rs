//! Everything the post flow needs from its surroundings: prompts, pickers,
//! opening files and notifications. `None` from a prompt always means the user
//! dismissed it.

use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

use inquire::{validator::Validation, InquireError, Select, Text};
use log::{debug, warn};

#[derive(Debug, Clone)]
pub(crate) struct Prompt<'a> {
    pub message: &'a str,
    pub placeholder: &'a str,
    /// Blank answers are refused inline instead of returned.
    pub required: bool,
}

impl<'a> Prompt<'a> {
    pub fn new(message: &'a str, placeholder: &'a str) -> Self {
        Self {
            message,
            placeholder,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

pub(crate) trait Host {
    fn input(&mut self, prompt: &Prompt<'_>) -> Option<String>;

    fn select(&mut self, message: &str, options: &[&str]) -> Option<String>;

    /// An existing directory chosen by the user.
    fn pick_folder(&mut self, message: &str) -> Option<PathBuf>;

    fn open_file(&mut self, path: &Path) -> io::Result<()>;

    fn notify(&mut self, notice: Notice);
}

/// Prompts on the controlling terminal with `inquire`.
#[derive(Debug, Default)]
pub(crate) struct TerminalHost {
    /// Command used to edit new posts. Falls back to the platform opener.
    pub editor: Option<String>,
}

impl TerminalHost {
    pub fn from_env() -> Self {
        let editor = ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty());
        Self { editor }
    }
}

fn answered<T>(result: Result<T, InquireError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            debug!("prompt dismissed");
            None
        }
        Err(e) => {
            warn!("prompt failed, treating it as canceled: {e}");
            None
        }
    }
}

impl Host for TerminalHost {
    fn input(&mut self, prompt: &Prompt<'_>) -> Option<String> {
        let mut text = Text::new(prompt.message).with_placeholder(prompt.placeholder);
        if prompt.required {
            text = text.with_validator(|input: &str| {
                Ok(if input.trim().is_empty() {
                    Validation::Invalid("Title is required.".into())
                } else {
                    Validation::Valid
                })
            });
        }
        answered(text.prompt())
    }

    fn select(&mut self, message: &str, options: &[&str]) -> Option<String> {
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        answered(Select::new(message, options).prompt())
    }

    fn pick_folder(&mut self, message: &str) -> Option<PathBuf> {
        let answer = Text::new(message)
            .with_placeholder("path/to/folder")
            .with_validator(|input: &str| {
                Ok(if Path::new(input.trim()).is_dir() {
                    Validation::Valid
                } else {
                    Validation::Invalid("Not an existing directory".into())
                })
            })
            .prompt();
        answered(answer).map(|s| PathBuf::from(s.trim()))
    }

    fn open_file(&mut self, path: &Path) -> io::Result<()> {
        match &self.editor {
            Some(editor) => {
                debug!("opening {path:?} with {editor}");
                // `code --wait` style values carry their own arguments
                let mut parts = editor.split_whitespace();
                let program = parts.next().unwrap_or(editor.as_str());
                let status = Command::new(program).args(parts).arg(path).status()?;
                if status.success() {
                    Ok(())
                } else {
                    Err(io::Error::other(format!("{editor} exited with {status}")))
                }
            }
            None => open::that(path),
        }
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            Level::Info => println!("{}", notice.message),
            Level::Warning => eprintln!("warning: {}", notice.message),
            Level::Error => eprintln!("error: {}", notice.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_are_optional_unless_required() {
        assert!(!Prompt::new("Tags", "tag1 tag2").required);
        assert!(Prompt::new("Title", "Enter post title").required().required);
    }

    #[test]
    fn editor_with_failing_exit_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "x").unwrap();

        let mut host = TerminalHost {
            editor: Some("false".to_string()),
        };
        if cfg!(unix) {
            assert!(host.open_file(&path).is_err());
        }
    }
}
