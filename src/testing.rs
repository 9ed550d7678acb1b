use std::{
    collections::VecDeque,
    io,
    path::{Path, PathBuf},
};

use crate::host::{Host, Level, Notice, Prompt};

/// Answers prompts from queues and records what the flow did.
#[derive(Debug, Default)]
pub(crate) struct ScriptedHost {
    pub inputs: VecDeque<Option<String>>,
    pub selections: VecDeque<Option<String>>,
    pub folders: VecDeque<Option<PathBuf>>,
    pub fail_open: bool,

    pub asked: Vec<String>,
    pub opened: Vec<PathBuf>,
    pub notices: Vec<Notice>,
}

impl ScriptedHost {
    pub fn with_inputs(inputs: &[Option<&str>]) -> Self {
        Self {
            inputs: inputs.iter().map(|i| i.map(str::to_string)).collect(),
            ..Default::default()
        }
    }

    pub fn select_next(mut self, choice: Option<&str>) -> Self {
        self.selections.push_back(choice.map(str::to_string));
        self
    }

    pub fn folder_next(mut self, folder: Option<PathBuf>) -> Self {
        self.folders.push_back(folder);
        self
    }

    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.as_str())
            .collect()
    }
}

impl Host for ScriptedHost {
    fn input(&mut self, prompt: &Prompt<'_>) -> Option<String> {
        self.asked.push(prompt.message.to_string());
        self.inputs.pop_front().flatten()
    }

    fn select(&mut self, message: &str, options: &[&str]) -> Option<String> {
        self.asked.push(message.to_string());
        let choice = self.selections.pop_front().flatten()?;
        assert!(options.contains(&choice.as_str()), "{choice} not offered");
        Some(choice)
    }

    fn pick_folder(&mut self, message: &str) -> Option<PathBuf> {
        self.asked.push(message.to_string());
        self.folders.pop_front().flatten()
    }

    fn open_file(&mut self, path: &Path) -> io::Result<()> {
        if self.fail_open {
            return Err(io::Error::other("no editor"));
        }
        self.opened.push(path.to_path_buf());
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
