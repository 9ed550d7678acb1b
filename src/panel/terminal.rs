use inquire::{InquireError, Select, Text};
use log::{debug, warn};

use crate::metadata::LAYOUT_CHOICES;

use super::{
    form::{CustomField, FormData},
    HostMessage, PanelLink,
};

const CREATE: &str = "Create post";
const ADD_OPTION: &str = "Add option";
const REMOVE_OPTION: &str = "Remove option";

/// Terminal rendition of the post form. Runs until the user dismisses the form
/// or the host closes the panel.
pub(crate) fn run_form(link: PanelLink) {
    let mut form = FormData::default();
    let mut inline_error: Option<String> = None;

    loop {
        while let Ok(message) = link.inbox.try_recv() {
            if message == HostMessage::Reveal {
                println!("The post form is already open.");
            }
        }
        if let Some(text) = inline_error.take() {
            eprintln!("! {text}");
        }

        form = match edit(&form) {
            Ok(form) => form,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                debug!("post form dismissed");
                return;
            }
            Err(e) => {
                warn!("closing post form: {e}");
                return;
            }
        };

        if link.outbox.send(form.to_message()).is_err() {
            return;
        }

        // the host may be printing; redraw only once it has answered
        loop {
            match link.inbox.recv() {
                Ok(HostMessage::Error { text }) => {
                    inline_error = Some(text);
                    break;
                }
                Ok(HostMessage::Resume) => break,
                Ok(HostMessage::Reveal) => continue,
                Err(_) => return,
            }
        }
    }
}

fn edit(previous: &FormData) -> Result<FormData, InquireError> {
    let title = Text::new("Title")
        .with_placeholder("Enter post title")
        .with_initial_value(&previous.title)
        .prompt()?;
    let categories = Text::new("Categories")
        .with_placeholder("category1 category2")
        .with_initial_value(&previous.categories)
        .prompt()?;
    let tags = Text::new("Tags")
        .with_placeholder("tag1 tag2")
        .with_initial_value(&previous.tags)
        .prompt()?;
    let cursor = LAYOUT_CHOICES
        .iter()
        .position(|l| *l == previous.layout)
        .unwrap_or(0);
    let layout = Select::new("Layout", LAYOUT_CHOICES.to_vec())
        .with_starting_cursor(cursor)
        .prompt()?
        .to_string();

    let mut fields = previous.fields.clone();
    loop {
        for field in &fields {
            println!("  {} = {}", field.key, field.value);
        }
        let mut actions = vec![CREATE, ADD_OPTION];
        if !fields.is_empty() {
            actions.push(REMOVE_OPTION);
        }
        match Select::new("Custom options", actions).prompt()? {
            ADD_OPTION => {
                let key = Text::new("Option Key")
                    .with_placeholder("e.g. comments")
                    .prompt()?;
                let value = Text::new("Option Value")
                    .with_placeholder("e.g. true, 123, \"text\"")
                    .prompt()?;
                fields.push(CustomField { key, value });
            }
            REMOVE_OPTION => {
                let labels: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{} = {}", f.key, f.value))
                    .collect();
                let picked = Select::new("Remove which option?", labels).raw_prompt()?;
                fields.remove(picked.index);
            }
            _ => break,
        }
    }

    Ok(FormData {
        title,
        categories,
        tags,
        layout,
        fields,
    })
}
