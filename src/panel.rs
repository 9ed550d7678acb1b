//! The post form as a separate surface. The surface runs on its own thread and
//! talks to the host over a pair of channels; the host side sees the panel as
//! closed once the surface drops its sender.

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::metadata::PostRequest;

mod form;
mod terminal;

pub(crate) use form::parse_option_value;
#[cfg(test)]
pub(crate) use form::{CustomField, FormData};
pub(crate) use terminal::run_form;

/// Panel to host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub(crate) enum PanelMessage {
    CreatePost { data: PostRequest },
    Error { text: String },
}

/// Host to panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "camelCase")]
pub(crate) enum HostMessage {
    /// Shown inline next to the form.
    Error { text: String },
    /// The submission went nowhere, keep editing.
    Resume,
    /// Someone asked for a second panel while this one is open.
    Reveal,
}

/// The surface's ends of the channels.
pub(crate) struct PanelLink {
    pub outbox: Sender<PanelMessage>,
    pub inbox: Receiver<HostMessage>,
}

#[derive(Debug)]
pub(crate) struct PanelHandle {
    to_panel: Option<Sender<HostMessage>>,
    from_panel: Receiver<PanelMessage>,
    thread: Option<JoinHandle<()>>,
}

impl PanelHandle {
    pub fn spawn<F>(surface: F) -> Self
    where
        F: FnOnce(PanelLink) + Send + 'static,
    {
        let (to_panel, inbox) = crossbeam_channel::unbounded::<HostMessage>();
        let (outbox, from_panel) = crossbeam_channel::unbounded::<PanelMessage>();

        let thread = std::thread::spawn(move || surface(PanelLink { outbox, inbox }));

        Self {
            to_panel: Some(to_panel),
            from_panel,
            thread: Some(thread),
        }
    }

    /// Next message, or `None` once the panel has closed.
    pub fn recv(&self) -> Option<PanelMessage> {
        self.from_panel.recv().ok()
    }

    pub fn send(&self, message: HostMessage) {
        let Some(to_panel) = &self.to_panel else {
            debug!("panel already closed, dropping {message:?}");
            return;
        };
        if to_panel.send(message).is_err() {
            debug!("panel went away before a reply");
        }
    }

    pub fn reveal(&self) {
        self.send(HostMessage::Reveal);
    }

    /// Asks the surface to go away. Messages it already sent stay readable.
    pub fn close(&mut self) {
        self.to_panel = None;
    }
}

impl Drop for PanelHandle {
    fn drop(&mut self) {
        self.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("panel thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn panel_messages_use_command_tag() {
        let message: PanelMessage = serde_json::from_value(json!({
            "command": "createPost",
            "data": {
                "title": "T",
                "categories": "",
                "tags": "",
                "layout": "page",
                "additionalOptions": { "flag": true }
            }
        }))
        .unwrap();
        let PanelMessage::CreatePost { data } = message else {
            panic!("expected createPost");
        };
        assert_eq!(data.layout, "page");

        let error: PanelMessage =
            serde_json::from_value(json!({ "command": "error", "text": "Title is required." }))
                .unwrap();
        assert_eq!(
            error,
            PanelMessage::Error {
                text: "Title is required.".to_string()
            }
        );

        assert_eq!(
            serde_json::to_value(HostMessage::Resume).unwrap(),
            json!({ "command": "resume" })
        );
    }

    #[test]
    fn closing_ends_the_surface() {
        let mut handle = PanelHandle::spawn(|link| {
            link.outbox
                .send(PanelMessage::Error {
                    text: "hello".to_string(),
                })
                .unwrap();
            // returns once the host hangs up
            while link.inbox.recv().is_ok() {}
        });

        assert!(matches!(handle.recv(), Some(PanelMessage::Error { .. })));
        handle.close();
        assert_eq!(handle.recv(), None);
    }
}
