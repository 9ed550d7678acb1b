use chrono::{DateTime, FixedOffset};
use log::{debug, info};

use crate::{
    context::Session,
    error::PostError,
    host::{Host, Notice, Prompt},
    metadata::{PostRequest, LAYOUT_CHOICES},
    panel::{HostMessage, PanelMessage},
    writer::{write_post, WriteOutcome},
};

/// Asks for title, categories, tags and layout. `None` if any prompt is dismissed.
fn prompt_request(host: &mut dyn Host) -> Option<PostRequest> {
    let title = host.input(
        &Prompt::new("The title of your Jekyll post", "Enter post title").required(),
    )?;
    let categories = host.input(&Prompt::new(
        "Enter categories (space separated)",
        "category1 category2",
    ))?;
    let tags = host.input(&Prompt::new("Enter tags (space separated)", "tag1 tag2"))?;
    let layout = host.select("Select layout", &LAYOUT_CHOICES)?;

    let mut request = PostRequest::new(title);
    request.categories = categories;
    request.tags = tags;
    request.layout = layout;
    Some(request)
}

/// Prompt driven post creation.
pub(crate) fn create_post(
    session: &Session,
    host: &mut dyn Host,
    now: &DateTime<FixedOffset>,
) -> Result<WriteOutcome, PostError> {
    let workspace = session.workspace.as_deref().ok_or(PostError::NoWorkspace)?;
    let Some(request) = prompt_request(host) else {
        debug!("post creation abandoned at a prompt");
        return Ok(WriteOutcome::Canceled);
    };
    write_post(host, Some(workspace), &request, now)
}

/// Creation from an already complete request, e.g. command line flags.
pub(crate) fn create_post_from(
    session: &Session,
    host: &mut dyn Host,
    request: &PostRequest,
    now: &DateTime<FixedOffset>,
) -> Result<WriteOutcome, PostError> {
    write_post(host, session.workspace.as_deref(), request, now)
}

/// Turns the outcome of one operation into a single notification. Dismissals
/// stay silent.
pub(crate) fn report(host: &mut dyn Host, result: &Result<WriteOutcome, PostError>) {
    match result {
        Ok(WriteOutcome::Created(path)) => {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            host.notify(Notice::info(format!("Created Jekyll post: {filename}")));
        }
        Ok(WriteOutcome::Canceled) => {}
        Err(e @ PostError::Open { .. }) => host.notify(Notice::warning(e.to_string())),
        Err(e) => host.notify(Notice::error(e.to_string())),
    }
}

/// Serves the open panel until it closes. Input problems go back to the panel
/// inline; everything else is reported like any other creation. Every message
/// that leaves the panel open gets exactly one reply.
pub(crate) fn run_panel(
    session: &mut Session,
    host: &mut dyn Host,
    clock: &dyn Fn() -> DateTime<FixedOffset>,
) {
    let workspace = session.workspace.clone();
    let Some(mut panel) = session.panel.lease() else {
        debug!("no panel open");
        return;
    };

    while let Some(message) = panel.recv() {
        match message {
            PanelMessage::Error { text } => {
                host.notify(Notice::error(text));
                panel.send(HostMessage::Resume);
            }
            PanelMessage::CreatePost { data } => {
                let result = write_post(host, workspace.as_deref(), &data, &clock());
                match &result {
                    Ok(WriteOutcome::Created(_)) | Err(PostError::Open { .. }) => {
                        info!("post created from panel, closing it");
                        panel.close();
                    }
                    Ok(WriteOutcome::Canceled) => panel.send(HostMessage::Resume),
                    Err(e @ (PostError::EmptyTitle | PostError::CustomFieldKeyMissing { .. })) => {
                        panel.send(HostMessage::Error {
                            text: e.to_string(),
                        });
                        continue;
                    }
                    Err(_) => panel.send(HostMessage::Resume),
                }
                report(host, &result);
            }
        }
    }
}
