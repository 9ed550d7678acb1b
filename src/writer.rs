use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use log::{debug, info};

use crate::{error::PostError, formatter::format_post, host::Host, metadata::PostRequest};

pub(crate) const POSTS_DIR: &str = "_posts";

const CREATE_POSTS_DIR: &str = "Create _posts directory";
const CHOOSE_LOCATION: &str = "Choose different location";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    Created(PathBuf),
    /// The user declined to create or pick a posts directory.
    Canceled,
}

/// `<root>/_posts`, or wherever the user wants posts to go when it is missing.
/// `None` when the user backs out.
fn resolve_posts_dir(host: &mut dyn Host, root: &Path) -> Result<Option<PathBuf>, PostError> {
    let posts_dir = root.join(POSTS_DIR);
    if posts_dir.is_dir() {
        return Ok(Some(posts_dir));
    }

    let choice = host.select(
        "_posts directory not found",
        &[CREATE_POSTS_DIR, CHOOSE_LOCATION],
    );
    match choice.as_deref() {
        Some(CREATE_POSTS_DIR) => {
            std::fs::create_dir_all(&posts_dir).map_err(|source| {
                PostError::DirectoryCreation {
                    path: posts_dir.clone(),
                    source,
                }
            })?;
            info!("created {posts_dir:?}");
            Ok(Some(posts_dir))
        }
        Some(CHOOSE_LOCATION) => Ok(host.pick_folder("Select Folder")),
        _ => Ok(None),
    }
}

/// Writes the post and opens it. An existing file with the same name is
/// replaced. A failure to open still leaves the file on disk.
pub(crate) fn write_post(
    host: &mut dyn Host,
    workspace: Option<&Path>,
    request: &PostRequest,
    now: &DateTime<FixedOffset>,
) -> Result<WriteOutcome, PostError> {
    let root = workspace.ok_or(PostError::NoWorkspace)?;
    let post = format_post(request, now)?;

    let Some(dir) = resolve_posts_dir(host, root)? else {
        debug!("no posts directory chosen, nothing written");
        return Ok(WriteOutcome::Canceled);
    };

    let path = dir.join(&post.filename);
    std::fs::write(&path, &post.content).map_err(|source| PostError::Write {
        path: path.clone(),
        source,
    })?;
    info!("wrote {path:?}");

    host.open_file(&path).map_err(|source| PostError::Open {
        path: path.clone(),
        source,
    })?;

    Ok(WriteOutcome::Created(path))
}
