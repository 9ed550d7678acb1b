use std::{
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{panel::PanelHandle, writer::POSTS_DIR};

/// Files that mark the root of a Jekyll site.
const SITE_MARKERS: [&str; 3] = ["_config.yml", "_config.yaml", POSTS_DIR];

/// State shared by the commands of one run.
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub workspace: Option<PathBuf>,
    pub panel: PanelSlot,
}

impl Session {
    pub fn new(workspace: Option<PathBuf>) -> Self {
        Self {
            workspace,
            panel: PanelSlot::default(),
        }
    }
}

/// Holds at most one open panel.
#[derive(Debug, Default)]
pub(crate) struct PanelSlot {
    current: Option<PanelHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Opened {
    Created,
    /// A panel was already open and has been brought forward.
    Revealed,
}

impl PanelSlot {
    pub fn open_or_reveal(&mut self, spawn: impl FnOnce() -> PanelHandle) -> Opened {
        match &self.current {
            Some(panel) => {
                panel.reveal();
                Opened::Revealed
            }
            None => {
                self.current = Some(spawn());
                Opened::Created
            }
        }
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Borrows the open panel. The slot is emptied when the lease is dropped.
    pub fn lease(&mut self) -> Option<PanelLease<'_>> {
        if self.current.is_some() {
            Some(PanelLease { slot: self })
        } else {
            None
        }
    }
}

pub(crate) struct PanelLease<'a> {
    slot: &'a mut PanelSlot,
}

impl Deref for PanelLease<'_> {
    type Target = PanelHandle;

    fn deref(&self) -> &PanelHandle {
        // only constructed over a filled slot, emptied on drop
        self.slot.current.as_ref().unwrap()
    }
}

impl DerefMut for PanelLease<'_> {
    fn deref_mut(&mut self) -> &mut PanelHandle {
        self.slot.current.as_mut().unwrap()
    }
}

impl Drop for PanelLease<'_> {
    fn drop(&mut self) {
        debug!("panel closed");
        self.slot.current = None;
    }
}

/// `explicit` when it is a directory, otherwise the closest ancestor of
/// `start` that looks like a Jekyll site.
pub(crate) fn find_workspace(explicit: Option<&Path>, start: &Path) -> Option<PathBuf> {
    if let Some(root) = explicit {
        return root.is_dir().then(|| root.to_path_buf());
    }

    start
        .ancestors()
        .find(|dir| SITE_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}
