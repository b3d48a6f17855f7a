use crate::api::system::{fetch_system_disks, fetch_system_files};
use crate::api::{HttpClient, Payload, Query};
use crate::poll::{FetchState, PollingController, fetcher_fn};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

use super::resource;

/// One directory listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileListing {
    /// Directory the backend actually listed: its `base_path`, else the
    /// requested path
    pub path: String,
    pub entries: Vec<Value>,
    pub payload: Payload,
}

impl FileListing {
    #[must_use]
    pub fn from_payload(requested: &str, payload: Payload) -> Self {
        Self {
            path: payload
                .str_field("base_path")
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| requested.to_string()),
            entries: payload.list("entries"),
            payload,
        }
    }
}

fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn is_drive_root(path: &str) -> bool {
    let bytes = path.as_bytes();
    match bytes {
        [letter, b':'] | [letter, b':', b'\\'] => letter.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Parent directory of `path`, for both `/` and `\` separated paths.
///
/// Roots (`/`, `C:`, `C:\`) are their own parent.
#[must_use]
pub fn resolve_parent_path(path: &str) -> String {
    let safe = normalize_path(path);
    if is_drive_root(&safe) || safe == "/" {
        return safe;
    }

    let windows = safe.contains('\\');
    let mut segments: Vec<&str> = safe
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.pop();

    if windows {
        let parent = segments.join("\\");
        if parent.is_empty() { safe } else { parent }
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Disk list plus a file browser with a current directory
#[derive(Debug)]
pub struct SystemDisksPanel {
    disks: PollingController<Payload>,
    files: PollingController<FileListing>,
    target: Arc<Mutex<String>>,
    initial_path: String,
}

impl SystemDisksPanel {
    #[must_use]
    pub fn new(client: &HttpClient, initial_path: &str) -> Self {
        let initial_path = normalize_path(initial_path);
        let target = Arc::new(Mutex::new(initial_path.clone()));

        let disks = PollingController::new(resource(client.clone(), "system.disks", |c| async move {
            fetch_system_disks(&c).await
        }));

        let files_client = client.clone();
        let files_target = Arc::clone(&target);
        let files = PollingController::new(fetcher_fn("system.files", move || {
            let client = files_client.clone();
            let requested = files_target
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            async move {
                let query = Query::new().with("path", &requested);
                fetch_system_files(&client, &query)
                    .await
                    .map(|payload| FileListing::from_payload(&requested, payload))
            }
        }));

        Self {
            disks,
            files,
            target,
            initial_path,
        }
    }

    pub async fn load_disks(&self) {
        self.disks.load().await;
    }

    /// List `path`; an empty path lists `/`
    pub async fn browse(&self, path: &str) {
        *self.target.lock().unwrap_or_else(PoisonError::into_inner) = normalize_path(path);
        self.files.load().await;
    }

    /// Directory of the last successful listing, else the initial path
    #[must_use]
    pub fn current_path(&self) -> String {
        self.files
            .snapshot()
            .data
            .map_or_else(|| self.initial_path.clone(), |listing| listing.path)
    }

    /// Browse the parent of the current directory, unless already at a root
    pub async fn go_parent(&self) {
        let current = self.current_path();
        let parent = resolve_parent_path(&current);
        if parent != current {
            self.browse(&parent).await;
        }
    }

    /// Refresh disks and the current directory concurrently
    pub async fn reload(&self) {
        let current = self.current_path();
        tokio::join!(self.load_disks(), self.browse(&current));
    }

    #[must_use]
    pub fn disks(&self) -> FetchState<Payload> {
        self.disks.snapshot()
    }

    #[must_use]
    pub fn files(&self) -> FetchState<FileListing> {
        self.files.snapshot()
    }

    #[must_use]
    pub fn subscribe_files(&self) -> watch::Receiver<FetchState<FileListing>> {
        self.files.subscribe()
    }
}
