//! Whole-workspace snapshots and their on-disk store.
//!
//! Each record set lives in its own JSON file inside the data directory.
//! Saving always writes every file, including empty collections, so that
//! clearing a collection is persisted too.

use crate::{
    identity::domain::{Session, User},
    notification::domain::Notification,
    project::domain::{Invitation, Project},
    task::domain::Task,
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::io;
use thiserror::Error;
use tracing::{debug, info};

const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";
const PROJECTS_FILE: &str = "projects.json";
const INVITATIONS_FILE: &str = "invitations.json";
const NOTIFICATIONS_FILE: &str = "notifications.json";
const TASKS_FILE: &str = "tasks.json";

/// Full logical state of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    /// Accounts in registration order.
    pub users: Vec<User>,
    /// The persisted session, if someone was logged in.
    pub session: Option<Session>,
    /// Projects in creation order.
    pub projects: Vec<Project>,
    /// Pending invitations in send order.
    pub invitations: Vec<Invitation>,
    /// Notifications in delivery order.
    pub notifications: Vec<Notification>,
    /// Tasks in creation order.
    pub tasks: Vec<Task>,
}

/// Errors raised while reading or writing snapshot files.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem access failed.
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        /// File or directory involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A record set could not be encoded or decoded.
    #[error("snapshot file {path} is not valid: {source}")]
    Json {
        /// File involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and writes snapshots in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStore {
    dir: Utf8PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at `dir`. Nothing is touched until the first
    /// load or save.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Loads every record set. Missing files, or a missing directory, load
    /// as empty collections.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when a file cannot be read or decoded.
    pub fn load(&self) -> Result<WorkspaceSnapshot, SnapshotError> {
        let dir = match Dir::open_ambient_dir(&self.dir, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %self.dir, "no snapshot directory; starting empty");
                return Ok(WorkspaceSnapshot::default());
            }
            Err(err) => return Err(self.io_error(None, err)),
        };

        let snapshot = WorkspaceSnapshot {
            users: self.read(&dir, USERS_FILE)?.unwrap_or_default(),
            session: self.read::<Option<Session>>(&dir, SESSION_FILE)?.flatten(),
            projects: self.read(&dir, PROJECTS_FILE)?.unwrap_or_default(),
            invitations: self.read(&dir, INVITATIONS_FILE)?.unwrap_or_default(),
            notifications: self.read(&dir, NOTIFICATIONS_FILE)?.unwrap_or_default(),
            tasks: self.read(&dir, TASKS_FILE)?.unwrap_or_default(),
        };
        info!(
            dir = %self.dir,
            users = snapshot.users.len(),
            projects = snapshot.projects.len(),
            tasks = snapshot.tasks.len(),
            "loaded workspace snapshot"
        );
        Ok(snapshot)
    }

    /// Writes every record set, creating the directory when needed.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when a file cannot be encoded or written.
    pub fn save(&self, snapshot: &WorkspaceSnapshot) -> Result<(), SnapshotError> {
        Dir::create_ambient_dir_all(&self.dir, ambient_authority())
            .map_err(|err| self.io_error(None, err))?;
        let dir = Dir::open_ambient_dir(&self.dir, ambient_authority())
            .map_err(|err| self.io_error(None, err))?;

        self.write(&dir, USERS_FILE, &snapshot.users)?;
        self.write(&dir, SESSION_FILE, &snapshot.session)?;
        self.write(&dir, PROJECTS_FILE, &snapshot.projects)?;
        self.write(&dir, INVITATIONS_FILE, &snapshot.invitations)?;
        self.write(&dir, NOTIFICATIONS_FILE, &snapshot.notifications)?;
        self.write(&dir, TASKS_FILE, &snapshot.tasks)?;
        info!(dir = %self.dir, "saved workspace snapshot");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, dir: &Dir, file: &str) -> Result<Option<T>, SnapshotError> {
        let contents = match dir.read_to_string(file) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(Some(file), err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| SnapshotError::Json {
                path: self.dir.join(file),
                source,
            })
    }

    fn write<T: Serialize>(&self, dir: &Dir, file: &str, records: &T) -> Result<(), SnapshotError> {
        let encoded =
            serde_json::to_string_pretty(records).map_err(|source| SnapshotError::Json {
                path: self.dir.join(file),
                source,
            })?;
        let staging = format!("{file}.tmp");
        dir.write(&staging, encoded)
            .map_err(|err| self.io_error(Some(&staging), err))?;
        dir.rename(&staging, dir, file)
            .map_err(|err| self.io_error(Some(file), err))?;
        Ok(())
    }

    fn io_error(&self, file: Option<&str>, source: io::Error) -> SnapshotError {
        let path = file.map_or_else(|| self.dir.clone(), |name| self.dir.join(name));
        SnapshotError::Io { path, source }
    }
}
