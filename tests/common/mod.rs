//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `empty_workspace`: a temp directory with no candidate file
//! - `seeded_workspace`: a temp directory whose `storage/cached_ids.json` holds [`SEED_IDS`]
//!
//! # Test Doubles
//!
//! - [`ScriptedPicker`] replays a fixed list of picker events and records what the
//!   session asked it to show
//! - [`StubSource`] and [`StubBuilder`] stand in for the candidate file and the
//!   external index builder

use idpick::error::{BuildError, LoadError};
use idpick::session::Notice;
use idpick::{CandidateSource, IndexBuilder, Picker, PickerEvent, PickerItem, Workspace};
use rstest::fixture;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Ids written by the `seeded_workspace` fixture.
#[allow(dead_code)]
pub const SEED_IDS: &[&str] = &[
    "codetide.core.models",
    "codetide.core.defaults",
    "codetide.parsers.python",
    "codetide.search.engine",
];

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path string suitable for [`Workspace::open`].
    pub fn path_str(&self) -> String {
        self.root.display().to_string()
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Writes `ids` as a JSON array to the default candidate file.
    pub fn write_ids(&self, ids: &[&str]) {
        let json = serde_json::to_string(ids).expect("Failed to serialize ids");
        self.create_file("storage/cached_ids.json", &json);
    }

    /// Opens this directory as an idpick workspace.
    pub async fn open(&self) -> Workspace {
        Workspace::open(&self.path_str())
            .await
            .expect("Failed to open workspace")
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[fixture]
pub fn empty_workspace() -> TempWorkspace {
    TempWorkspace::new()
}

#[fixture]
pub fn seeded_workspace() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.write_ids(SEED_IDS);
    workspace
}

/// Picker that replays scripted events and records everything shown.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    events: VecDeque<PickerEvent>,
    pub value: String,
    pub items: Vec<PickerItem>,
    pub titles: Vec<String>,
    pub notices: Vec<Notice>,
    pub values_set: Vec<String>,
    pub closed: usize,
}

#[allow(dead_code)]
impl ScriptedPicker {
    pub fn new(events: impl IntoIterator<Item = PickerEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Labels of the currently displayed items.
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }

    /// Events not consumed by the session.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Picker for ScriptedPicker {
    async fn next_event(&mut self) -> Option<PickerEvent> {
        let event = self.events.pop_front()?;
        if let PickerEvent::ValueChanged(value) = &event {
            self.value.clone_from(value);
        }
        Some(event)
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        value.clone_into(&mut self.value);
        self.values_set.push(value.to_string());
    }

    fn set_items(&mut self, items: Vec<PickerItem>) {
        self.items = items;
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

/// Candidate source serving a sequence of payloads, one per fetch.
///
/// Once the sequence is exhausted every further fetch reports `NotFound`.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct StubSource {
    payloads: Mutex<VecDeque<Option<Value>>>,
    pub fetches: AtomicUsize,
}

#[allow(dead_code)]
impl StubSource {
    pub fn new(payloads: impl IntoIterator<Item = Option<Value>>) -> Self {
        Self {
            payloads: Mutex::new(payloads.into_iter().collect()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl CandidateSource for StubSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let next = self
            .payloads
            .lock()
            .expect("StubSource lock poisoned")
            .pop_front()
            .flatten();
        next.ok_or_else(|| LoadError::NotFound {
            path: PathBuf::from("storage/cached_ids.json"),
        })
    }
}

/// Index builder that records calls and succeeds or fails as configured.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct StubBuilder {
    succeed: bool,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubBuilder {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IndexBuilder for StubBuilder {
    async fn build(&self) -> Result<(), BuildError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.succeed {
            Ok(())
        } else {
            Err(BuildError::NotConfigured)
        }
    }
}
