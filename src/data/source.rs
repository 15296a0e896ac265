//! Results sources: column snapshots that polled curves read from.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use thiserror::Error;

/// Failure reported by a source while refreshing its snapshot.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Results reload failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Results reload failed: {0}")]
    Message(String),
}

/// Read-only mapping from column name to its ordered values.
///
/// Cloning is cheap: the columns are shared, so a snapshot handed out by a
/// source stays valid (and unchanged) after the source reloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    columns: Arc<HashMap<String, Vec<f64>>>,
}

impl Snapshot {
    pub fn new(columns: HashMap<String, Vec<f64>>) -> Self {
        Self {
            columns: Arc::new(columns),
        }
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (S, Vec<f64>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Holder of experiment results that curves poll.
///
/// `reload` may block on I/O; no timeout or cancellation is imposed by callers.
pub trait ResultsSource {
    /// Re-read the backing store and refresh the snapshot.
    fn reload(&mut self) -> Result<(), SourceError>;

    /// Current snapshot, consistent across columns at the moment of access.
    fn snapshot(&self) -> Snapshot;
}

impl<S: ResultsSource + ?Sized> ResultsSource for Rc<RefCell<S>> {
    fn reload(&mut self) -> Result<(), SourceError> {
        self.borrow_mut().reload()
    }

    fn snapshot(&self) -> Snapshot {
        self.borrow().snapshot()
    }
}

impl<S: ResultsSource + ?Sized> ResultsSource for Box<S> {
    fn reload(&mut self) -> Result<(), SourceError> {
        (**self).reload()
    }

    fn snapshot(&self) -> Snapshot {
        (**self).snapshot()
    }
}

/// In-memory results.
///
/// Columns written with [`set_column`](Self::set_column) are published
/// immediately. Columns written with [`stage_column`](Self::stage_column) only
/// become visible after the next `reload`, the way a file-backed source only
/// sees new rows once it re-reads its file.
#[derive(Debug, Default)]
pub struct MemoryResults {
    published: HashMap<String, Vec<f64>>,
    snapshot: Snapshot,
    staged: HashMap<String, Vec<f64>>,
    reloads: usize,
    fail_next: Option<String>,
}

impl MemoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or add) a column in the published snapshot.
    pub fn set_column<S: Into<String>>(&mut self, name: S, values: Vec<f64>) {
        self.published.insert(name.into(), values);
        self.snapshot = Snapshot::new(self.published.clone());
    }

    /// Append one row across several published columns.
    pub fn push_row(&mut self, row: &[(&str, f64)]) {
        for (name, v) in row {
            self.published.entry((*name).to_string()).or_default().push(*v);
        }
        self.snapshot = Snapshot::new(self.published.clone());
    }

    /// Write a column that becomes visible on the next successful reload.
    pub fn stage_column<S: Into<String>>(&mut self, name: S, values: Vec<f64>) {
        self.staged.insert(name.into(), values);
    }

    /// Make the next reload fail with `message` (staged data stays staged).
    pub fn fail_next_reload<S: Into<String>>(&mut self, message: S) {
        self.fail_next = Some(message.into());
    }

    /// Number of reload calls, failed ones included.
    pub fn reload_count(&self) -> usize {
        self.reloads
    }
}

impl ResultsSource for MemoryResults {
    fn reload(&mut self) -> Result<(), SourceError> {
        self.reloads += 1;
        if let Some(msg) = self.fail_next.take() {
            return Err(SourceError::Message(msg));
        }
        if !self.staged.is_empty() {
            self.published.extend(self.staged.drain());
            self.snapshot = Snapshot::new(self.published.clone());
        }
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_columns_appear_after_reload() {
        let mut res = MemoryResults::new();
        res.set_column("t", vec![0.0]);
        res.stage_column("t", vec![0.0, 1.0]);
        assert_eq!(res.snapshot().column("t"), Some(&[0.0][..]));

        res.reload().unwrap();
        assert_eq!(res.snapshot().column("t"), Some(&[0.0, 1.0][..]));
        assert_eq!(res.reload_count(), 1);
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let mut res = MemoryResults::new();
        res.set_column("v", vec![1.0]);
        res.stage_column("v", vec![2.0]);
        res.fail_next_reload("disk gone");

        let err = res.reload().unwrap_err();
        assert_eq!(err.to_string(), "Results reload failed: disk gone");
        assert_eq!(res.snapshot().column("v"), Some(&[1.0][..]));

        res.reload().unwrap();
        assert_eq!(res.snapshot().column("v"), Some(&[2.0][..]));
    }

    #[test]
    fn old_snapshot_is_not_affected_by_later_writes() {
        let mut res = MemoryResults::new();
        res.push_row(&[("x", 1.0), ("y", 10.0)]);
        let before = res.snapshot();
        res.push_row(&[("x", 2.0), ("y", 20.0)]);
        assert_eq!(before.column("x"), Some(&[1.0][..]));
        assert_eq!(res.snapshot().column("y"), Some(&[10.0, 20.0][..]));
    }

    #[test]
    fn shared_source_reloads_through_rc() {
        let shared = Rc::new(RefCell::new(MemoryResults::new()));
        let mut handle = Rc::clone(&shared);
        handle.reload().unwrap();
        assert_eq!(shared.borrow().reload_count(), 1);
    }
}
