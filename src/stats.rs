//! Per-file usage statistics and the background writer that records them.

use crate::store;
use crate::utils::file_name_of;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatsEntry {
    pub count: u64,
    pub last_used: f64,
}

/// Old files stored a bare use count per filename.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Full {
        #[serde(default)]
        count: u64,
        #[serde(default)]
        last_used: f64,
    },
    Count(u64),
}

impl<'de> Deserialize<'de> for StatsEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawEntry::deserialize(deserializer)? {
            RawEntry::Full { count, last_used } => StatsEntry { count, last_used },
            RawEntry::Count(count) => StatsEntry {
                count,
                last_used: 0.0,
            },
        })
    }
}

/// filename -> usage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats {
    entries: HashMap<String, StatsEntry>,
}

impl Stats {
    pub fn load(path: &Path) -> Self {
        store::read_json(path)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        store::write_json(path, self)
    }

    pub fn get(&self, filename: &str) -> StatsEntry {
        self.entries.get(filename).copied().unwrap_or_default()
    }

    pub fn count(&self, filename: &str) -> u64 {
        self.get(filename).count
    }

    pub fn last_used(&self, filename: &str) -> f64 {
        self.get(filename).last_used
    }

    pub fn record(&mut self, filename: &str, at: f64) {
        let entry = self.entries.entry(filename.to_string()).or_default();
        entry.count += 1;
        entry.last_used = at;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by use count, most used first.
    pub fn ranked(&self) -> Vec<(&str, StatsEntry)> {
        let mut ranked: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), *entry))
            .collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    #[cfg(test)]
    pub fn insert(&mut self, filename: &str, entry: StatsEntry) {
        self.entries.insert(filename.to_string(), entry);
    }
}

pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

enum StatsMessage {
    Record { filename: String, at: f64 },
    Flush(oneshot::Sender<()>),
}

/// Cheap handle for queueing record-use messages.
#[derive(Debug, Clone)]
pub struct StatsRecorder {
    tx: mpsc::UnboundedSender<StatsMessage>,
}

impl StatsRecorder {
    /// Queue one use of `path`, stamped now. Never blocks.
    pub fn record_use(&self, path: &Path) {
        self.record_use_at(path, unix_now());
    }

    pub fn record_use_at(&self, path: &Path, at: f64) {
        let filename = file_name_of(path);
        if filename.is_empty() {
            return;
        }
        if self.tx.send(StatsMessage::Record { filename, at }).is_err() {
            warn!(path = %path.display(), "stats writer stopped, use not recorded");
        }
    }
}

/// Owns the single task that serializes all stats read-modify-write cycles.
pub struct StatsWriter {
    recorder: StatsRecorder,
    task: JoinHandle<()>,
}

impl StatsWriter {
    /// Spawn the writer on the current tokio runtime.
    pub fn spawn(stats_file: PathBuf) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(writer_loop(stats_file, rx));
        Self {
            recorder: StatsRecorder { tx },
            task,
        }
    }

    pub fn recorder(&self) -> StatsRecorder {
        self.recorder.clone()
    }

    #[cfg(test)]
    pub fn record_use(&self, path: &Path) {
        self.recorder.record_use(path);
    }

    /// Wait until every message queued before this call has been written.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.recorder.tx.send(StatsMessage::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    /// Drain the queue and join the task. Outstanding recorder clones stop
    /// delivering once this returns.
    pub async fn shutdown(self) {
        self.flush().await;
        let StatsWriter { recorder, task } = self;
        drop(recorder);
        task.abort();
        let _ = task.await;
    }
}

async fn writer_loop(stats_file: PathBuf, mut rx: mpsc::UnboundedReceiver<StatsMessage>) {
    while let Some(message) = rx.recv().await {
        match message {
            StatsMessage::Record { filename, at } => {
                let path = stats_file.clone();
                let result =
                    tokio::task::spawn_blocking(move || record_on_disk(&path, &filename, at)).await;
                if let Err(err) = result {
                    warn!("stats write task failed: {err}");
                }
            }
            StatsMessage::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("stats writer finished");
}

fn record_on_disk(stats_file: &Path, filename: &str, at: f64) {
    let mut stats = Stats::load(stats_file);
    stats.record(filename, at);
    store::write_json_or_warn(stats_file, &stats);
    debug!(filename, "recorded wallpaper use");
}
