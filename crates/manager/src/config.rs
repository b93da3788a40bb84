use serde::{Deserialize, Serialize};

/// A safe default for the task queue buffer.
/// 128 is usually enough for registration bursts at startup.
const DEFAULT_QUEUE_CAPACITY: usize = 128;

/// Configuration for a [`Manager`](crate::Manager) instance.
///
/// All fields have sensible defaults; composition roots may fill this from
/// any config source via `serde`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ManagerConfig {
    /// Instance name used in log output.
    pub name: String,
    /// Bounded capacity of the sequential task queue.
    pub queue_capacity: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self { name: "entitle".to_owned(), queue_capacity: DEFAULT_QUEUE_CAPACITY }
    }
}

impl ManagerConfig {
    /// Clamps invalid settings to usable values.
    #[must_use]
    pub(crate) fn normalized(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = "entitle".to_owned();
        }
        self.queue_capacity = self.queue_capacity.max(1);
        self
    }
}
