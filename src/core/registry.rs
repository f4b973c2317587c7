//! Per-guild running-task tracking.
//!
//! The registry is an advisory lock set: the scheduler and the manual
//! `update` command both register a marker while a delivery is in flight,
//! and the manual command refuses to start while one is present. It is a
//! service object injected where needed, not a global, and markers are
//! released through an RAII guard so every exit path — including error
//! paths — clears them.

use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Marker name used by the delivery engine.
pub const DELIVERY_TASK: &str = "deliver";

/// Tracks which named tasks are currently running per guild.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: DashMap<i64, HashSet<String>>,
}

impl TaskRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a task marker for a guild and returns a guard that removes
    /// it when dropped.
    #[must_use]
    pub fn begin(self: &Arc<Self>, guild_discord_id: i64, task: &str) -> TaskGuard {
        self.tasks
            .entry(guild_discord_id)
            .or_default()
            .insert(task.to_string());
        TaskGuard {
            registry: Arc::clone(self),
            guild_discord_id,
            task: task.to_string(),
        }
    }

    /// Whether the named task is currently running for the guild.
    #[must_use]
    pub fn is_running(&self, guild_discord_id: i64, task: &str) -> bool {
        self.tasks
            .get(&guild_discord_id)
            .is_some_and(|markers| markers.contains(task))
    }

    fn finish(&self, guild_discord_id: i64, task: &str) {
        if let Some(mut markers) = self.tasks.get_mut(&guild_discord_id) {
            markers.remove(task);
        }
        // Drop the entry once its marker set empties; the get_mut guard above
        // must be out of scope before this runs.
        self.tasks
            .remove_if(&guild_discord_id, |_, markers| markers.is_empty());
    }
}

/// Removes its task marker on drop, no matter how the task ended.
#[derive(Debug)]
pub struct TaskGuard {
    registry: Arc<TaskRegistry>,
    guild_discord_id: i64,
    task: String,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.registry.finish(self.guild_discord_id, &self.task);
    }
}
