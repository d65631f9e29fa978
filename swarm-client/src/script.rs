use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Context, Result};
use swarm_shared::{Command, ScriptedCommand};

/// Interactions queued by frame number.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pending: VecDeque<ScriptedCommand>,
}

impl Script {
    pub fn new(mut entries: Vec<ScriptedCommand>) -> Self {
        // Stable, so same-frame commands keep file order.
        entries.sort_by_key(|entry| entry.tick);
        Self {
            pending: entries.into(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let entries: Vec<ScriptedCommand> =
            serde_json::from_str(text).context("Invalid script JSON")?;
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_json(&text)
            .with_context(|| format!("Failed to parse script {}", path.display()))?;
        log::info!("Loaded {} scripted commands from {}", script.len(), path.display());
        Ok(script)
    }

    /// Removes and returns every command scheduled at or before `frame`.
    pub fn take_due(&mut self, frame: u64) -> Vec<Command> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|entry| entry.tick <= frame) {
            if let Some(entry) = self.pending.pop_front() {
                due.push(entry.command);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
