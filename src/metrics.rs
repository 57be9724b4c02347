use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::db;

/// Row accounting for one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub source: String,
    pub loaded: usize,
    /// title or narasi missing
    pub dropped_missing: usize,
    /// rejected by the quality filter
    pub dropped_weird: usize,
    pub kept: usize,
    pub hoax: usize,
}

impl SourceStats {
    pub fn new(source: &str) -> Self {
        SourceStats {
            source: source.to_string(),
            ..Default::default()
        }
    }

    pub fn fact(&self) -> usize {
        self.kept - self.hoax
    }
}

pub struct RunTracker {
    run_id: String,
    sources: Vec<SourceStats>,
}

impl RunTracker {
    pub fn new(run_id: String) -> Self {
        RunTracker {
            run_id,
            sources: Vec::new(),
        }
    }

    pub fn record(&mut self, stats: SourceStats) {
        info!(
            source = %stats.source,
            loaded = stats.loaded,
            dropped_missing = stats.dropped_missing,
            dropped_weird = stats.dropped_weird,
            kept = stats.kept,
            hoax = stats.hoax,
            "source processed"
        );
        self.sources.push(stats);
    }

    pub fn persist(&self, conn: &Connection) -> Result<()> {
        for stats in &self.sources {
            db::insert_source_stats(conn, &self.run_id, stats)?;
        }
        Ok(())
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn sources(&self) -> &[SourceStats] {
        &self.sources
    }
}

pub fn new_run_id() -> String {
    format!("run-{}", chrono::Utc::now().format("%Y%m%dT%H%M%S"))
}
