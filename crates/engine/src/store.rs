//! Concurrent group store: the aggregation state behind the live table.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::keys;
use crate::matcher;
use crate::record::{self, Record};
use crate::trend::{TrendWindow, TREND_BUCKETS};

/// One cluster of near-duplicate records: a row in the live table.
pub struct Group {
    latest: Record,
    canonical: String,
    count: u64,
    trend: TrendWindow,
}

impl Group {
    fn new(latest: Record, canonical: String) -> Self {
        let mut trend = TrendWindow::new(TREND_BUCKETS);
        trend.record_hit();
        Self {
            latest,
            canonical,
            count: 1,
            trend,
        }
    }

    /// The most recent record folded into this group.
    pub fn latest(&self) -> &Record {
        &self.latest
    }

    /// Cumulative hits. Never decreases while the process lives.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arrival counts for the trailing trend duration.
    pub fn trend(&self) -> &TrendWindow {
        &self.trend
    }

    /// Owned copy of everything a caller may need after its guard drops.
    #[must_use]
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            record: self.latest.clone(),
            count: self.count,
            trend: self.trend.counts(),
        }
    }
}

/// Detached copy of one group's visible state, see [`Group::snapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct GroupSnapshot {
    pub record: Record,
    pub count: u64,
    /// Bucket counts, most recent first.
    pub trend: Vec<u64>,
}

/// Group list plus the frozen key set. Only reachable through a [`Store`]
/// lock guard, so every multi-step sequence a caller composes runs under
/// one consistent view.
pub struct State {
    keys: Vec<String>,
    distance: usize,
    groups: Vec<Group>,
}

impl State {
    /// Fold one record in: bump the closest group within the edit distance
    /// threshold, or append a new group. Derives the key set from the
    /// record if none is established yet.
    pub fn push(&mut self, record: Record) {
        if self.keys.is_empty() {
            self.keys = keys::derive(&record);
            if !self.keys.is_empty() {
                log::info!("derived key set from first record: {:?}", self.keys);
            }
        }

        let canonical = record::canonical(&record, &self.keys);
        let found = matcher::best_match(
            &canonical,
            self.groups.iter().map(|g| g.canonical.as_str()),
            self.distance,
        );
        match found {
            Some(idx) => {
                let group = &mut self.groups[idx];
                group.latest = record;
                group.canonical = canonical;
                group.count += 1;
                group.trend.record_hit();
            }
            None => self.groups.push(Group::new(record, canonical)),
        }
    }

    /// Rotate every group's trend window forward by one bucket.
    pub fn shift(&mut self) {
        for group in &mut self.groups {
            group.trend.advance();
        }
    }

    /// Freeze the key set explicitly. Ignored with a warning once keys are
    /// established; the key set is immutable for the process lifetime.
    pub fn set_keys(&mut self, keys: Vec<String>) {
        if !self.keys.is_empty() {
            log::warn!("ignoring key change, key set is frozen: {:?}", self.keys);
            return;
        }
        self.keys = keys;
    }

    /// The established key set. Empty until the first record arrives or
    /// keys are set explicitly.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Group at creation index `i`. Indices are stable: groups are only
    /// ever appended.
    pub fn get(&self, i: usize) -> Option<&Group> {
        self.groups.get(i)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// The aggregation engine: an append-only group list behind one
/// store-wide reader-writer lock.
///
/// Ingestion and the shift timer take the write guard, renders and detail
/// lookups share the read guard. A guard spans exactly the sequence the
/// caller composes; anything needed after release must be copied out
/// first, since a concurrent writer may touch the same group immediately.
pub struct Store {
    config: Config,
    state: RwLock<State>,
}

impl Store {
    /// Validate `config` and build an empty store.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let state = State {
            keys: config.keys.clone(),
            distance: config.distance,
            groups: Vec::new(),
        };
        Ok(Self {
            config,
            state: RwLock::new(state),
        })
    }

    /// Shared access for reads. Many readers may hold this at once.
    pub fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read()
    }

    /// Exclusive access for `push`, `shift` and `set_keys`.
    pub fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
