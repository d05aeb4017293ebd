//! Path sets, batches, and the CDN wire shapes they serialize to.
//!
//! The host hands over loosely-shaped JSON (`{"Paths": {"Items": [...]}}`);
//! everything past this module works with typed values validated here.

use serde::{Deserialize, Serialize};

/// The full-distribution wildcard. A batch containing it is never
/// auto-scheduled: purging everything is a deliberate, immediate act.
pub const WILDCARD_PATH: &str = "/*";

/// Wire form of a path list: `{"Items": [...], "Quantity": n}`.
/// `Quantity` is derived from `Items` on the way out and ignored on the
/// way in, so a stale count in stored data cannot lie to us.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WirePaths {
    #[serde(rename = "Items", default)]
    items: Vec<String>,
    #[serde(rename = "Quantity", default)]
    quantity: usize,
}

/// An ordered set of invalidation paths. Insertion order is kept for
/// readable logs and stable serialization; duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WirePaths", into = "WirePaths")]
pub struct PathSet {
    items: Vec<String>,
}

impl PathSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path; returns whether it was new.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.items.contains(&path) {
            return false;
        }
        self.items.push(path);
        true
    }

    /// Union another set into this one.
    pub fn merge(&mut self, other: &PathSet) {
        for path in &other.items {
            self.insert(path.clone());
        }
    }

    /// Whether the set contains the full-distribution wildcard.
    #[must_use]
    pub fn contains_wildcard(&self) -> bool {
        self.items.iter().any(|path| path == WILDCARD_PATH)
    }

    /// Whether the set holds no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The paths, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl From<WirePaths> for PathSet {
    fn from(wire: WirePaths) -> Self {
        let mut set = PathSet::new();
        for path in wire.items {
            set.insert(path);
        }
        set
    }
}

impl From<PathSet> for WirePaths {
    fn from(set: PathSet) -> Self {
        WirePaths {
            quantity: set.items.len(),
            items: set.items,
        }
    }
}

impl<S: Into<String>> FromIterator<S> for PathSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = PathSet::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

/// The loosely-shaped invalidation request arriving from the host's
/// event source, reduced to its path list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvalidationQuery {
    /// Paths to purge; absent in the wire form reads as empty.
    #[serde(rename = "Paths", default)]
    pub paths: PathSet,
}

/// The unit persisted while awaiting flush: accumulated paths plus the
/// caller reference the CDN uses to de-duplicate submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidationBatch {
    /// Accumulated paths.
    #[serde(rename = "Paths", default)]
    pub paths: PathSet,
    /// Identity of this batch across the CDN API.
    #[serde(rename = "CallerReference")]
    pub caller_reference: String,
}

impl InvalidationBatch {
    /// Open a new batch for the given paths.
    pub fn new(paths: PathSet) -> Self {
        Self {
            paths,
            caller_reference: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Union more paths into the batch, keeping its identity.
    pub fn merge(&mut self, paths: &PathSet) {
        self.paths.merge(paths);
    }
}

/// A fully-resolved CDN invalidation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationRequest {
    /// Target distribution.
    #[serde(rename = "DistributionId")]
    pub distribution_id: String,
    /// The batch to purge.
    #[serde(rename = "InvalidationBatch")]
    pub batch: InvalidationBatch,
}

/// The CDN's raw answer, passed through without interpretation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvalidationReceipt {
    /// Identifier the CDN assigned to the invalidation, when given.
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    /// Reported state, e.g. `InProgress`, when given.
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}
