use std::collections::{BTreeMap, HashMap};
use std::task::Poll;

use crate::{
    foundation::core::Millis,
    foundation::error::{PlayerError, PlayerResult},
    scene::model::Marker,
};

/// Backend that returns the markers of a scene (`getMarkers(sceneId)`).
///
/// Fetching is split into `request` and `poll` so a host can back it with a network call
/// while the engine keeps ticking on a single thread.
pub trait MarkerSource {
    /// Start fetching markers for `scene_id`, superseding any outstanding request.
    fn request(&mut self, scene_id: &str);

    /// Poll the outstanding request for `scene_id`.
    fn poll(&mut self, scene_id: &str) -> Poll<PlayerResult<Vec<Marker>>>;
}

/// In-memory marker source answering every request immediately.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMarkerSource {
    by_scene: BTreeMap<String, Vec<Marker>>,
}

impl InMemoryMarkerSource {
    /// Build from a `scene id -> markers` table.
    pub fn new(by_scene: BTreeMap<String, Vec<Marker>>) -> Self {
        Self { by_scene }
    }

    /// Add or replace the markers of one scene.
    pub fn insert(&mut self, scene_id: impl Into<String>, markers: Vec<Marker>) {
        self.by_scene.insert(scene_id.into(), markers);
    }
}

impl MarkerSource for InMemoryMarkerSource {
    fn request(&mut self, _scene_id: &str) {}

    fn poll(&mut self, scene_id: &str) -> Poll<PlayerResult<Vec<Marker>>> {
        Poll::Ready(Ok(self.by_scene.get(scene_id).cloned().unwrap_or_default()))
    }
}

/// Load state of the active scene's markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MarkerStatus {
    /// No scene has been loaded.
    #[default]
    Idle,
    /// Fetch in flight; every marker is unresolved ("no markers yet").
    Pending,
    /// Markers loaded; `resolved` of them carry a timestamp.
    Ready {
        /// Number of markers with a timestamp.
        resolved: usize,
    },
    /// Fetch failed; playback continues with an empty marker set.
    Failed,
}

/// Outcome of one [`MarkerResolver::poll`].
#[derive(Debug)]
pub enum MarkerUpdate {
    /// Nothing new.
    Unchanged,
    /// The marker set was replaced.
    Loaded {
        /// Number of markers with a timestamp.
        resolved: usize,
    },
    /// The fetch failed; the resolver now holds an empty set.
    Failed(PlayerError),
}

/// Resolves marker ids of the active scene to timestamps.
///
/// The resolver holds exactly one scene's snapshot. [`MarkerResolver::begin_load`] discards the
/// previous snapshot synchronously so no stale timestamp can leak into the next scene.
#[derive(Clone, Debug, Default)]
pub struct MarkerResolver {
    scene_id: Option<String>,
    status: MarkerStatus,
    timestamps: HashMap<String, Millis>,
    generation: u64,
}

impl MarkerResolver {
    /// Empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene whose markers are loaded (or loading).
    pub fn scene_id(&self) -> Option<&str> {
        self.scene_id.as_deref()
    }

    /// Current load status.
    pub fn status(&self) -> MarkerStatus {
        self.status
    }

    /// Incremented every time the resolvable set changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Timestamp of `marker_id`, if loaded and resolved by the backend.
    pub fn resolve(&self, marker_id: &str) -> Option<Millis> {
        self.timestamps.get(marker_id).copied()
    }

    /// Resolvable markers as a `marker id -> timestamp` map.
    pub fn snapshot(&self) -> BTreeMap<String, Millis> {
        self.timestamps
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Drop every marker and forget the scene.
    pub fn clear(&mut self) {
        self.scene_id = None;
        self.status = MarkerStatus::Idle;
        self.replace(HashMap::new());
    }

    /// Discard the current snapshot and request markers for `scene_id`.
    #[tracing::instrument(skip(self, source))]
    pub fn begin_load(&mut self, scene_id: &str, source: &mut dyn MarkerSource) {
        self.scene_id = Some(scene_id.to_owned());
        self.status = MarkerStatus::Pending;
        self.replace(HashMap::new());
        source.request(scene_id);
    }

    /// Poll the outstanding fetch, installing the result when it arrives.
    pub fn poll(&mut self, source: &mut dyn MarkerSource) -> MarkerUpdate {
        if self.status != MarkerStatus::Pending {
            return MarkerUpdate::Unchanged;
        }
        let Some(scene_id) = self.scene_id.clone() else {
            return MarkerUpdate::Unchanged;
        };

        match source.poll(&scene_id) {
            Poll::Pending => MarkerUpdate::Unchanged,
            Poll::Ready(Ok(markers)) => {
                let resolved = self.install(&scene_id, markers);
                MarkerUpdate::Loaded { resolved }
            }
            Poll::Ready(Err(err)) => {
                tracing::warn!(scene = %scene_id, error = %err, "marker fetch failed, continuing without markers");
                self.status = MarkerStatus::Failed;
                self.replace(HashMap::new());
                MarkerUpdate::Failed(err)
            }
        }
    }

    /// `load(sceneId)`: request and poll once; synchronous sources finish immediately.
    pub fn load(&mut self, scene_id: &str, source: &mut dyn MarkerSource) -> MarkerUpdate {
        self.begin_load(scene_id, source);
        self.poll(source)
    }

    fn install(&mut self, scene_id: &str, markers: Vec<Marker>) -> usize {
        let mut timestamps = HashMap::with_capacity(markers.len());
        for m in markers {
            let Some(ts) = m.timestamp_ms else {
                tracing::debug!(scene = %scene_id, marker = %m.id, "marker has no timestamp yet");
                continue;
            };
            if timestamps.contains_key(&m.id) {
                tracing::warn!(scene = %scene_id, marker = %m.id, "duplicate marker id, keeping first");
                continue;
            }
            timestamps.insert(m.id, ts);
        }
        let resolved = timestamps.len();
        self.status = MarkerStatus::Ready { resolved };
        self.replace(timestamps);
        tracing::debug!(scene = %scene_id, resolved, "markers loaded");
        resolved
    }

    fn replace(&mut self, timestamps: HashMap<String, Millis>) {
        self.timestamps = timestamps;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markers/resolver.rs"]
mod tests;
