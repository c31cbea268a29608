use std::collections::BTreeSet;

use crate::{
    foundation::core::{Millis, secs_bucket},
    markers::resolver::MarkerResolver,
    scene::model::AnimationBehavior,
};

#[derive(Clone, Debug)]
struct VisibilityEntry {
    start: Option<String>,
    end: Option<String>,
    behavior: AnimationBehavior,
    visible: bool,
}

impl VisibilityEntry {
    fn matches(&self, start: Option<&str>, end: Option<&str>, behavior: AnimationBehavior) -> bool {
        self.behavior == behavior && self.start.as_deref() == start && self.end.as_deref() == end
    }
}

/// Marker-window visibility memoized per whole second of play-head time.
///
/// Entries only live for one bucket: crossing into another second (or a change of the
/// marker set) drops the whole table. A bucket holds one entry per distinct marker window of
/// the active scene; lookups compare borrowed ids and only a miss stores owned copies.
#[derive(Clone, Debug, Default)]
pub struct VisibilityCache {
    bucket: Option<u64>,
    marker_generation: u64,
    entries: Vec<VisibilityEntry>,
    hits: u64,
    misses: u64,
}

impl VisibilityCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// `isVisible(start?, end?, behavior, t)` against the markers held by `markers`.
    pub fn is_visible(
        &mut self,
        start_marker_id: Option<&str>,
        end_marker_id: Option<&str>,
        behavior: AnimationBehavior,
        t_secs: f64,
        markers: &MarkerResolver,
    ) -> bool {
        if start_marker_id.is_none() && end_marker_id.is_none() {
            return true;
        }

        let bucket = secs_bucket(t_secs);
        if self.bucket != Some(bucket) || self.marker_generation != markers.generation() {
            self.entries.clear();
            self.bucket = Some(bucket);
            self.marker_generation = markers.generation();
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.matches(start_marker_id, end_marker_id, behavior))
        {
            self.hits += 1;
            return entry.visible;
        }

        self.misses += 1;
        let visible = decide_visibility(
            start_marker_id.and_then(|id| markers.resolve(id)),
            end_marker_id.and_then(|id| markers.resolve(id)),
            behavior,
            bucket,
        );
        self.entries.push(VisibilityEntry {
            start: start_marker_id.map(str::to_owned),
            end: end_marker_id.map(str::to_owned),
            behavior,
            visible,
        });
        visible
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.bucket = None;
    }

    /// Number of cached decisions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bucket the cached entries belong to.
    pub fn bucket(&self) -> Option<u64> {
        self.bucket
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Marker ids appearing in cached keys.
    pub fn cached_marker_ids(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .flat_map(|e| e.start.iter().chain(e.end.iter()))
            .cloned()
            .collect()
    }
}

/// Pure visibility rule on whole-second buckets.
///
/// Unresolved timestamps leave their bound unapplied; the end bound dominates the start bound.
/// `behavior` selects which bounds apply at all.
pub fn decide_visibility(
    start: Option<Millis>,
    end: Option<Millis>,
    behavior: AnimationBehavior,
    bucket: u64,
) -> bool {
    let start = start.filter(|_| behavior.has_enter());
    let end = end.filter(|_| behavior.has_exit());

    if let Some(end) = end
        && bucket >= end.whole_secs()
    {
        return false;
    }
    start.is_none_or(|start| bucket >= start.whole_secs())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/visibility.rs"]
mod tests;
