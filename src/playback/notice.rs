/// Category of a transient, non-fatal message shown over the preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A scene was skipped because it lacks script, duration or narration.
    ContentMissing,
    /// Markers could not be fetched; marker-gated elements degrade.
    MarkersUnavailable,
    /// Narration could not be played.
    AudioFailed,
    /// Navigation found no playable scene in the requested direction.
    NoPlayableScene,
}

/// A message with a remaining time-to-live.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Notice {
    /// Identifier, unique per board.
    pub id: u64,
    /// Category.
    pub kind: NoticeKind,
    /// User-facing text.
    pub message: String,
    /// Milliseconds until auto-dismiss.
    pub remaining_ms: f64,
}

/// Active notices, counted down by elapsed time.
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    ttl_ms: f64,
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    /// Board whose notices live `ttl_ms` milliseconds.
    pub fn new(ttl_ms: f64) -> Self {
        Self {
            ttl_ms,
            next_id: 1,
            notices: Vec::new(),
        }
    }

    /// Post a notice. An identical active notice is refreshed instead of duplicated.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let message = message.into();
        if let Some(n) = self
            .notices
            .iter_mut()
            .find(|n| n.kind == kind && n.message == message)
        {
            n.remaining_ms = self.ttl_ms;
            return n.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            kind,
            message,
            remaining_ms: self.ttl_ms,
        });
        id
    }

    /// Count down by `delta_ms` and drop expired notices.
    pub fn tick(&mut self, delta_ms: f64) {
        if !(delta_ms.is_finite() && delta_ms > 0.0) {
            return;
        }
        for n in &mut self.notices {
            n.remaining_ms -= delta_ms;
        }
        self.notices.retain(|n| n.remaining_ms > 0.0);
    }

    /// Dismiss one notice early.
    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Drop every notice.
    pub fn clear(&mut self) {
        self.notices.clear();
    }

    /// Active notices, oldest first.
    pub fn active(&self) -> &[Notice] {
        &self.notices
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/notice.rs"]
mod tests;
