use crate::{
    foundation::error::{PlayerError, PlayerResult},
    scene::model::{MissingContent, Scene},
};

/// Scan direction through the scene list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

/// Why a scene was passed over during a scan.
#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// The scene lacks content required for playback.
    Missing(Vec<MissingContent>),
    /// The scene failed structural validation.
    Invalid(String),
}

impl SkipReason {
    /// User-facing description.
    pub fn describe(&self) -> String {
        match self {
            Self::Missing(missing) => {
                let labels: Vec<&str> = missing.iter().map(|m| m.label()).collect();
                format!("missing {}", labels.join(", "))
            }
            Self::Invalid(msg) => msg.clone(),
        }
    }
}

/// A scene skipped on the way to a selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedScene {
    /// Index in the scene list.
    pub index: usize,
    /// Scene id.
    pub scene_id: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a successful scan.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Index of the selected scene.
    pub index: usize,
    /// Unplayable scenes passed over, in scan order.
    pub skipped: Vec<SkippedScene>,
}

/// Why `scene` cannot become active, `None` when it can.
pub fn unplayable_reason(scene: &Scene) -> Option<SkipReason> {
    let missing = scene.missing_content();
    if !missing.is_empty() {
        return Some(SkipReason::Missing(missing));
    }
    scene
        .validate()
        .err()
        .map(|err| SkipReason::Invalid(err.to_string()))
}

/// Ordered scene list with a cursor on the active scene.
#[derive(Clone, Debug, Default)]
pub struct SceneNavigator {
    scenes: Vec<Scene>,
    index: Option<usize>,
}

impl SceneNavigator {
    /// Navigator over `scenes` with no active scene yet.
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            index: None,
        }
    }

    /// All scenes, in order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Index of the active scene.
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    /// Active scene.
    pub fn current(&self) -> Option<&Scene> {
        self.index.and_then(|i| self.scenes.get(i))
    }

    /// Activate the first playable scene at or after `start_index`.
    pub fn select(&mut self, start_index: usize) -> PlayerResult<Selection> {
        if start_index >= self.scenes.len() {
            return Err(PlayerError::navigation(format!(
                "start index {start_index} out of range for {} scenes",
                self.scenes.len()
            )));
        }
        let sel = self.find_playable(start_index, Direction::Forward)?;
        self.index = Some(sel.index);
        Ok(sel)
    }

    /// Move to the next playable scene after the active one.
    pub fn next(&mut self) -> PlayerResult<Selection> {
        self.step(Direction::Forward)
    }

    /// Move to the previous playable scene before the active one.
    pub fn prev(&mut self) -> PlayerResult<Selection> {
        self.step(Direction::Backward)
    }

    /// Scan from `from` (inclusive) in `direction` without changing the cursor.
    pub fn find_playable(&self, from: usize, direction: Direction) -> PlayerResult<Selection> {
        let candidates: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Forward => Box::new(from..self.scenes.len()),
            Direction::Backward => {
                let last = self.scenes.len().saturating_sub(1);
                Box::new((0..=from.min(last)).rev())
            }
        };

        let mut skipped = Vec::new();
        for index in candidates {
            let Some(scene) = self.scenes.get(index) else {
                break;
            };
            match unplayable_reason(scene) {
                None => return Ok(Selection { index, skipped }),
                Some(reason) => {
                    tracing::debug!(scene = %scene.id, index, reason = %reason.describe(), "skipping unplayable scene");
                    skipped.push(SkippedScene {
                        index,
                        scene_id: scene.id.clone(),
                        reason,
                    });
                }
            }
        }

        let dir = match direction {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        };
        Err(PlayerError::navigation(format!(
            "no playable scene {dir} of index {from}"
        )))
    }

    fn step(&mut self, direction: Direction) -> PlayerResult<Selection> {
        let Some(current) = self.index else {
            return Err(PlayerError::navigation("no active scene"));
        };
        let from = match direction {
            Direction::Forward => current + 1,
            Direction::Backward => match current.checked_sub(1) {
                Some(i) => i,
                None => {
                    return Err(PlayerError::navigation(
                        "no playable scene backward of the first scene",
                    ));
                }
            },
        };
        let sel = self.find_playable(from, direction)?;
        self.index = Some(sel.index);
        Ok(sel)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/navigator.rs"]
mod tests;
