use std::collections::BTreeSet;

use crate::foundation::{
    core::{AspectRatio, Canvas, Millis, Rect},
    error::{PlayerError, PlayerResult},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One scene of a video project as handed over by the editor.
///
/// Scenes are read-only inside the engine. Geometry is expressed in canonical canvas units
/// selected by [`Scene::aspect_ratio`], never in surface pixels.
pub struct Scene {
    /// Opaque scene identifier (also the marker-fetch key).
    pub id: String,
    /// Aspect ratio selecting the canonical canvas.
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    /// Scene background.
    #[serde(default)]
    pub background: Background,
    /// Visual elements (text, image, video, shape).
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Optional presenter avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Element>,
    /// Narration script text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Narration audio reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<Narration>,
    /// Fixed scene duration in seconds; authoritative when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Scene background fill.
pub enum Background {
    /// Solid color, straight-alpha RGBA8.
    Color {
        /// Color channels.
        rgba8: [u8; 4],
    },
    /// Still image stretched to the canvas.
    Image {
        /// Image URL.
        source: String,
    },
    /// Looping background video.
    Video {
        /// Video URL.
        source: String,
    },
}

impl Default for Background {
    fn default() -> Self {
        Self::Color {
            rgba8: [0, 0, 0, 255],
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Narration audio reference.
pub struct Narration {
    /// Audio URL playable by the host's audio primitive.
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A positioned visual element.
pub struct Element {
    /// Element identifier, unique within its scene.
    pub id: String,
    /// Content of the element.
    pub kind: ElementKind,
    /// Left edge in canonical units.
    pub x: f64,
    /// Top edge in canonical units.
    pub y: f64,
    /// Width in canonical units.
    pub width: f64,
    /// Height in canonical units.
    pub height: f64,
    /// Clockwise rotation in degrees around the element center.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Painter's order; higher draws later.
    #[serde(default)]
    pub z_index: i32,
    /// Entry/exit animation attributes.
    #[serde(default)]
    pub animation: AnimationSpec,
}

impl Element {
    /// Canonical bounding rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Element payload.
pub enum ElementKind {
    /// Styled text.
    Text {
        /// Text content.
        text: String,
        /// Font size in canonical units.
        font_size: f64,
        /// Straight-alpha RGBA8 text color.
        #[serde(default = "default_text_color_rgba8")]
        color_rgba8: [u8; 4],
    },
    /// Raster image.
    Image {
        /// Image URL.
        source: String,
    },
    /// Video overlay.
    Video {
        /// Video URL.
        source: String,
    },
    /// Vector shape.
    Shape {
        /// Shape outline.
        shape: ShapeKind,
        /// Straight-alpha RGBA8 fill.
        fill_rgba8: [u8; 4],
    },
    /// Presenter avatar.
    Avatar {
        /// Avatar media URL.
        source: String,
    },
}

fn default_text_color_rgba8() -> [u8; 4] {
    [255, 255, 255, 255]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Outline of a shape element.
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rectangle,
    /// Ellipse inscribed in the element rectangle.
    Ellipse,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Marker-driven entry/exit animation attributes of an element.
pub struct AnimationSpec {
    /// Transition style.
    #[serde(default)]
    pub kind: AnimationKind,
    /// Which edges of the visible window animate.
    #[serde(default)]
    pub behavior: AnimationBehavior,
    /// Slide direction (ignored for fades).
    #[serde(default)]
    pub direction: SlideDirection,
    /// Marker whose timestamp starts the element's visible window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_marker_id: Option<String>,
    /// Marker whose timestamp ends the element's visible window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_marker_id: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Transition style.
pub enum AnimationKind {
    /// No transition; the element is drawn with the identity style.
    #[default]
    None,
    /// Opacity ramp.
    Fade,
    /// Offset ramp plus opacity ramp.
    Slide,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which edges of the visible window are bound and animated.
pub enum AnimationBehavior {
    /// Start marker only.
    Enter,
    /// End marker only.
    Exit,
    /// Both markers.
    #[default]
    Both,
}

impl AnimationBehavior {
    /// `true` when the start marker bounds the element.
    pub fn has_enter(self) -> bool {
        matches!(self, Self::Enter | Self::Both)
    }

    /// `true` when the end marker bounds the element.
    pub fn has_exit(self) -> bool {
        matches!(self, Self::Exit | Self::Both)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Direction of travel for slide transitions.
pub enum SlideDirection {
    /// Travels upwards.
    #[default]
    Up,
    /// Travels downwards.
    Down,
    /// Travels to the left.
    Left,
    /// Travels to the right.
    Right,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A scene-scoped named point in time, as returned by the marker backend.
pub struct Marker {
    /// Marker identifier referenced by element animation specs.
    pub id: String,
    /// Timestamp in milliseconds; absent until the backend has resolved it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<Millis>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// Content a scene lacks to be playable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingContent {
    /// No (or blank) script.
    Script,
    /// No usable duration.
    Duration,
    /// No narration audio reference.
    Narration,
}

impl MissingContent {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Duration => "duration",
            Self::Narration => "narration audio",
        }
    }
}

impl Scene {
    /// Canonical canvas of the scene.
    pub fn canvas(&self) -> Canvas {
        self.aspect_ratio.canvas()
    }

    /// Content required for playback that this scene lacks (empty when playable).
    pub fn missing_content(&self) -> Vec<MissingContent> {
        let mut missing = Vec::new();
        if self.script.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push(MissingContent::Script);
        }
        if self
            .duration_secs
            .is_none_or(|d| !d.is_finite() || d <= 0.0)
        {
            missing.push(MissingContent::Duration);
        }
        if self
            .narration
            .as_ref()
            .is_none_or(|n| n.url.trim().is_empty())
        {
            missing.push(MissingContent::Narration);
        }
        missing
    }

    /// A scene is playable iff it has a script, a duration and a narration reference.
    pub fn is_playable(&self) -> bool {
        self.missing_content().is_empty()
    }

    /// Elements in authoring order with the avatar appended last.
    pub fn visual_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().chain(self.avatar.iter())
    }

    /// Every marker id referenced by an element of this scene.
    pub fn referenced_marker_ids(&self) -> BTreeSet<&str> {
        let mut ids = BTreeSet::new();
        for el in self.visual_elements() {
            if let Some(id) = el.animation.start_marker_id.as_deref() {
                ids.insert(id);
            }
            if let Some(id) = el.animation.end_marker_id.as_deref() {
                ids.insert(id);
            }
        }
        ids
    }

    /// Validate structural invariants (ids, geometry, duration).
    pub fn validate(&self) -> PlayerResult<()> {
        if self.id.trim().is_empty() {
            return Err(PlayerError::validation("scene id must be non-empty"));
        }
        if let Some(d) = self.duration_secs
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(PlayerError::validation(format!(
                "scene '{}' duration_secs must be finite and > 0 when set",
                self.id
            )));
        }

        let mut seen = BTreeSet::new();
        for el in self.visual_elements() {
            if el.id.trim().is_empty() {
                return Err(PlayerError::validation(format!(
                    "scene '{}' has an element with an empty id",
                    self.id
                )));
            }
            if !seen.insert(el.id.as_str()) {
                return Err(PlayerError::validation(format!(
                    "scene '{}' has duplicate element id '{}'",
                    self.id, el.id
                )));
            }
            el.validate()?;
        }
        Ok(())
    }
}

impl Element {
    fn validate(&self) -> PlayerResult<()> {
        for (name, value) in [("x", self.x), ("y", self.y), ("rotation_deg", self.rotation_deg)] {
            if !value.is_finite() {
                return Err(PlayerError::validation(format!(
                    "element '{}' {name} must be finite",
                    self.id
                )));
            }
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlayerError::validation(format!(
                    "element '{}' {name} must be finite and >= 0",
                    self.id
                )));
            }
        }
        if let ElementKind::Text { font_size, .. } = &self.kind
            && (!font_size.is_finite() || *font_size <= 0.0)
        {
            return Err(PlayerError::validation(format!(
                "element '{}' font_size must be finite and > 0",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
