//! Boundary scene model handed over by the editor.

/// Scenes, elements, animation attributes and markers.
pub mod model;
