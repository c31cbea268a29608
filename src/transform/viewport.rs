//! Canonical-canvas to surface mapping.
//!
//! Scenes are authored on a fixed canvas (see [`crate::AspectRatio`]). The surface a host
//! draws on can have any size, so the canvas is scaled uniformly to fit and centered
//! (letterboxed). The mapping is `p_surface = p_canonical * scale + offset`.

use crate::foundation::core::{Affine, Canvas, Point, Rect, SurfaceSize, Vec2};

/// Uniform scale + centering offset from canonical canvas units to surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewportTransform {
    canvas: Canvas,
    surface: SurfaceSize,
    scale: f64,
    offset: Vec2,
    fallback: bool,
}

impl ViewportTransform {
    /// Scale used while the surface has not been laid out yet.
    pub const DEFAULT_FALLBACK_SCALE: f64 = 0.5;

    /// Fit `canvas` into `surface` using [`Self::DEFAULT_FALLBACK_SCALE`] for unmeasured surfaces.
    pub fn fit(canvas: Canvas, surface: SurfaceSize) -> Self {
        Self::fit_with_fallback(canvas, surface, Self::DEFAULT_FALLBACK_SCALE)
    }

    /// Fit `canvas` into `surface`.
    ///
    /// A zero-sized (or non-finite) surface yields `fallback_scale` with no offset; the next
    /// fit after layout completes produces the real mapping.
    #[tracing::instrument(level = "trace")]
    pub fn fit_with_fallback(canvas: Canvas, surface: SurfaceSize, fallback_scale: f64) -> Self {
        let canvas_size = canvas.size();
        if surface.is_unmeasured() || canvas.width == 0 || canvas.height == 0 {
            tracing::trace!("surface not measured, using fallback scale");
            return Self {
                canvas,
                surface,
                scale: fallback_scale,
                offset: Vec2::ZERO,
                fallback: true,
            };
        }

        let scale = (surface.width / canvas_size.width).min(surface.height / canvas_size.height);
        let offset = Vec2::new(
            (surface.width - canvas_size.width * scale) / 2.0,
            (surface.height - canvas_size.height * scale) / 2.0,
        );
        Self {
            canvas,
            surface,
            scale,
            offset,
            fallback: false,
        }
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Centering offset in surface pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Canonical canvas this transform maps from.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Surface size this transform was fitted to.
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// `true` when the fallback scale is in effect.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Canonical → surface as an affine map.
    pub fn as_affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Map a canonical point to the surface.
    pub fn to_surface_point(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    /// Map a canonical rectangle to the surface.
    pub fn to_surface_rect(&self, r: Rect) -> Rect {
        Rect::from_origin_size(
            self.to_surface_point(r.origin()),
            (r.width() * self.scale, r.height() * self.scale),
        )
    }

    /// Scale a canonical displacement (no centering offset applied).
    pub fn to_surface_vec(&self, v: Vec2) -> Vec2 {
        v * self.scale
    }

    /// Scale a canonical font size.
    pub fn to_surface_font(&self, size: f64) -> f64 {
        size * self.scale
    }

    /// Map a surface point back to canonical units.
    pub fn to_canonical_point(&self, p: Point) -> Point {
        if self.scale == 0.0 {
            return Point::ORIGIN;
        }
        Point::new(
            (p.x - self.offset.x) / self.scale,
            (p.y - self.offset.y) / self.scale,
        )
    }

    /// Map a surface rectangle back to canonical units.
    pub fn to_canonical_rect(&self, r: Rect) -> Rect {
        if self.scale == 0.0 {
            return Rect::ZERO;
        }
        Rect::from_origin_size(
            self.to_canonical_point(r.origin()),
            (r.width() / self.scale, r.height() / self.scale),
        )
    }

    /// Area of the surface covered by the canvas.
    pub fn letterbox(&self) -> Rect {
        self.to_surface_rect(Rect::from_origin_size(Point::ORIGIN, self.canvas.size()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/viewport.rs"]
mod tests;
