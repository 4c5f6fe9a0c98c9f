//! Collision shapes attached to bodies.

use glam::DVec2;

/// Shape geometry in body-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Convex polygon, vertices in winding order.
    Poly(Vec<DVec2>),
    Circle { radius: f64, offset: DVec2 },
}

/// A shape with mass and elasticity.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub mass: f64,
    pub elasticity: f64,
}

impl Shape {
    pub fn poly(vertices: Vec<DVec2>) -> Self {
        Self {
            geometry: Geometry::Poly(vertices),
            mass: 0.0,
            elasticity: 0.0,
        }
    }

    pub fn circle(radius: f64) -> Self {
        Self {
            geometry: Geometry::Circle {
                radius,
                offset: DVec2::ZERO,
            },
            mass: 0.0,
            elasticity: 0.0,
        }
    }

    /// Axis-aligned rectangle covering `(0, 0)..(width, height)`.
    pub fn bounding_box(width: f64, height: f64) -> Self {
        Self::poly(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(width, 0.0),
            DVec2::new(width, height),
            DVec2::new(0.0, height),
        ])
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Local-space bounds as `(min, max)`.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        match &self.geometry {
            Geometry::Poly(vertices) => {
                let mut min = DVec2::splat(f64::INFINITY);
                let mut max = DVec2::splat(f64::NEG_INFINITY);
                for v in vertices {
                    min = min.min(*v);
                    max = max.max(*v);
                }
                if vertices.is_empty() {
                    (DVec2::ZERO, DVec2::ZERO)
                } else {
                    (min, max)
                }
            }
            Geometry::Circle { radius, offset } => {
                (*offset - DVec2::splat(*radius), *offset + DVec2::splat(*radius))
            }
        }
    }
}
