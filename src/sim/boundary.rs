//! Boundary constraint
//!
//! Keeps dynamic bodies inside the world region with a single positional
//! correction per tick. No bounce: the implicit Verlet velocity absorbs the
//! correction. Static bodies are left where they were spawned.

use glam::Vec2;

use super::body::BodyStore;
use crate::settings::{BoundaryShape, Settings};

/// Apply the boundary policy selected in `settings`
pub fn apply_boundary(bodies: &mut BodyStore, settings: &Settings) {
    match settings.boundary {
        BoundaryShape::Rectangular => clamp_rectangular(bodies, settings.width, settings.height),
        BoundaryShape::Circular => {
            contain_circular(bodies, settings.center(), settings.container_radius())
        }
    }
}

/// Clamp each axis into `[radius, extent - radius]`
///
/// When a body is wider than the region the lower bound wins.
pub fn clamp_rectangular(bodies: &mut BodyStore, width: f32, height: f32) {
    for i in 0..bodies.len() {
        if bodies.statics[i] {
            continue;
        }
        let r = bodies.radii[i];
        let pos = &mut bodies.positions[i];

        if pos.x > width - r {
            pos.x = width - r;
        }
        if pos.y > height - r {
            pos.y = height - r;
        }
        if pos.x < r {
            pos.x = r;
        }
        if pos.y < r {
            pos.y = r;
        }
    }
}

/// Pull bodies that stray past the container back onto its inner circle
pub fn contain_circular(bodies: &mut BodyStore, center: Vec2, container_radius: f32) {
    for i in 0..bodies.len() {
        if bodies.statics[i] {
            continue;
        }
        let limit = (container_radius - bodies.radii[i]).max(0.0);
        let offset = bodies.positions[i] - center;
        let dist = offset.length();

        if dist > limit {
            bodies.positions[i] = center + offset * (limit / dist);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Color;

    #[test]
    fn test_rectangular_clamp_each_axis() {
        let (width, height) = (400.0, 800.0);
        let mut bodies = BodyStore::with_capacity(3);
        bodies.spawn(width + 100.0, 300.0, 15.0, false, Color::BLACK).unwrap();
        bodies.spawn(-40.0, height + 1.0, 10.0, false, Color::BLACK).unwrap();
        bodies.spawn(200.0, 400.0, 10.0, false, Color::BLACK).unwrap();

        clamp_rectangular(&mut bodies, width, height);

        assert_eq!(bodies.position(0), Some(Vec2::new(width - 15.0, 300.0)));
        assert_eq!(bodies.position(1), Some(Vec2::new(10.0, height - 10.0)));
        assert_eq!(bodies.position(2), Some(Vec2::new(200.0, 400.0)));
    }

    #[test]
    fn test_rectangular_clamp_leaves_previous_position() {
        let mut bodies = BodyStore::with_capacity(1);
        bodies.spawn(500.0, 100.0, 10.0, false, Color::BLACK).unwrap();
        clamp_rectangular(&mut bodies, 400.0, 800.0);
        assert_eq!(bodies.previous_position(0), Some(Vec2::new(500.0, 100.0)));
    }

    #[test]
    fn test_circular_containment() {
        let center = Vec2::new(200.0, 400.0);
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(200.0 + 300.0, 400.0, 10.0, false, Color::BLACK).unwrap();
        bodies.spawn(210.0, 390.0, 10.0, false, Color::BLACK).unwrap();

        contain_circular(&mut bodies, center, 190.0);

        let escaped = bodies.position(0).unwrap();
        assert!((escaped.distance(center) - 180.0).abs() < 1e-3);
        assert!((escaped.y - 400.0).abs() < 1e-3);
        assert_eq!(bodies.position(1), Some(Vec2::new(210.0, 390.0)));
    }

    #[test]
    fn test_circular_keeps_direction() {
        let center = Vec2::ZERO;
        let mut bodies = BodyStore::with_capacity(1);
        bodies.spawn(300.0, 400.0, 5.0, false, Color::BLACK).unwrap();

        contain_circular(&mut bodies, center, 105.0);

        let pos = bodies.position(0).unwrap();
        assert!((pos - Vec2::new(60.0, 80.0)).length() < 1e-3);
    }

    #[test]
    fn test_static_bodies_exempt() {
        let mut bodies = BodyStore::with_capacity(1);
        bodies.spawn(1000.0, -50.0, 10.0, true, Color::BLACK).unwrap();

        clamp_rectangular(&mut bodies, 400.0, 800.0);
        contain_circular(&mut bodies, Vec2::new(200.0, 400.0), 190.0);

        assert_eq!(bodies.position(0), Some(Vec2::new(1000.0, -50.0)));
    }

    #[test]
    fn test_apply_boundary_dispatches_on_shape() {
        let settings = Settings::new(400.0, 800.0, 1, Vec2::ZERO)
            .with_boundary(BoundaryShape::Circular);
        let mut bodies = BodyStore::with_capacity(1);
        // Inside the box, outside the circle
        bodies.spawn(20.0, 20.0, 10.0, false, Color::BLACK).unwrap();

        apply_boundary(&mut bodies, &settings);

        let pos = bodies.position(0).unwrap();
        assert!((pos.distance(settings.center()) - 180.0).abs() < 1e-3);
    }
}
