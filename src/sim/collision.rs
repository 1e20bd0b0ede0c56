//! Collision detection and response for axis-aligned geometry
//!
//! The ball is a circle; paddle and bricks are axis-aligned rectangles. A hit
//! reports the normal of the struck face so the response can flip exactly one
//! velocity component.

use glam::Vec2;

use super::geometry::Rect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the rectangle (if hit)
    pub point: Vec2,
    /// Face normal, pointing from the rectangle toward the ball center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and an axis-aligned rectangle
///
/// Touching counts as a hit. When the ball center is already inside the
/// rectangle (tunneling), the face with the least penetration is reported.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(ball_pos);
    let delta = ball_pos - closest;
    let dist = delta.length();

    if dist > ball_radius {
        return CollisionResult::miss();
    }

    if dist > 0.0 {
        // Exact corner ties resolve to the top or bottom face
        let normal = if delta.x.abs() > delta.y.abs() {
            Vec2::new(delta.x.signum(), 0.0)
        } else {
            Vec2::new(0.0, delta.y.signum())
        };
        return CollisionResult {
            hit: true,
            point: closest,
            normal,
            penetration: ball_radius - dist,
        };
    }

    // Center inside the rectangle: push out through the nearest face
    let faces = [
        (ball_pos.x - rect.left(), Vec2::NEG_X),
        (rect.right() - ball_pos.x, Vec2::X),
        (ball_pos.y - rect.top(), Vec2::NEG_Y),
        (rect.bottom() - ball_pos.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, Vec2::NEG_Y));

    CollisionResult {
        hit: true,
        point: ball_pos + normal * depth,
        normal,
        penetration: depth + ball_radius,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect only when moving into the surface, so a ball still overlapping a
/// face it already bounced off is not flipped back into it.
#[inline]
pub fn bounce_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    if velocity.dot(normal) < 0.0 {
        reflect_velocity(velocity, normal)
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick() -> Rect {
        Rect::from_location(Vec2::new(100.0, 100.0), 80.0, 25.0)
    }

    #[test]
    fn test_ball_rect_collision_bottom_face() {
        // Ball just below the brick, overlapping its bottom edge
        let result = ball_rect_collision(Vec2::new(140.0, 130.0), 8.0, &brick());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        assert!((result.penetration - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_ball_rect_collision_side_face() {
        let result = ball_rect_collision(Vec2::new(95.0, 112.0), 8.0, &brick());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
    }

    #[test]
    fn test_ball_rect_collision_corner_tie() {
        // Diagonal off the bottom-right corner (180, 125)
        let result = ball_rect_collision(Vec2::new(184.0, 129.0), 8.0, &brick());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
    }

    #[test]
    fn test_ball_rect_collision_miss() {
        let result = ball_rect_collision(Vec2::new(140.0, 140.0), 8.0, &brick());
        assert!(!result.hit);
    }

    #[test]
    fn test_ball_rect_collision_center_inside() {
        // Two units below the top face
        let result = ball_rect_collision(Vec2::new(140.0, 102.0), 8.0, &brick());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_Y);
        assert!((result.penetration - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_bounce_velocity_ignores_separating_motion() {
        let velocity = Vec2::new(3.0, 4.0);
        // Already moving away from a face whose normal points down
        assert_eq!(bounce_velocity(velocity, Vec2::Y), velocity);
        assert_eq!(bounce_velocity(velocity, Vec2::NEG_Y), Vec2::new(3.0, -4.0));
    }
}
