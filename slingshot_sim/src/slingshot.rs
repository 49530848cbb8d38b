//! Slingshot gesture: press to anchor, drag back, release to launch

use glam::Vec3;

/// Launch speed per unit of drag distance
pub const LAUNCH_SCALE: f32 = 0.5;

/// A finished gesture: where to spawn and how fast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Default, Clone)]
pub struct Slingshot {
    anchor: Option<Vec3>,
    current: Option<Vec3>,
}

impl Slingshot {
    pub fn press(&mut self, point: Vec3) {
        self.anchor = Some(point);
        self.current = Some(point);
    }

    pub fn drag(&mut self, point: Vec3) {
        if self.anchor.is_some() {
            self.current = Some(point);
        }
    }

    /// End the gesture. The body launches away from the drag direction, like
    /// pulling back a rubber band.
    pub fn release(&mut self) -> Option<Launch> {
        let anchor = self.anchor.take()?;
        let current = self.current.take().unwrap_or(anchor);

        Some(Launch {
            position: anchor,
            velocity: (anchor - current) * LAUNCH_SCALE,
        })
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
        self.current = None;
    }

    pub fn is_aiming(&self) -> bool {
        self.anchor.is_some()
    }

    /// Segment to draw while aiming
    pub fn aim_line(&self) -> Option<(Vec3, Vec3)> {
        Some((self.anchor?, self.current?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_launches_opposite_to_drag() {
        let mut sling = Slingshot::default();
        sling.press(Vec3::new(10.0, 0.0, 0.0));
        sling.drag(Vec3::new(12.0, 0.0, 4.0));

        let launch = sling.release().unwrap();
        assert_eq!(launch.position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(launch.velocity, Vec3::new(-1.0, 0.0, -2.0));
        assert!(!sling.is_aiming());
    }

    #[test]
    fn click_without_drag_spawns_at_rest() {
        let mut sling = Slingshot::default();
        sling.press(Vec3::new(3.0, 0.0, 3.0));

        let launch = sling.release().unwrap();
        assert_eq!(launch.velocity, Vec3::ZERO);
    }

    #[test]
    fn drag_or_release_without_press_does_nothing() {
        let mut sling = Slingshot::default();
        sling.drag(Vec3::ONE);
        assert_eq!(sling.aim_line(), None);
        assert_eq!(sling.release(), None);
    }

    #[test]
    fn cancel_discards_gesture() {
        let mut sling = Slingshot::default();
        sling.press(Vec3::ZERO);
        sling.drag(Vec3::X);
        sling.cancel();
        assert_eq!(sling.release(), None);
    }
}
