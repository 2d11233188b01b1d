// activation.rs - Single active orb tracking
//
// At most one candidate is active. In AR the nearest candidate inside the
// activation radius wins each frame; in demo mode a click toggles it.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPolicy {
    /// Nearest candidate to the viewer within the radius
    Proximity,
    /// Explicit selection toggles
    Toggle,
}

#[derive(Debug, Clone)]
pub struct ActivationTracker {
    policy: ActivationPolicy,
    active: Option<usize>,
}

impl ActivationTracker {
    pub fn new(policy: ActivationPolicy) -> Self {
        Self { policy, active: None }
    }

    pub fn active(&self) -> Option<usize> { self.active }

    /// Switching policy always clears the active index
    pub fn set_policy(&mut self, policy: ActivationPolicy) {
        if self.active.is_some() {
            log::debug!("activation cleared on policy change {:?} -> {:?}", self.policy, policy);
        }
        self.policy = policy;
        self.active = None;
    }

    /// Recompute the active index for this frame.
    ///
    /// Under `Toggle` the candidates and viewer are ignored and the current
    /// selection is returned unchanged.
    pub fn evaluate(&mut self, candidates: &[(usize, Vec3)], viewer: Option<Vec3>, radius: f32) -> Option<usize> {
        if self.policy == ActivationPolicy::Toggle {
            return self.active;
        }

        let nearest = viewer.and_then(|viewer| {
            candidates
                .iter()
                .map(|&(index, position)| (index, position.distance(viewer)))
                .filter(|&(_, distance)| distance < radius)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, _)| index)
        });

        if nearest != self.active {
            log::debug!("proximity activation {:?} -> {:?}", self.active, nearest);
        }
        self.active = nearest;
        self.active
    }

    /// Explicit selection. Selecting the active index clears it.
    /// Ignored under `Proximity`.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if self.policy != ActivationPolicy::Toggle {
            log::debug!("selection of {index} ignored under proximity policy");
            return self.active;
        }
        self.active = if self.active == Some(index) { None } else { Some(index) };
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn along_x(distances: &[f32]) -> Vec<(usize, Vec3)> {
        distances.iter().enumerate().map(|(i, &d)| (i, Vec3::new(d, 0.0, 0.0))).collect()
    }

    #[test]
    fn proximity_picks_nearest_inside_radius() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Proximity);
        let candidates = along_x(&[5.0, 0.5, 10.0]);
        assert_eq!(tracker.evaluate(&candidates, Some(Vec3::ZERO), 3.0), Some(1));
    }

    #[test]
    fn proximity_prefers_nearest_of_several() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Proximity);
        let candidates = along_x(&[2.0, 1.0, 2.5]);
        assert_eq!(tracker.evaluate(&candidates, Some(Vec3::ZERO), 3.0), Some(1));
    }

    #[test]
    fn proximity_none_outside_radius_or_without_viewer() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Proximity);
        let candidates = along_x(&[5.0, 3.0]);
        assert_eq!(tracker.evaluate(&candidates, Some(Vec3::ZERO), 3.0), None);
        assert_eq!(tracker.evaluate(&along_x(&[1.0]), None, 3.0), None);
        assert_eq!(tracker.evaluate(&along_x(&[1.5]), Some(Vec3::ZERO), 1.5), None);
        assert_eq!(tracker.evaluate(&[], Some(Vec3::ZERO), 3.0), None);
    }

    #[test]
    fn proximity_follows_moving_viewer() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Proximity);
        let candidates = along_x(&[0.0, 10.0]);
        assert_eq!(tracker.evaluate(&candidates, Some(Vec3::new(1.0, 0.0, 0.0)), 2.0), Some(0));
        assert_eq!(tracker.evaluate(&candidates, Some(Vec3::new(5.0, 0.0, 0.0)), 2.0), None);
        assert_eq!(tracker.evaluate(&candidates, Some(Vec3::new(9.0, 0.0, 0.0)), 2.0), Some(1));
    }

    #[test]
    fn toggle_same_index_clears() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Toggle);
        assert_eq!(tracker.select(2), Some(2));
        assert_eq!(tracker.select(2), None);
    }

    #[test]
    fn toggle_other_index_replaces() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Toggle);
        tracker.select(2);
        assert_eq!(tracker.select(3), Some(3));
        // Distances play no part under toggle
        assert_eq!(tracker.evaluate(&along_x(&[0.0]), Some(Vec3::ZERO), 3.0), Some(3));
    }

    #[test]
    fn policy_switch_resets() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Toggle);
        tracker.select(1);
        tracker.set_policy(ActivationPolicy::Proximity);
        assert_eq!(tracker.active(), None);

        tracker.evaluate(&along_x(&[0.5]), Some(Vec3::ZERO), 3.0);
        assert_eq!(tracker.active(), Some(0));
        tracker.set_policy(ActivationPolicy::Toggle);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn selection_ignored_under_proximity() {
        let mut tracker = ActivationTracker::new(ActivationPolicy::Proximity);
        assert_eq!(tracker.select(4), None);
    }
}
