// media.rs - Embedded media panel state
//
// The host owns the actual player. We only say which media id is showing,
// where the panel hangs, and whether it should autoplay.

use glam::Vec3;

use crate::config::MediaItem;

/// Panel size in world units (16:9)
pub const PANEL_WIDTH: f32 = 1.6;
pub const PANEL_HEIGHT: f32 = 0.9;

/// Height of the panel center above its orb
const PANEL_LIFT: f32 = 0.9;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaPanel {
    pub orb: Option<usize>,
    pub media_id: Option<String>,
    pub color: Option<String>,
    pub anchor: Vec3,
    pub autoplay: bool,
}

impl MediaPanel {
    pub fn is_visible(&self) -> bool {
        self.orb.is_some()
    }

    /// Show `item` above the orb at `orb_position`. Returns true if the
    /// displayed media changed.
    pub fn show(&mut self, orb: usize, item: &MediaItem, orb_position: Vec3) -> bool {
        self.anchor = orb_position + Vec3::Y * PANEL_LIFT;
        if self.orb == Some(orb) {
            return false;
        }
        log::info!("showing media {} for orb {orb}", item.id);
        self.orb = Some(orb);
        self.media_id = Some(item.id.clone());
        self.color = Some(item.color.clone());
        self.autoplay = true;
        true
    }

    /// Returns true if a panel was showing
    pub fn hide(&mut self) -> bool {
        if self.orb.is_none() {
            return false;
        }
        log::info!("hiding media for orb {:?}", self.orb);
        *self = Self::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> MediaItem {
        MediaItem { id: id.into(), color: "#fff".into() }
    }

    #[test]
    fn show_and_hide() {
        let mut panel = MediaPanel::default();
        assert!(!panel.is_visible());

        assert!(panel.show(1, &item("abc"), Vec3::new(0.0, 1.0, 0.0)));
        assert!(panel.is_visible());
        assert!(panel.autoplay);
        assert_eq!(panel.media_id.as_deref(), Some("abc"));
        assert_eq!(panel.anchor, Vec3::new(0.0, 1.0 + PANEL_LIFT, 0.0));

        // Same orb again only moves the anchor
        assert!(!panel.show(1, &item("abc"), Vec3::new(0.0, 1.2, 0.0)));
        assert_eq!(panel.anchor.y, 1.2 + PANEL_LIFT);

        assert!(panel.show(2, &item("def"), Vec3::ZERO));
        assert_eq!(panel.media_id.as_deref(), Some("def"));

        assert!(panel.hide());
        assert!(!panel.hide());
        assert_eq!(panel, MediaPanel::default());
    }
}
