// render.rs - Encode frame items to the output buffer
//
// Output layout, STRIDE floats per item:
//   [kind, index, x, y, z, rotation_y, scale, active]
//
// kind: 1=tree 2=bush 3=bird 4=orb 5=portal 6=reticle

use crate::scene::FrameItem;

pub const STRIDE: usize = 8;

pub struct Encoder {
    out: Vec<f32>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn items(&self) -> usize {
        self.out.len() / STRIDE
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    /// Replace the buffer with this frame's items
    pub fn encode(&mut self, items: &[FrameItem]) {
        self.out.clear();
        self.out.reserve(items.len() * STRIDE);
        for item in items {
            let p = item.pose.position;
            self.out.extend_from_slice(&[
                item.kind as u8 as f32,
                item.index as f32,
                p.x,
                p.y,
                p.z,
                item.pose.rotation_y,
                item.pose.scale,
                if item.active { 1.0 } else { 0.0 },
            ]);
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ItemKind, Pose};
    use glam::Vec3;

    #[test]
    fn encodes_items_in_order() {
        let items = [
            FrameItem {
                kind: ItemKind::Portal,
                index: 0,
                pose: Pose { position: Vec3::new(0.0, 0.0, -5.0), rotation_y: 0.5, scale: 1.0 },
                active: false,
            },
            FrameItem {
                kind: ItemKind::Orb,
                index: 3,
                pose: Pose { position: Vec3::new(1.0, 2.0, 3.0), rotation_y: 0.0, scale: 1.0 },
                active: true,
            },
        ];
        let mut encoder = Encoder::new();
        encoder.encode(&items);
        assert_eq!(encoder.items(), 2);
        assert_eq!(encoder.len(), 2 * STRIDE);
        assert_eq!(&encoder.as_slice()[..STRIDE], &[5.0, 0.0, 0.0, 0.0, -5.0, 0.5, 1.0, 0.0]);
        assert_eq!(&encoder.as_slice()[STRIDE..], &[4.0, 3.0, 1.0, 2.0, 3.0, 0.0, 1.0, 1.0]);

        encoder.encode(&[]);
        assert!(encoder.is_empty());
    }
}
