use wasm_bindgen::prelude::*;

// ============================================================================
// MEMORY WORLD - Portal-gated AR world with floating media orbs
// ============================================================================

pub mod config;
pub mod device;
pub mod error;
pub mod render;
pub mod scene;
pub mod session;
pub mod sim;
pub mod world;

pub use config::WorldConfig;
pub use device::{ArSupport, DeviceCapabilities};
pub use error::{Result, WorldError};
pub use scene::{SceneComposer, SceneEvent};
pub use session::{PermissionOutcome, SessionMode};

use glam::Vec3;
use render::{Encoder, STRIDE};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: WorldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct MemoryWorld {
    scene: SceneComposer,
    encoder: Encoder,
}

#[wasm_bindgen]
impl MemoryWorld {
    /// `ar_supported` is the resolved WebXR query, or undefined while pending.
    #[wasm_bindgen(constructor)]
    pub fn new(
        user_agent: &str,
        ar_supported: Option<bool>,
        config_json: Option<String>,
        seed: u32,
    ) -> std::result::Result<MemoryWorld, JsValue> {
        let config = match config_json {
            Some(json) => WorldConfig::from_json(&json).map_err(to_js)?,
            None => WorldConfig::defaults().clone(),
        };
        let capabilities = DeviceCapabilities::from_user_agent(user_agent, ar_supported.into());
        let scene = SceneComposer::new(config, capabilities, u64::from(seed)).map_err(to_js)?;
        Ok(Self { scene, encoder: Encoder::new() })
    }

    pub fn set_ar_support(&mut self, supported: bool) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::ArSupport(supported))
    }

    /// Call right before `DeviceOrientationEvent.requestPermission()`
    pub fn request_permission(&mut self) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::PermissionRequested)
    }

    pub fn permission_granted(&mut self) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::Permission(PermissionOutcome::Granted))
    }

    pub fn permission_denied(&mut self) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::Permission(PermissionOutcome::Denied))
    }

    pub fn permission_failed(&mut self, message: String) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::Permission(PermissionOutcome::Error(message)))
    }

    /// The platform has no permission API at all
    pub fn permission_not_applicable(&mut self) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::Permission(PermissionOutcome::NotApplicable))
    }

    pub fn enter_demo(&mut self) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::EnterDemo)
    }

    pub fn surface_hit(&mut self, x: f32, y: f32, z: f32) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::SurfaceHit(Vec3::new(x, y, z)))
    }

    pub fn confirm_placement(&mut self) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::ConfirmPlacement)
    }

    pub fn select_portal(&mut self) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::SelectPortal)
    }

    pub fn select_orb(&mut self, index: u32) -> std::result::Result<String, JsValue> {
        self.send(SceneEvent::SelectOrb(index as usize))
    }

    /// Frame without a tracked viewer (demo mode)
    pub fn tick(&mut self, dt: f32) -> std::result::Result<(), JsValue> {
        self.advance(dt, None)
    }

    /// Frame with the AR camera position
    pub fn tick_ar(&mut self, dt: f32, x: f32, y: f32, z: f32) -> std::result::Result<(), JsValue> {
        self.advance(dt, Some(Vec3::new(x, y, z)))
    }

    pub fn mode(&self) -> String {
        self.scene.mode().as_str().to_string()
    }

    /// Inline message for the current recoverable failure, if any
    pub fn notice(&self) -> Option<String> {
        self.scene.session().notice().map(|e| e.to_string())
    }

    pub fn active_orb(&self) -> Option<u32> {
        self.scene.media().orb.map(|i| i as u32)
    }

    pub fn active_media(&self) -> Option<String> {
        self.scene.media().media_id.clone()
    }

    pub fn active_color(&self) -> Option<String> {
        self.scene.media().color.clone()
    }

    /// [x, y, z, width, height] of the media panel
    pub fn media_panel(&self) -> Vec<f32> {
        let a = self.scene.media().anchor;
        vec![a.x, a.y, a.z, scene::PANEL_WIDTH, scene::PANEL_HEIGHT]
    }

    pub fn take_redraw(&mut self) -> bool {
        self.scene.take_redraw()
    }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const f32 { self.encoder.ptr() }
    pub fn output_len(&self) -> usize { self.encoder.len() }
    pub fn stride(&self) -> usize { STRIDE }

    /// Copy of the pose buffer, for hosts that don't read linear memory
    pub fn output(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.encoder.as_slice())
    }

    pub fn terrain_size(&self) -> f32 { self.scene.config().terrain.size }
    pub fn terrain_color(&self) -> String { self.scene.config().terrain.color.clone() }
}

impl MemoryWorld {
    fn send(&mut self, event: SceneEvent) -> std::result::Result<String, JsValue> {
        self.scene
            .handle(event)
            .map(|mode| mode.as_str().to_string())
            .map_err(to_js)
    }

    fn advance(&mut self, dt: f32, viewer: Option<Vec3>) -> std::result::Result<(), JsValue> {
        let items = self.scene.frame(dt, viewer).map_err(to_js)?;
        self.encoder.encode(items);
        Ok(())
    }
}

/// Same as `new MemoryWorld(...)`, reading the user agent from `navigator`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn memory_world_from_browser(
    ar_supported: Option<bool>,
    config_json: Option<String>,
    seed: u32,
) -> std::result::Result<MemoryWorld, JsValue> {
    MemoryWorld::new(&device::browser_user_agent(), ar_supported, config_json, seed)
}
