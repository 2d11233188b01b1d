// session.rs - Session mode state machine
//
// permission -> portal -> world. Only the permission retry loop goes
// back to where it started; WorldEntered is terminal.
//
// The permission and AR-support queries have no deadline. A query that
// never resolves leaves the session waiting in PermissionPending.

use glam::{Vec2, Vec3};

use crate::config::PortalConfig;
use crate::device::{ArSupport, DeviceCapabilities, FallbackReason, GateOutcome};
use crate::error::{Result, WorldError};
use crate::sim::ActivationPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    PermissionPending,
    UnsupportedDevice,
    PortalUnplaced,
    PortalPlaced,
    WorldEntered,
}

impl SessionMode {
    pub fn can_advance_to(self, to: SessionMode) -> bool {
        use SessionMode::*;
        matches!(
            (self, to),
            (PermissionPending, PermissionPending)
                | (PermissionPending, PortalUnplaced)
                | (PermissionPending, UnsupportedDevice)
                | (UnsupportedDevice, PortalUnplaced)
                | (PortalUnplaced, PortalPlaced)
                | (PortalPlaced, WorldEntered)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PermissionPending => "permission-pending",
            Self::UnsupportedDevice => "unsupported-device",
            Self::PortalUnplaced => "portal-unplaced",
            Self::PortalPlaced => "portal-placed",
            Self::WorldEntered => "world-entered",
        }
    }
}

/// How the viewer moves through the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    /// WebXR: the viewer walks, proximity drives portal entry and orbs
    Ar,
    /// Non-AR demo: clicks drive portal entry and orbs
    Demo,
}

impl Experience {
    pub fn activation_policy(self) -> ActivationPolicy {
        match self {
            Self::Ar => ActivationPolicy::Proximity,
            Self::Demo => ActivationPolicy::Toggle,
        }
    }
}

/// Outcome of the motion-sensor permission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    /// The request itself failed
    Error(String),
    /// The platform has no permission API; nothing to ask for
    NotApplicable,
}

#[derive(Debug)]
pub struct Session {
    mode: SessionMode,
    capabilities: DeviceCapabilities,
    gate: GateOutcome,
    experience: Option<Experience>,
    permission: Option<PermissionOutcome>,
    permission_requests: u32,
    notice: Option<WorldError>,
    portal_config: PortalConfig,
    pending_hit: Option<Vec3>,
    portal: Option<Vec3>,
}

impl Session {
    /// Run the capability gate and enter the first mode
    pub fn new(capabilities: DeviceCapabilities, portal_config: PortalConfig) -> Self {
        let mut session = Self {
            mode: SessionMode::PermissionPending,
            capabilities,
            gate: GateOutcome::Pending,
            experience: None,
            permission: None,
            permission_requests: 0,
            notice: None,
            portal_config,
            pending_hit: None,
            portal: None,
        };
        session.apply_gate(capabilities.gate());
        session
    }

    fn apply_gate(&mut self, gate: GateOutcome) {
        self.gate = gate;
        match gate {
            GateOutcome::Ar => {
                self.experience = Some(Experience::Ar);
                log::info!("AR capable device, awaiting motion permission");
            }
            GateOutcome::Pending => log::debug!("AR support query pending"),
            GateOutcome::Fallback(reason) => {
                self.mode = SessionMode::UnsupportedDevice;
                self.notice = Some(WorldError::CapabilityUnsupported(
                    match reason {
                        FallbackReason::Desktop => "not a mobile device",
                        FallbackReason::ArUnsupported => "immersive AR not supported",
                    }
                    .into(),
                ));
                log::info!("capability gate failed ({reason:?}), showing fallback");
            }
        }
    }

    /// Feed the resolved AR support query. Only meaningful while the gate is pending.
    pub fn resolve_ar_support(&mut self, supported: bool) -> Result<SessionMode> {
        if self.gate != GateOutcome::Pending {
            log::debug!("AR support already resolved, ignoring");
            return Ok(self.mode);
        }
        self.capabilities.ar = ArSupport::from(Some(supported));
        let gate = self.capabilities.gate();
        if let GateOutcome::Fallback(_) = gate {
            self.check(SessionMode::UnsupportedDevice)?;
        }
        self.apply_gate(gate);
        Ok(self.mode)
    }

    /// Record that the host is about to ask for motion-sensor permission
    pub fn request_permission(&mut self) -> Result<()> {
        if self.gate != GateOutcome::Ar {
            return Err(WorldError::CapabilityUnsupported("permission is only requested for AR sessions".into()));
        }
        if self.mode != SessionMode::PermissionPending {
            return Err(self.invalid(SessionMode::PermissionPending));
        }
        self.permission_requests += 1;
        log::debug!("motion permission request #{}", self.permission_requests);
        Ok(())
    }

    pub fn apply_permission(&mut self, outcome: PermissionOutcome) -> Result<SessionMode> {
        if self.gate != GateOutcome::Ar {
            return Err(WorldError::CapabilityUnsupported("no AR session to grant permission to".into()));
        }
        let next = match outcome {
            PermissionOutcome::Denied => SessionMode::PermissionPending,
            _ => SessionMode::PortalUnplaced,
        };
        self.check(next)?;

        self.notice = match &outcome {
            PermissionOutcome::Granted | PermissionOutcome::NotApplicable => None,
            PermissionOutcome::Denied => {
                log::warn!("motion permission denied, waiting for retry");
                Some(WorldError::PermissionDenied)
            }
            PermissionOutcome::Error(message) => {
                log::warn!("motion permission request failed ({message}), continuing without it");
                Some(WorldError::PermissionRequest(message.clone()))
            }
        };
        self.permission = Some(outcome);
        self.advance(next);
        Ok(self.mode)
    }

    /// Skip AR entirely from the fallback screen. The non-AR scene needs no
    /// placement, so the portal is placed straight away.
    pub fn enter_demo(&mut self) -> Result<SessionMode> {
        if self.mode != SessionMode::UnsupportedDevice {
            return Err(self.invalid(SessionMode::PortalUnplaced));
        }
        self.experience = Some(Experience::Demo);
        self.notice = None;
        self.advance(SessionMode::PortalUnplaced);
        self.place_portal(self.portal_config.position)
    }

    /// Latest AR hit-test result under the reticle
    pub fn report_surface_hit(&mut self, position: Vec3) {
        if self.mode == SessionMode::PortalUnplaced && self.experience == Some(Experience::Ar) {
            self.pending_hit = Some(position);
        }
    }

    pub fn pending_hit(&self) -> Option<Vec3> { self.pending_hit }

    /// User tapped to place the portal on the last hit
    pub fn confirm_placement(&mut self) -> Result<SessionMode> {
        self.check(SessionMode::PortalPlaced)?;
        let hit = self
            .pending_hit
            .ok_or_else(|| WorldError::InvalidPlacement("no surface detected for the portal".into()))?;
        self.place_portal(hit)
    }

    fn place_portal(&mut self, position: Vec3) -> Result<SessionMode> {
        self.check(SessionMode::PortalPlaced)?;
        self.portal = Some(position);
        self.pending_hit = None;
        self.advance(SessionMode::PortalPlaced);
        Ok(self.mode)
    }

    /// Per-frame viewer update. Returns true on the frame the world is entered.
    ///
    /// Distance is measured on the ground plane: the portal sits on the
    /// floor while the camera is held at eye height.
    pub fn update_viewer(&mut self, viewer: Vec3) -> bool {
        if self.mode != SessionMode::PortalPlaced || self.experience != Some(Experience::Ar) {
            return false;
        }
        let Some(portal) = self.portal else { return false };
        let ground = Vec2::new(viewer.x - portal.x, viewer.z - portal.z);
        if ground.length() < self.portal_config.entry_threshold {
            self.advance(SessionMode::WorldEntered);
            return true;
        }
        false
    }

    /// Click on the portal; only the demo enters this way
    pub fn select_portal(&mut self) -> Result<SessionMode> {
        if self.experience != Some(Experience::Demo) {
            log::debug!("portal click ignored outside demo mode");
            return Ok(self.mode);
        }
        self.check(SessionMode::WorldEntered)?;
        self.advance(SessionMode::WorldEntered);
        Ok(self.mode)
    }

    fn check(&self, to: SessionMode) -> Result<()> {
        if self.mode.can_advance_to(to) { Ok(()) } else { Err(self.invalid(to)) }
    }

    fn invalid(&self, to: SessionMode) -> WorldError {
        WorldError::InvalidTransition { from: self.mode, to }
    }

    fn advance(&mut self, to: SessionMode) {
        if self.mode != to {
            log::info!("session {} -> {}", self.mode.as_str(), to.as_str());
        }
        self.mode = to;
    }

    pub fn mode(&self) -> SessionMode { self.mode }
    pub fn gate(&self) -> GateOutcome { self.gate }
    pub fn experience(&self) -> Option<Experience> { self.experience }
    pub fn permission(&self) -> Option<&PermissionOutcome> { self.permission.as_ref() }
    pub fn permission_requests(&self) -> u32 { self.permission_requests }
    pub fn notice(&self) -> Option<&WorldError> { self.notice.as_ref() }
    pub fn portal(&self) -> Option<Vec3> { self.portal }
}
