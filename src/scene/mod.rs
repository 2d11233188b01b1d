// scene/ - Scene composition
//
// Events update the session; frames animate whatever the session has
// unlocked. The world layout is generated once, on the frame the viewer
// enters, and never regenerated.

mod media;
mod prop;

pub use media::{MediaPanel, PANEL_HEIGHT, PANEL_WIDTH};
pub use prop::{Motion, Pose, Prop};

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::WorldConfig;
use crate::device::DeviceCapabilities;
use crate::error::{Result, WorldError};
use crate::session::{PermissionOutcome, Session, SessionMode};
use crate::sim::{ActivationPolicy, ActivationTracker, Clock, Spin};
use crate::world::{EntityKind, Terrain, scatter};

/// What the host can tell the scene between frames
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    ArSupport(bool),
    PermissionRequested,
    Permission(PermissionOutcome),
    EnterDemo,
    SurfaceHit(Vec3),
    ConfirmPlacement,
    SelectPortal,
    SelectOrb(usize),
}

impl SceneEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArSupport(_) => "ar-support",
            Self::PermissionRequested => "permission-requested",
            Self::Permission(_) => "permission",
            Self::EnterDemo => "enter-demo",
            Self::SurfaceHit(_) => "surface-hit",
            Self::ConfirmPlacement => "confirm-placement",
            Self::SelectPortal => "select-portal",
            Self::SelectOrb(_) => "select-orb",
        }
    }
}

/// Renderable item kinds, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Tree = 1,
    Bush = 2,
    Bird = 3,
    Orb = 4,
    Portal = 5,
    Reticle = 6,
}

impl From<EntityKind> for ItemKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Tree => ItemKind::Tree,
            EntityKind::Bush => ItemKind::Bush,
            EntityKind::Bird => ItemKind::Bird,
            EntityKind::Orb => ItemKind::Orb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameItem {
    pub kind: ItemKind,
    /// Index within its kind
    pub index: usize,
    pub pose: Pose,
    pub active: bool,
}

/// The static world behind the portal
#[derive(Debug, Clone)]
pub struct World {
    origin: Vec3,
    props: Vec<Prop>,
}

impl World {
    /// Scatter every entity class once. Layout is relative to `origin`.
    pub fn build(config: &WorldConfig, origin: Vec3, rng: &mut StdRng) -> Result<Self> {
        let terrain = Terrain::new(&config.terrain);
        let mut props = Vec::new();

        let classes = [
            (EntityKind::Tree, &config.trees, config.trees.count),
            (EntityKind::Bush, &config.bushes, config.bushes.count),
            (EntityKind::Bird, &config.birds, config.birds.count),
            (EntityKind::Orb, &config.orbs, config.media.len()),
        ];
        for (kind, placement, count) in classes {
            let entities = scatter(rng, kind, count, placement.extent, placement.height)?;
            props.extend(entities.iter().enumerate().map(|(i, e)| Prop::from_entity(e, &terrain, i)));
        }

        log::info!("world built at {origin}: {} props", props.len());
        Ok(Self { origin, props })
    }

    pub fn origin(&self) -> Vec3 { self.origin }
    pub fn props(&self) -> &[Prop] { &self.props }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.props.iter().filter(|p| p.kind() == kind).count()
    }

    pub fn orbs(&self) -> impl Iterator<Item = &Prop> {
        self.props.iter().filter(|p| p.kind() == EntityKind::Orb)
    }
}

pub struct SceneComposer {
    config: WorldConfig,
    session: Session,
    rng: StdRng,
    clock: Clock,
    spin: Spin,
    tracker: ActivationTracker,
    world: Option<World>,
    world_builds: u32,
    viewer: Option<Vec3>,
    media: MediaPanel,
    items: Vec<FrameItem>,
    redraw: bool,
}

impl SceneComposer {
    pub fn new(config: WorldConfig, capabilities: DeviceCapabilities, seed: u64) -> Result<Self> {
        config.validate()?;
        let session = Session::new(capabilities, config.portal.clone());
        Ok(Self {
            spin: Spin::new(config.spin_rate),
            config,
            session,
            rng: StdRng::seed_from_u64(seed),
            clock: Clock::new(),
            tracker: ActivationTracker::new(ActivationPolicy::Proximity),
            world: None,
            world_builds: 0,
            viewer: None,
            media: MediaPanel::default(),
            items: Vec::new(),
            redraw: true,
        })
    }

    pub fn handle(&mut self, event: SceneEvent) -> Result<SessionMode> {
        log::debug!("scene event {event:?}");
        let event_name = event.name();
        let before = self.session.mode();
        let result = match event {
            SceneEvent::ArSupport(supported) => self.session.resolve_ar_support(supported),
            SceneEvent::PermissionRequested => self.session.request_permission().map(|_| self.session.mode()),
            SceneEvent::Permission(outcome) => self.session.apply_permission(outcome),
            SceneEvent::EnterDemo => self.session.enter_demo(),
            SceneEvent::SurfaceHit(position) => {
                self.session.report_surface_hit(position);
                self.redraw = true;
                Ok(self.session.mode())
            }
            SceneEvent::ConfirmPlacement => self.session.confirm_placement(),
            SceneEvent::SelectPortal => self.session.select_portal(),
            SceneEvent::SelectOrb(index) => self.select_orb(index),
        };

        if let Err(err) = &result {
            if err.is_recoverable() {
                log::info!("{event_name} refused: {err}");
            } else {
                log::warn!("{event_name} failed: {err}");
            }
        }

        let after = self.session.mode();
        if after != before {
            self.redraw = true;
        }
        if after == SessionMode::WorldEntered && self.world.is_none() {
            self.enter_world()?;
        }
        result
    }

    fn select_orb(&mut self, index: usize) -> Result<SessionMode> {
        let Some(world) = &self.world else {
            return Err(WorldError::UnknownOrb(index));
        };
        if index >= world.count(EntityKind::Orb) {
            return Err(WorldError::UnknownOrb(index));
        }
        let before = self.tracker.active();
        if self.tracker.select(index) != before {
            self.redraw = true;
        }
        Ok(self.session.mode())
    }

    fn enter_world(&mut self) -> Result<()> {
        let origin = self.session.portal().unwrap_or(self.config.portal.position);
        let world = World::build(&self.config, origin, &mut self.rng)?;
        self.world = Some(world);
        self.world_builds += 1;

        let policy = self
            .session
            .experience()
            .map_or(ActivationPolicy::Toggle, |e| e.activation_policy());
        self.tracker.set_policy(policy);
        self.redraw = true;
        Ok(())
    }

    /// Advance one rendered frame. `viewer` is the camera position in AR.
    pub fn frame(&mut self, dt: f32, viewer: Option<Vec3>) -> Result<&[FrameItem]> {
        self.clock.advance(dt);
        let spin = self.spin.advance(self.clock.delta());
        self.viewer = viewer;

        if let Some(viewer) = viewer {
            if self.session.update_viewer(viewer) {
                self.enter_world()?;
            }
        }

        self.items.clear();
        match self.session.mode() {
            SessionMode::PortalUnplaced => {
                if let Some(hit) = self.session.pending_hit() {
                    self.items.push(FrameItem {
                        kind: ItemKind::Reticle,
                        index: 0,
                        pose: Pose { position: hit, rotation_y: 0.0, scale: 1.0 },
                        active: false,
                    });
                }
            }
            SessionMode::PortalPlaced => {
                if let Some(portal) = self.session.portal() {
                    self.items.push(FrameItem {
                        kind: ItemKind::Portal,
                        index: 0,
                        pose: Pose { position: portal, rotation_y: spin, scale: 1.0 },
                        active: false,
                    });
                    self.redraw = true;
                }
            }
            SessionMode::WorldEntered => self.animate_world(spin),
            SessionMode::PermissionPending | SessionMode::UnsupportedDevice => {}
        }

        Ok(&self.items)
    }

    fn animate_world(&mut self, spin: f32) {
        let Some(world) = &self.world else { return };
        let motion = Motion::new(self.clock.elapsed(), spin, &self.config.flight, &self.config.bob);

        let mut counters = [0usize; 4];
        let mut candidates = Vec::with_capacity(self.config.media.len());
        for prop in world.props() {
            let kind = prop.kind();
            let slot = &mut counters[kind as usize];
            let index = *slot;
            *slot += 1;

            let mut pose = prop.pose(&motion);
            pose.position += world.origin;
            if kind == EntityKind::Orb {
                candidates.push((index, pose.position));
            }
            self.items.push(FrameItem { kind: kind.into(), index, pose, active: false });
        }

        let active = self.tracker.evaluate(&candidates, self.viewer, self.config.activation_radius);
        let changed = match active.and_then(|i| candidates.get(i).map(|&(_, p)| (i, p))) {
            Some((orb, position)) => {
                let media = world.orbs().nth(orb).and_then(|p| match p {
                    Prop::Orb { media, .. } => self.config.media.get(*media),
                    _ => None,
                });
                match media {
                    Some(item) => self.media.show(orb, item, position),
                    None => self.media.hide(),
                }
            }
            None => self.media.hide(),
        };
        if let Some(orb) = self.media.orb {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.kind == ItemKind::Orb && item.index == orb)
            {
                item.active = true;
            }
        }
        self.redraw |= changed || !self.items.is_empty();
    }

    /// Returns and clears the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn config(&self) -> &WorldConfig { &self.config }
    pub fn session(&self) -> &Session { &self.session }
    pub fn mode(&self) -> SessionMode { self.session.mode() }
    pub fn world(&self) -> Option<&World> { self.world.as_ref() }
    pub fn world_builds(&self) -> u32 { self.world_builds }
    pub fn active_orb(&self) -> Option<usize> { self.tracker.active() }
    pub fn media(&self) -> &MediaPanel { &self.media }
    pub fn clock(&self) -> &Clock { &self.clock }
    pub fn items(&self) -> &[FrameItem] { &self.items }
}
