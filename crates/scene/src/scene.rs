//! The scene: buildings, lights and the clock that drives the sun.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use projection::MercatorProjector;
use scene_common::{CartesianPosition, GeoCoordinate, SceneResult};
use solar::{angles_to_cartesian, solar_angles};

use crate::building::{Building, BuildingRecord};
use crate::config::SceneConfig;
use crate::events::{EventBus, SceneEvent};
use crate::material::MaterialPalette;
use crate::objects::{axis_markers, AxisMarker, Camera, GroundPlane, PointLight, SunLight};
use crate::snapshot::{BuildingSnapshot, SceneSnapshot};

/// A sunlit scene of extruded buildings.
///
/// Single owner; every mutation publishes exactly one [`SceneEvent`].
pub struct Scene {
    config: SceneConfig,
    projector: MercatorProjector,
    palette: MaterialPalette,
    rng: StdRng,
    clock: DateTime<Utc>,
    sun: SunLight,
    fill_light: PointLight,
    floor: GroundPlane,
    camera: Camera,
    helpers: Vec<AxisMarker>,
    buildings: Vec<Building>,
    next_id: usize,
    events: EventBus,
}

impl Scene {
    /// Build an empty scene with the sun placed for `now`.
    pub fn new(config: SceneConfig, now: DateTime<Utc>) -> SceneResult<Self> {
        config.validate()?;
        let projector = MercatorProjector::new(config.projection())?;
        let rng = match config.material_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut scene = Self {
            palette: MaterialPalette::new(&config.texture_dir),
            floor: GroundPlane::new(config.floor_size, &config.texture_dir),
            camera: Camera::looking_at_origin(config.camera_distance),
            fill_light: PointLight::default(),
            helpers: axis_markers(),
            sun: SunLight::default(),
            clock: now,
            buildings: Vec::new(),
            next_id: 0,
            events: EventBus::new(),
            projector,
            rng,
            config,
        };
        scene.place_sun(now)?;

        info!(
            center = %scene.center(),
            zoom = scene.config.zoom,
            clock = %now,
            "Scene created"
        );
        Ok(scene)
    }

    /// Receive every subsequent change to the scene.
    pub fn subscribe(&self) -> broadcast::Receiver<SceneEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn center(&self) -> GeoCoordinate {
        self.projector.config().center
    }

    pub fn projector(&self) -> &MercatorProjector {
        &self.projector
    }

    pub fn clock(&self) -> DateTime<Utc> {
        self.clock
    }

    pub fn sun(&self) -> &SunLight {
        &self.sun
    }

    pub fn fill_light(&self) -> &PointLight {
        &self.fill_light
    }

    pub fn floor(&self) -> &GroundPlane {
        &self.floor
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn helpers(&self) -> &[AxisMarker] {
        &self.helpers
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, id: usize) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    /// Move the projection centre.
    ///
    /// Buildings already in the scene keep their placement until
    /// [`Scene::rerender_buildings`] is called. The sun is recomputed for the
    /// new centre on the next clock update.
    pub fn set_center(&mut self, center: GeoCoordinate) -> SceneResult<()> {
        let projector = MercatorProjector::new(self.projector.config().with_center(center))?;
        self.projector = projector;
        self.config.center_lon = center.lon;
        self.config.center_lat = center.lat;

        info!(%center, "Scene centre changed");
        self.events.publish(SceneEvent::CenterChanged(center));
        Ok(())
    }

    /// Recompute the sun light for `timestamp` at the scene centre.
    pub fn update_sun_position(&mut self, timestamp: DateTime<Utc>) -> SceneResult<CartesianPosition> {
        let position = self.place_sun(timestamp)?;
        self.events.publish(SceneEvent::SunMoved {
            clock: timestamp,
            position,
        });
        Ok(position)
    }

    fn place_sun(&mut self, timestamp: DateTime<Utc>) -> SceneResult<CartesianPosition> {
        let angles = solar_angles(&timestamp, &self.center())?;
        let position = angles_to_cartesian(&angles, self.config.sun_distance);

        debug!(
            clock = %timestamp,
            azimuth_deg = angles.azimuth.to_degrees(),
            altitude_deg = angles.altitude.to_degrees(),
            x = position.x,
            y = position.y,
            z = position.z,
            "Sun placed"
        );

        self.clock = timestamp;
        self.sun.position = position;
        self.sun.angles = Some(angles);
        Ok(position)
    }

    /// Project, extrude and add a building. Returns its id.
    pub fn render_building(&mut self, record: BuildingRecord) -> SceneResult<usize> {
        let id = self.next_id;
        let (palette, rng) = (&self.palette, &mut self.rng);
        let building = Building::build_with(
            id,
            record,
            &self.projector,
            self.config.level_height,
            |record| palette.choose(rng, record.landmark),
        )?;

        self.next_id += 1;
        self.buildings.push(building);
        self.events.publish(SceneEvent::BuildingAdded { id });
        Ok(id)
    }

    /// Project every building again against the current centre.
    ///
    /// Either all buildings are replaced or, on error, none are.
    pub fn rerender_buildings(&mut self) -> SceneResult<usize> {
        let rebuilt = self
            .buildings
            .iter()
            .map(|b| b.reproject(&self.projector, self.config.level_height))
            .collect::<SceneResult<Vec<_>>>()?;
        let count = rebuilt.len();
        self.buildings = rebuilt;

        info!(count, center = %self.center(), "Buildings reprojected");
        self.events.publish(SceneEvent::BuildingsReprojected { count });
        Ok(count)
    }

    /// Remove every building.
    pub fn unload(&mut self) {
        let removed = self.buildings.len();
        self.buildings.clear();

        info!(removed, "Scene unloaded");
        self.events.publish(SceneEvent::Unloaded);
    }

    /// Apply clock ticks until the sender side closes. Returns the number of
    /// ticks applied; stops at the first invalid tick.
    pub async fn follow_clock(&mut self, mut ticks: mpsc::Receiver<DateTime<Utc>>) -> SceneResult<usize> {
        let mut applied = 0;
        while let Some(timestamp) = ticks.recv().await {
            self.update_sun_position(timestamp)?;
            applied += 1;
        }
        debug!(applied, "Clock closed");
        Ok(applied)
    }

    /// Serializable view of the scene. Meshes are included on request.
    pub fn snapshot(&self, include_meshes: bool) -> SceneSnapshot {
        SceneSnapshot {
            center: self.center(),
            zoom: self.config.zoom,
            clock: self.clock,
            sun: self.sun.clone(),
            fill_light: self.fill_light.clone(),
            floor: self.floor.clone(),
            camera: self.camera.clone(),
            helpers: self.helpers.clone(),
            buildings: self
                .buildings
                .iter()
                .map(|b| BuildingSnapshot::from_building(b, include_meshes))
                .collect(),
        }
    }
}
