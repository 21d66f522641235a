#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use cgmath::{Matrix4, SquareMatrix};
use flow_render::{
    MasterRenderer, RenderParts,
    batch::EntityBatches,
    camera::{Camera, Viewport},
    config::RendererConfig,
    context::{GraphicsContext, TextureId},
    data_structures::{entity::ModelId, light::Light, terrain::Terrain},
    pipelines::{entity::EntityRenderer, shadow::ShadowMapRenderer, terrain::TerrainRenderer},
    shader::ShaderProgram,
};

pub(crate) const ENTITY_SHADER: &str = "entity";
pub(crate) const TERRAIN_SHADER: &str = "terrain";
pub(crate) const SHADOW_MAP: TextureId = TextureId(42);
pub(crate) const SHADOW_DISTANCE: f32 = 150.0;
pub(crate) const SHADOW_MAP_SIZE: u32 = 4096;

/// Everything the doubles below observe, in call order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Start(&'static str),
    Stop(&'static str),
    Projection(&'static str, Matrix4<f32>),
    SkyColour(&'static str, [f32; 3]),
    Light(&'static str, Light),
    ViewMatrix(&'static str, Matrix4<f32>),
    ShadowDistance(&'static str, f32),
    ShadowMapSize(&'static str, u32),
    CleanUp(&'static str),
    /// Model and x positions of its instances, per batch.
    DrawEntities(Vec<(ModelId, Vec<f32>)>),
    DrawTerrains(Vec<Terrain>),
    ShadowRender {
        batches: Vec<(ModelId, usize)>,
        terrains: usize,
    },
    ShadowCleanUp,
    DepthTest,
    Clear(wgpu::Color),
    BindTexture(u32, TextureId),
    CullMode(Option<wgpu::Face>),
}

pub(crate) type Log = Rc<RefCell<Vec<Call>>>;

pub(crate) struct RecordingShader {
    name: &'static str,
    log: Log,
}

impl ShaderProgram for RecordingShader {
    fn start(&mut self) {
        self.log.borrow_mut().push(Call::Start(self.name));
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(Call::Stop(self.name));
    }

    fn load_projection_matrix(&mut self, projection: &Matrix4<f32>) {
        self.log
            .borrow_mut()
            .push(Call::Projection(self.name, *projection));
    }

    fn load_sky_colour(&mut self, rgb: [f32; 3]) {
        self.log.borrow_mut().push(Call::SkyColour(self.name, rgb));
    }

    fn load_light(&mut self, light: &Light) {
        self.log.borrow_mut().push(Call::Light(self.name, *light));
    }

    fn load_view_matrix(&mut self, camera: &Camera) {
        self.log
            .borrow_mut()
            .push(Call::ViewMatrix(self.name, camera.view_matrix()));
    }

    fn load_shadow_distance(&mut self, distance: f32) {
        self.log
            .borrow_mut()
            .push(Call::ShadowDistance(self.name, distance));
    }

    fn load_shadow_map_size(&mut self, size: u32) {
        self.log
            .borrow_mut()
            .push(Call::ShadowMapSize(self.name, size));
    }

    fn clean_up(&mut self) {
        self.log.borrow_mut().push(Call::CleanUp(self.name));
    }
}

pub(crate) struct RecordingEntityRenderer {
    log: Log,
    fail: Rc<Cell<bool>>,
}

impl EntityRenderer for RecordingEntityRenderer {
    type Shader = RecordingShader;

    fn render(
        &mut self,
        _: &mut RecordingShader,
        batches: &EntityBatches,
        _: &Matrix4<f32>,
    ) -> anyhow::Result<()> {
        let drawn = batches
            .iter()
            .map(|batch| {
                let xs = batch
                    .entities()
                    .iter()
                    .map(|entity| entity.instance.position.x)
                    .collect();
                (batch.model(), xs)
            })
            .collect();
        self.log.borrow_mut().push(Call::DrawEntities(drawn));
        if self.fail.get() {
            anyhow::bail!("entity vertex buffer lost");
        }
        Ok(())
    }
}

pub(crate) struct RecordingTerrainRenderer {
    log: Log,
    fail: Rc<Cell<bool>>,
}

impl TerrainRenderer for RecordingTerrainRenderer {
    type Shader = RecordingShader;

    fn render(
        &mut self,
        _: &mut RecordingShader,
        terrains: &[Terrain],
        _: &Matrix4<f32>,
    ) -> anyhow::Result<()> {
        self.log
            .borrow_mut()
            .push(Call::DrawTerrains(terrains.to_vec()));
        if self.fail.get() {
            anyhow::bail!("terrain height map missing");
        }
        Ok(())
    }
}

pub(crate) struct RecordingShadows {
    log: Log,
    fail: Rc<Cell<bool>>,
}

impl ShadowMapRenderer for RecordingShadows {
    fn render(
        &mut self,
        batches: &EntityBatches,
        terrains: &[Terrain],
        _: &Light,
    ) -> anyhow::Result<()> {
        let batches = batches
            .iter()
            .map(|batch| (batch.model(), batch.len()))
            .collect();
        self.log.borrow_mut().push(Call::ShadowRender {
            batches,
            terrains: terrains.len(),
        });
        if self.fail.get() {
            anyhow::bail!("shadow framebuffer incomplete");
        }
        Ok(())
    }

    fn shadow_distance(&self) -> f32 {
        SHADOW_DISTANCE
    }

    fn shadow_map_size(&self) -> u32 {
        SHADOW_MAP_SIZE
    }

    fn to_shadow_map_space(&self) -> Matrix4<f32> {
        Matrix4::identity()
    }

    fn shadow_map(&self) -> TextureId {
        SHADOW_MAP
    }

    fn clean_up(&mut self) {
        self.log.borrow_mut().push(Call::ShadowCleanUp);
    }
}

pub(crate) struct RecordingContext {
    log: Log,
}

impl GraphicsContext for RecordingContext {
    fn enable_depth_test(&mut self) {
        self.log.borrow_mut().push(Call::DepthTest);
    }

    fn clear(&mut self, colour: wgpu::Color) {
        self.log.borrow_mut().push(Call::Clear(colour));
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) {
        self.log.borrow_mut().push(Call::BindTexture(unit, texture));
    }

    fn set_cull_mode(&mut self, cull_mode: Option<wgpu::Face>) {
        self.log.borrow_mut().push(Call::CullMode(cull_mode));
    }
}

pub(crate) type TestRenderer =
    MasterRenderer<RecordingEntityRenderer, RecordingTerrainRenderer, RecordingShadows>;

/// Shared call log plus switches that make a sub-renderer fail.
pub(crate) struct Harness {
    pub(crate) log: Log,
    pub(crate) ctx: RecordingContext,
    pub(crate) fail_entities: Rc<Cell<bool>>,
    pub(crate) fail_terrain: Rc<Cell<bool>>,
    pub(crate) fail_shadows: Rc<Cell<bool>>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        init_logger();
        let log = Log::default();
        Self {
            ctx: RecordingContext { log: log.clone() },
            log,
            fail_entities: Rc::default(),
            fail_terrain: Rc::default(),
            fail_shadows: Rc::default(),
        }
    }

    pub(crate) fn parts(
        &self,
    ) -> RenderParts<RecordingEntityRenderer, RecordingTerrainRenderer, RecordingShadows> {
        RenderParts {
            entity_shader: RecordingShader {
                name: ENTITY_SHADER,
                log: self.log.clone(),
            },
            entity_renderer: RecordingEntityRenderer {
                log: self.log.clone(),
                fail: self.fail_entities.clone(),
            },
            terrain_shader: RecordingShader {
                name: TERRAIN_SHADER,
                log: self.log.clone(),
            },
            terrain_renderer: RecordingTerrainRenderer {
                log: self.log.clone(),
                fail: self.fail_terrain.clone(),
            },
            shadows: RecordingShadows {
                log: self.log.clone(),
                fail: self.fail_shadows.clone(),
            },
        }
    }

    /// Renderer for an 800x600 viewport with the default configuration. The
    /// construction calls are removed from the log.
    pub(crate) fn renderer(&mut self) -> TestRenderer {
        let parts = self.parts();
        let renderer = MasterRenderer::new(
            &mut self.ctx,
            RendererConfig::default(),
            Viewport::new(800, 600),
            move |_| Ok(parts),
        )
        .expect("renderer construction should succeed");
        self.take_calls();
        renderer
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Every entity batch handed to the entity renderer so far.
    pub(crate) fn entity_draws(&self) -> Vec<Vec<(ModelId, Vec<f32>)>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::DrawEntities(batches) => Some(batches),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn terrain_draws(&self) -> Vec<Vec<Terrain>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::DrawTerrains(terrains) => Some(terrains),
                _ => None,
            })
            .collect()
    }
}

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn sun() -> Light {
    Light::new([1000.0, 1000.0, -1000.0], [1.3, 1.3, 1.3])
}

pub(crate) fn camera() -> Camera {
    Camera::new((0.0, 10.0, 20.0), cgmath::Deg(-90.0), cgmath::Deg(-15.0))
}
