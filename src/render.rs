//! Frame orchestration.
//!
//! [`MasterRenderer`] owns the shaders, the entity and terrain renderers and
//! the shadow map renderer. Scene code submits entities and terrain tiles
//! while the renderer is idle; [`MasterRenderer::render`] then runs one frame:
//!
//! 1. prepare: depth test on, clear to the sky colour, bind the shadow map
//! 2. entity pass: entity shader with per-frame uniforms, batched draw
//! 3. terrain pass: same with the terrain shader and the terrain tiles
//! 4. finish: drop every submission so nothing leaks into the next frame
//!
//! The shadow map is rendered separately through
//! [`MasterRenderer::render_shadow_map`], normally right before `render`.

use crate::{
    batch::EntityBatcher,
    camera::{Camera, Projection, Viewport},
    config::RendererConfig,
    context::{GraphicsContext, TextureId},
    data_structures::{entity::Entity, light::Light, terrain::Terrain},
    error::{RenderError, Result},
    pipelines::{entity::EntityRenderer, shadow::ShadowMapRenderer, terrain::TerrainRenderer},
    shader::{FrameUniforms, ShaderProgram},
};

/// Where the renderer currently is within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// Accepting submissions.
    Idle,
    Preparing,
    EntityPass,
    TerrainPass,
    ShadowPass,
    /// Resources are gone; nothing is accepted anymore.
    Released,
}

/// Collaborators the renderer takes ownership of at construction.
pub struct RenderParts<E: EntityRenderer, T: TerrainRenderer, S: ShadowMapRenderer> {
    pub entity_shader: E::Shader,
    pub entity_renderer: E,
    pub terrain_shader: T::Shader,
    pub terrain_renderer: T,
    pub shadows: S,
}

/// Turns culling of `face` on. Renderers use their configured face through
/// [`MasterRenderer::enable_culling`].
pub fn enable_culling<G: GraphicsContext + ?Sized>(ctx: &mut G, face: wgpu::Face) {
    ctx.set_cull_mode(Some(face));
}

pub fn disable_culling<G: GraphicsContext + ?Sized>(ctx: &mut G) {
    ctx.set_cull_mode(None);
}

pub struct MasterRenderer<E: EntityRenderer, T: TerrainRenderer, S: ShadowMapRenderer> {
    config: RendererConfig,
    projection: Projection,
    entity_shader: E::Shader,
    entity_renderer: E,
    terrain_shader: T::Shader,
    terrain_renderer: T,
    shadows: S,
    batcher: EntityBatcher,
    state: FrameState,
}

impl<E, T, S> MasterRenderer<E, T, S>
where
    E: EntityRenderer,
    T: TerrainRenderer,
    S: ShadowMapRenderer,
{
    /// Creates the renderer for `viewport`.
    ///
    /// `build` creates the shaders and sub-renderers. Its failure is fatal and
    /// reported as [`RenderError::Construction`]. Once everything is built,
    /// culling of `config.cull_face` is enabled on `ctx` and the projection is
    /// loaded into both shaders; a failed construction leaves `ctx` untouched.
    pub fn new<G, F>(
        ctx: &mut G,
        config: RendererConfig,
        viewport: Viewport,
        build: F,
    ) -> Result<Self>
    where
        G: GraphicsContext + ?Sized,
        F: FnOnce(&RendererConfig) -> anyhow::Result<RenderParts<E, T, S>>,
    {
        let projection = Projection::new(viewport, config.fov, config.near_plane, config.far_plane)?;
        let parts = build(&config).map_err(RenderError::Construction)?;
        enable_culling(ctx, config.cull_face);

        let mut renderer = Self {
            config,
            projection,
            entity_shader: parts.entity_shader,
            entity_renderer: parts.entity_renderer,
            terrain_shader: parts.terrain_shader,
            terrain_renderer: parts.terrain_renderer,
            shadows: parts.shadows,
            batcher: EntityBatcher::new(),
            state: FrameState::Idle,
        };
        renderer.load_projection();
        log::debug!(
            "master renderer ready for {}x{} (fov {:?}, planes {}..{})",
            viewport.width,
            viewport.height,
            renderer.config.fov,
            renderer.config.near_plane,
            renderer.config.far_plane
        );
        Ok(renderer)
    }

    /// Queues an entity for the next frame.
    pub fn process_entity(&mut self, entity: Entity) -> Result<()> {
        self.ensure_idle()?;
        self.batcher.submit_entity(entity);
        Ok(())
    }

    pub fn process_terrain(&mut self, terrain: Terrain) -> Result<()> {
        self.ensure_idle()?;
        self.batcher.submit_terrain(terrain);
        Ok(())
    }

    /// Draws everything submitted since the last frame.
    ///
    /// Submissions are cleared whether or not the frame succeeds. When a
    /// sub-renderer fails, its shader is still stopped, the remaining passes
    /// are skipped and the error is returned; the renderer is idle again
    /// either way.
    pub fn render<G>(&mut self, ctx: &mut G, sun: &Light, camera: &Camera) -> Result<()>
    where
        G: GraphicsContext + ?Sized,
    {
        self.ensure_idle()?;
        self.state = FrameState::Preparing;
        self.prepare(ctx);

        let uniforms = FrameUniforms {
            sky_colour: self.config.sky_rgb(),
            light: *sun,
            camera: *camera,
            shadow_distance: self.shadows.shadow_distance(),
            shadow_map_size: self.shadows.shadow_map_size(),
        };
        let to_shadow_space = self.shadows.to_shadow_map_space();

        let drawn = self
            .entity_pass(&uniforms, &to_shadow_space)
            .and_then(|()| self.terrain_pass(&uniforms, &to_shadow_space));

        self.batcher.clear();
        self.state = FrameState::Idle;
        drawn
    }

    /// Renders the shadow map for `entities` and `terrains` lit by `sun`.
    ///
    /// The entities go through the same batching as a normal frame and are
    /// dropped afterwards, so they are not drawn again by the following
    /// [`render`](Self::render). Entities already queued with
    /// [`process_entity`](Self::process_entity) end up in the shadow map and
    /// are dropped too. Queued terrain tiles are left alone.
    pub fn render_shadow_map<I>(&mut self, entities: I, terrains: &[Terrain], sun: &Light) -> Result<()>
    where
        I: IntoIterator<Item = Entity>,
    {
        self.ensure_idle()?;
        if !self.batcher.batches().is_empty() {
            log::warn!(
                "{} queued entities are consumed by the shadow pass and will not be drawn this frame",
                self.batcher.instance_count()
            );
        }
        entities
            .into_iter()
            .for_each(|entity| self.batcher.submit_entity(entity));

        self.state = FrameState::ShadowPass;
        let batches = self.batcher.drain_batches();
        log::trace!(
            "shadow pass: {} models, {} instances, {} terrains",
            batches.len(),
            batches.instance_count(),
            terrains.len()
        );
        let rendered = self.shadows.render(&batches, terrains, sun);
        self.state = FrameState::Idle;
        rendered.map_err(|source| Self::pass_failed("shadow", source))
    }

    /// Recomputes the projection for a new viewport and hands it to both
    /// shaders. A degenerate viewport is rejected and the old projection kept.
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.ensure_idle()?;
        self.projection.resize(viewport)?;
        self.load_projection();
        log::debug!("projection resized to {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    /// Releases both shaders and the shadow map renderer.
    ///
    /// Only the first call does anything. Every later frame or submission
    /// call fails with [`RenderError::Released`].
    pub fn clean_up(&mut self) {
        if self.state == FrameState::Released {
            log::warn!("master renderer was already cleaned up");
            return;
        }
        self.entity_shader.clean_up();
        self.terrain_shader.clean_up();
        self.shadows.clean_up();
        self.batcher.clear();
        self.state = FrameState::Released;
        log::debug!("master renderer released");
    }

    /// Culls `config.cull_face` on `ctx`.
    pub fn enable_culling<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        enable_culling(ctx, self.config.cull_face);
    }

    pub fn disable_culling<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        disable_culling(ctx);
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn shadow_map_texture(&self) -> TextureId {
        self.shadows.shadow_map()
    }

    /// Entities and terrain tiles queued for the next frame.
    pub fn pending(&self) -> &EntityBatcher {
        &self.batcher
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.state {
            FrameState::Idle => Ok(()),
            FrameState::Released => Err(RenderError::Released),
            state => Err(RenderError::Busy { state }),
        }
    }

    fn prepare<G: GraphicsContext + ?Sized>(&self, ctx: &mut G) {
        ctx.enable_depth_test();
        ctx.clear(self.config.sky_colour);
        ctx.bind_texture(self.config.shadow_texture_unit, self.shadows.shadow_map());
    }

    fn entity_pass(
        &mut self,
        uniforms: &FrameUniforms,
        to_shadow_space: &cgmath::Matrix4<f32>,
    ) -> Result<()> {
        self.state = FrameState::EntityPass;
        let batches = self.batcher.batches();
        log::trace!(
            "entity pass: {} models, {} instances",
            batches.len(),
            batches.instance_count()
        );
        self.entity_shader.start();
        self.entity_shader.load_frame_uniforms(uniforms);
        let drawn = self
            .entity_renderer
            .render(&mut self.entity_shader, batches, to_shadow_space);
        self.entity_shader.stop();
        drawn.map_err(|source| Self::pass_failed("entity", source))
    }

    fn terrain_pass(
        &mut self,
        uniforms: &FrameUniforms,
        to_shadow_space: &cgmath::Matrix4<f32>,
    ) -> Result<()> {
        self.state = FrameState::TerrainPass;
        let terrains = self.batcher.terrains();
        log::trace!("terrain pass: {} tiles", terrains.len());
        self.terrain_shader.start();
        self.terrain_shader.load_frame_uniforms(uniforms);
        let drawn = self
            .terrain_renderer
            .render(&mut self.terrain_shader, terrains, to_shadow_space);
        self.terrain_shader.stop();
        drawn.map_err(|source| Self::pass_failed("terrain", source))
    }

    fn load_projection(&mut self) {
        let projection = *self.projection.matrix();
        load_projection_into(&mut self.entity_shader, &projection);
        load_projection_into(&mut self.terrain_shader, &projection);
    }

    fn pass_failed(pass: &'static str, source: anyhow::Error) -> RenderError {
        log::error!("{} pass failed, dropping frame: {:#}", pass, source);
        RenderError::Pass { pass, source }
    }
}

fn load_projection_into<P: ShaderProgram>(shader: &mut P, projection: &cgmath::Matrix4<f32>) {
    shader.start();
    shader.load_projection_matrix(projection);
    shader.stop();
}

impl<E, T, S> Drop for MasterRenderer<E, T, S>
where
    E: EntityRenderer,
    T: TerrainRenderer,
    S: ShadowMapRenderer,
{
    fn drop(&mut self) {
        if self.state != FrameState::Released {
            self.clean_up();
        }
    }
}
