//! Knight scene
//!
//! An animated knight blending two animation stages, a particle system held
//! in its right hand, a shadow casting light and an HDR post process.

use horde3d::{
    CameraParams, Engine, EngineOption, HordeError, LightParams, Node, NodeType, Resource,
    ResourceFlags, ResourceType, Transform,
};

use super::overlays::{logo_quad, viewport_aspect};
use crate::config::KnightConfig;

/// Post process material created by the HDR pipeline
const POST_HDR_MATERIAL: &str = "pipelines/postHDR.material.xml";

/// Highest frame stats mode; 0 hides the panel
pub const MAX_STATS_MODE: u32 = horde3d::sys::constants::H3DUT_MAX_STAT_MODE as u32;

/// Resources queued before content is loaded from disk
#[derive(Debug, Clone, Copy)]
pub struct KnightResources {
    pub hdr_pipeline: Resource,
    pub forward_pipeline: Resource,
    pub font: Resource,
    pub panel: Resource,
    pub logo: Resource,
    environment: Resource,
    knight: Resource,
    order_anim: Resource,
    attack_anim: Resource,
    particles: Resource,
}

impl KnightResources {
    /// Queue every resource the scene needs
    pub fn add(engine: &Engine) -> Result<Self, HordeError> {
        let add = |res_type: ResourceType, name: &str| {
            engine.add_resource(res_type, name, ResourceFlags::empty())
        };
        Ok(Self {
            hdr_pipeline: add(ResourceType::Pipeline, "pipelines/hdr.pipeline.xml")?,
            forward_pipeline: add(ResourceType::Pipeline, "pipelines/forward.pipeline.xml")?,
            font: add(ResourceType::Material, "overlays/font.material.xml")?,
            panel: add(ResourceType::Material, "overlays/panel.material.xml")?,
            logo: add(ResourceType::Material, "overlays/logo.material.xml")?,
            environment: add(ResourceType::SceneGraph, "models/sphere/sphere.scene.xml")?,
            knight: add(ResourceType::SceneGraph, "models/knight/knight.scene.xml")?,
            order_anim: add(ResourceType::Animation, "animations/knight_order.anim")?,
            attack_anim: add(ResourceType::Animation, "animations/knight_attack.anim")?,
            particles: add(
                ResourceType::SceneGraph,
                "particles/particleSys1/particleSys1.scene.xml",
            )?,
        })
    }
}

/// Scene nodes and per-frame state of the knight sample
pub struct KnightScene {
    resources: KnightResources,
    camera: Node,
    knight: Node,
    particle_sys: Node,
    anim_fps: f32,
    anim_time: f32,
    frozen: bool,
    stats_mode: u32,
    debug_view: bool,
    wireframe: bool,
}

impl KnightScene {
    /// Build the scene graph from loaded resources
    pub fn build(
        engine: &Engine,
        resources: KnightResources,
        config: &KnightConfig,
    ) -> Result<Self, HordeError> {
        let camera = engine.add_camera_node(Node::ROOT, "Camera", resources.hdr_pipeline)?;
        engine.set_node_param_i(camera, CameraParams::OccCullingI, 0);

        let environment = engine.add_nodes(Node::ROOT, resources.environment)?;
        engine.set_node_transform(
            environment,
            &Transform::from_translation(0.0, -20.0, 0.0).with_uniform_scale(20.0),
        );

        let knight = engine.add_nodes(Node::ROOT, resources.knight)?;
        engine.set_node_transform(
            knight,
            &Transform::IDENTITY
                .with_rotation(0.0, 180.0, 0.0)
                .with_uniform_scale(0.1),
        );
        engine.setup_model_anim_stage(knight, 0, resources.order_anim, 0, "", false)?;
        engine.setup_model_anim_stage(knight, 1, resources.attack_anim, 0, "", false)?;

        let hand = match engine
            .find_nodes(knight, &config.particle_joint, NodeType::Joint)?
            .first()
        {
            Some(&joint) => joint,
            None => {
                log::warn!(
                    "Joint {:?} not found, attaching particles to the model",
                    config.particle_joint
                );
                knight
            }
        };
        let particle_sys = engine.add_nodes(hand, resources.particles)?;
        engine.set_node_transform(
            particle_sys,
            &Transform::from_translation(0.0, 40.0, 0.0).with_rotation(90.0, 0.0, 0.0),
        );

        add_light(engine, config)?;
        tune_post_hdr(engine, config)?;

        Ok(Self {
            resources,
            camera,
            knight,
            particle_sys,
            anim_fps: config.anim_fps,
            anim_time: 0.0,
            frozen: false,
            stats_mode: 0,
            debug_view: false,
            wireframe: false,
        })
    }

    /// Builder: initial frame stats mode, clamped to [`MAX_STATS_MODE`]
    pub fn with_stats_mode(mut self, mode: u32) -> Self {
        self.stats_mode = mode.min(MAX_STATS_MODE);
        self
    }

    pub fn camera(&self) -> Node {
        self.camera
    }

    /// Both pipelines, for buffer resizing
    pub fn pipelines(&self) -> [Resource; 2] {
        [self.resources.hdr_pipeline, self.resources.forward_pipeline]
    }

    pub fn stats_mode(&self) -> u32 {
        self.stats_mode
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Swap the camera between the HDR and forward pipelines
    ///
    /// Returns the pipeline now in use.
    pub fn toggle_pipeline(&self, engine: &Engine) -> Resource {
        let current = Resource::from_raw(engine.node_param_i(self.camera, CameraParams::PipeResI));
        let next = if current == self.resources.hdr_pipeline {
            self.resources.forward_pipeline
        } else {
            self.resources.hdr_pipeline
        };
        engine.set_node_param_i(self.camera, CameraParams::PipeResI, next.raw());
        next
    }

    pub fn cycle_stats(&mut self) -> u32 {
        self.stats_mode = (self.stats_mode + 1) % (MAX_STATS_MODE + 1);
        self.stats_mode
    }

    pub fn toggle_debug_view(&mut self, engine: &Engine) -> Result<bool, HordeError> {
        engine.set_option(EngineOption::DebugViewMode, flag(!self.debug_view))?;
        self.debug_view = !self.debug_view;
        Ok(self.debug_view)
    }

    pub fn toggle_wireframe(&mut self, engine: &Engine) -> Result<bool, HordeError> {
        engine.set_option(EngineOption::WireframeMode, flag(!self.wireframe))?;
        self.wireframe = !self.wireframe;
        Ok(self.wireframe)
    }

    /// Freeze or resume animation and particles
    pub fn toggle_freeze(&mut self) -> bool {
        self.frozen = !self.frozen;
        self.frozen
    }

    /// Advance animation and particles by `dt` seconds
    ///
    /// `weights` are the blend weights of stage 0 and stage 1.
    pub fn update(&mut self, engine: &Engine, dt: f32, weights: (f32, f32)) -> Result<(), HordeError> {
        if !self.frozen {
            self.anim_time += dt;
        }

        let frame = self.anim_time * self.anim_fps;
        engine.set_model_anim_params(self.knight, 0, frame, weights.0)?;
        engine.set_model_anim_params(self.knight, 1, frame, weights.1)?;

        if !self.frozen {
            // The particle system is a group of several emitters
            for emitter in engine.find_nodes(self.particle_sys, "", NodeType::Emitter)? {
                engine.advance_emitter_time(emitter, dt);
            }
        }
        Ok(())
    }

    /// Place the camera, queue overlays and render
    pub fn render(&self, engine: &Engine, view: &Transform) -> Result<(), HordeError> {
        engine.set_node_transform(self.camera, view);

        if self.stats_mode > 0 && engine.has_utils() {
            engine.show_frame_stats(self.resources.font, self.resources.panel, self.stats_mode)?;
        }

        let aspect = viewport_aspect(
            engine.node_param_i(self.camera, CameraParams::ViewportWidthI),
            engine.node_param_i(self.camera, CameraParams::ViewportHeightI),
        );
        engine.show_overlays(&logo_quad(aspect), [1.0; 4], self.resources.logo, 0)?;

        engine.render(self.camera);
        Ok(())
    }
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

fn add_light(engine: &Engine, config: &KnightConfig) -> Result<Node, HordeError> {
    let light = engine.add_light_node(Node::ROOT, "Light1", Resource::NONE, "LIGHTING", "SHADOWMAP")?;
    engine.set_node_transform(
        light,
        &Transform::from_translation(0.0, 15.0, 10.0).with_rotation(-60.0, 0.0, 0.0),
    );
    engine.set_node_param_f(light, LightParams::RadiusF, 0, 30.0)?;
    engine.set_node_param_f(light, LightParams::FovF, 0, 90.0)?;
    engine.set_node_param_i(light, LightParams::ShadowMapCountI, 1);
    engine.set_node_param_f(light, LightParams::ShadowMapBiasF, 0, 0.01)?;
    for (comp, &value) in config.light_color.iter().enumerate() {
        engine.set_node_param_f(light, LightParams::ColorF3, comp, value)?;
    }
    engine.set_node_param_f(light, LightParams::ColorMultiplierF, 0, 1.0)?;
    Ok(light)
}

fn tune_post_hdr(engine: &Engine, config: &KnightConfig) -> Result<(), HordeError> {
    let Some(material) = engine.find_resource(ResourceType::Material, POST_HDR_MATERIAL)? else {
        log::warn!("{} not loaded, HDR uniforms keep their defaults", POST_HDR_MATERIAL);
        return Ok(());
    };
    let uniforms = [
        ("hdrExposure", config.hdr_exposure),
        ("hdrBrightThres", config.hdr_bright_threshold),
        ("hdrBrightOffset", config.hdr_bright_offset),
    ];
    for (name, value) in uniforms {
        engine.set_material_uniform(material, name, [value, 0.0, 0.0, 0.0])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use horde3d::sys::{Horde3DApi, H3DNode, H3DRes};
    use std::cell::{Cell, RefCell};
    use std::ffi::CStr;
    use std::os::raw::{c_char, c_float, c_int};

    const HAND: H3DNode = 40;
    const EMITTERS: [H3DNode; 2] = [51, 52];

    thread_local! {
        static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
        static NEXT_HANDLE: Cell<c_int> = const { Cell::new(1) };
        static FOUND: RefCell<Vec<H3DNode>> = const { RefCell::new(Vec::new()) };
        static PIPE_RES: Cell<c_int> = const { Cell::new(0) };
    }

    fn record(call: String) {
        CALLS.with(|c| c.borrow_mut().push(call));
    }

    fn calls() -> Vec<String> {
        CALLS.with(|c| c.borrow().clone())
    }

    fn next_handle() -> c_int {
        NEXT_HANDLE.with(|n| {
            let handle = n.get();
            n.set(handle + 1);
            handle
        })
    }

    unsafe fn text(ptr: *const c_char) -> String {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }

    extern "C" fn fake_add_resource(_ty: c_int, _name: *const c_char, _flags: c_int) -> H3DRes {
        next_handle()
    }

    extern "C" fn fake_find_resource(_ty: c_int, name: *const c_char) -> H3DRes {
        let name = unsafe { text(name) };
        if name == POST_HDR_MATERIAL {
            99
        } else {
            0
        }
    }

    extern "C" fn fake_add_camera_node(_parent: H3DNode, _name: *const c_char, pipeline: H3DRes) -> H3DNode {
        PIPE_RES.with(|p| p.set(pipeline));
        10
    }

    extern "C" fn fake_add_nodes(parent: H3DNode, res: H3DRes) -> H3DNode {
        record(format!("add_nodes {} {}", parent, res));
        100 + res
    }

    extern "C" fn fake_add_light_node(
        _parent: H3DNode,
        name: *const c_char,
        material: H3DRes,
        lighting: *const c_char,
        shadow: *const c_char,
    ) -> H3DNode {
        let (name, lighting, shadow) = unsafe { (text(name), text(lighting), text(shadow)) };
        record(format!("light {} {} {} {}", name, material, lighting, shadow));
        30
    }

    extern "C" fn fake_find_nodes(start: H3DNode, name: *const c_char, node_type: c_int) -> c_int {
        let name = unsafe { text(name) };
        record(format!("find {} {:?} {}", start, name, node_type));
        let found: Vec<H3DNode> = match node_type {
            t if t == NodeType::Joint.raw() => vec![HAND],
            t if t == NodeType::Emitter.raw() => EMITTERS.to_vec(),
            _ => Vec::new(),
        };
        let count = found.len() as c_int;
        FOUND.with(|f| *f.borrow_mut() = found);
        count
    }

    extern "C" fn fake_get_node_find_result(index: c_int) -> H3DNode {
        FOUND.with(|f| f.borrow().get(index as usize).copied().unwrap_or(0))
    }

    extern "C" fn fake_set_node_param_f(node: H3DNode, param: c_int, comp: c_int, value: c_float) {
        record(format!("param_f {} {} {} {}", node, param, comp, value));
    }

    extern "C" fn fake_get_node_param_i(_node: H3DNode, param: c_int) -> c_int {
        if param == CameraParams::PipeResI.raw() {
            PIPE_RES.with(|p| p.get())
        } else {
            0
        }
    }

    extern "C" fn fake_set_node_param_i(_node: H3DNode, param: c_int, value: c_int) {
        if param == CameraParams::PipeResI.raw() {
            PIPE_RES.with(|p| p.set(value));
        }
    }

    extern "C" fn fake_set_material_uniform(
        res: H3DRes,
        name: *const c_char,
        a: c_float,
        _b: c_float,
        _c: c_float,
        _d: c_float,
    ) -> bool {
        let name = unsafe { text(name) };
        record(format!("uniform {} {} {}", res, name, a));
        true
    }

    extern "C" fn fake_set_model_anim_params(node: H3DNode, stage: c_int, time: c_float, weight: c_float) {
        record(format!("anim {} {} {} {}", node, stage, time, weight));
    }

    extern "C" fn fake_advance_emitter_time(node: H3DNode, dt: c_float) {
        record(format!("emitter {} {}", node, dt));
    }

    extern "C" fn fake_set_option(param: c_int, value: c_float) -> bool {
        record(format!("option {} {}", param, value));
        true
    }

    fn engine() -> Engine {
        CALLS.with(|c| c.borrow_mut().clear());
        NEXT_HANDLE.with(|n| n.set(1));
        let mut api = Horde3DApi::stubbed();
        api.add_resource = fake_add_resource;
        api.find_resource = fake_find_resource;
        api.add_camera_node = fake_add_camera_node;
        api.add_nodes = fake_add_nodes;
        api.add_light_node = fake_add_light_node;
        api.find_nodes = fake_find_nodes;
        api.get_node_find_result = fake_get_node_find_result;
        api.set_node_param_f = fake_set_node_param_f;
        api.get_node_param_i = fake_get_node_param_i;
        api.set_node_param_i = fake_set_node_param_i;
        api.set_material_uniform = fake_set_material_uniform;
        api.set_model_anim_params = fake_set_model_anim_params;
        api.advance_emitter_time = fake_advance_emitter_time;
        api.set_option = fake_set_option;
        Engine::from_tables(api, None)
    }

    fn scene(engine: &Engine) -> KnightScene {
        let resources = KnightResources::add(engine).unwrap();
        KnightScene::build(engine, resources, &KnightConfig::default()).unwrap()
    }

    #[test]
    fn test_resources_get_distinct_handles() {
        let engine = engine();
        let res = KnightResources::add(&engine).unwrap();
        assert_eq!(res.hdr_pipeline, Resource::from_raw(1));
        assert_eq!(res.forward_pipeline, Resource::from_raw(2));
        assert_eq!(res.particles, Resource::from_raw(10));
    }

    #[test]
    fn test_particles_attach_to_hand_joint() {
        let engine = engine();
        let scene = scene(&engine);
        assert_eq!(scene.particle_sys, Node::from_raw(110));
        let log = calls();
        assert!(log.contains(&format!("find 107 \"Bip01_R_Hand\" {}", NodeType::Joint.raw())));
        assert!(log.contains(&format!("add_nodes {} 10", HAND)));
    }

    #[test]
    fn test_light_and_post_process_setup() {
        let engine = engine();
        scene(&engine);
        let log = calls();
        assert!(log.contains(&"light Light1 0 LIGHTING SHADOWMAP".to_string()));
        let radius = LightParams::RadiusF.raw();
        assert!(log.contains(&format!("param_f 30 {} 0 30", radius)));
        let color = LightParams::ColorF3.raw();
        assert!(log.contains(&format!("param_f 30 {} 1 0.8", color)));
        assert!(log.contains(&"uniform 99 hdrExposure 2.5".to_string()));
        assert!(log.contains(&"uniform 99 hdrBrightOffset 0.08".to_string()));
    }

    #[test]
    fn test_update_blends_stages_and_advances_emitters() {
        let engine = engine();
        let mut scene = scene(&engine);
        CALLS.with(|c| c.borrow_mut().clear());

        scene.update(&engine, 0.5, (0.25, 0.75)).unwrap();
        let log = calls();
        assert!(log.contains(&"anim 107 0 12 0.25".to_string()));
        assert!(log.contains(&"anim 107 1 12 0.75".to_string()));
        assert!(log.contains(&"emitter 51 0.5".to_string()));
        assert!(log.contains(&"emitter 52 0.5".to_string()));
    }

    #[test]
    fn test_frozen_scene_holds_time() {
        let engine = engine();
        let mut scene = scene(&engine);
        scene.update(&engine, 0.5, (1.0, 0.0)).unwrap();
        assert!(scene.toggle_freeze());
        CALLS.with(|c| c.borrow_mut().clear());

        scene.update(&engine, 0.5, (1.0, 0.0)).unwrap();
        let log = calls();
        assert!(log.contains(&"anim 107 0 12 1".to_string()));
        assert!(!log.iter().any(|call| call.starts_with("emitter")));
    }

    #[test]
    fn test_pipeline_toggle_round_trips() {
        let engine = engine();
        let scene = scene(&engine);
        let [hdr, forward] = scene.pipelines();
        assert_eq!(scene.toggle_pipeline(&engine), forward);
        assert_eq!(scene.toggle_pipeline(&engine), hdr);
    }

    #[test]
    fn test_stats_cycle_wraps() {
        let engine = engine();
        let mut scene = scene(&engine);
        assert_eq!(scene.cycle_stats(), 1);
        assert_eq!(scene.cycle_stats(), 2);
        assert_eq!(scene.cycle_stats(), 0);
        assert_eq!(scene.with_stats_mode(7).stats_mode(), MAX_STATS_MODE);
    }

    #[test]
    fn test_debug_toggles_set_options() {
        let engine = engine();
        let mut scene = scene(&engine);
        CALLS.with(|c| c.borrow_mut().clear());
        assert!(scene.toggle_wireframe(&engine).unwrap());
        assert!(scene.toggle_debug_view(&engine).unwrap());
        assert!(!scene.toggle_wireframe(&engine).unwrap());
        assert_eq!(
            calls(),
            vec![
                format!("option {} 1", EngineOption::WireframeMode.raw()),
                format!("option {} 1", EngineOption::DebugViewMode.raw()),
                format!("option {} 0", EngineOption::WireframeMode.raw()),
            ]
        );
    }
}
