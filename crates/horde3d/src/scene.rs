//! Scene graph functions

use std::os::raw::{c_float, c_int};

use crate::engine::Engine;
use crate::error::{HordeError, Result};
use crate::ffi::{c_len, c_string, copy_engine_string};
use crate::handle::{Node, Resource};
use crate::types::{NodeAccessor, NodeFlags, NodeType};

/// Local transformation of a node: translation, Euler rotation in degrees,
/// and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: [0.0; 3],
        rotation: [0.0; 3],
        scale: [1.0; 3],
    };

    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: [x, y, z],
            ..Self::IDENTITY
        }
    }

    /// Builder: Euler angles in degrees
    pub fn with_rotation(mut self, rx: f32, ry: f32, rz: f32) -> Self {
        self.rotation = [rx, ry, rz];
        self
    }

    pub fn with_scale(mut self, sx: f32, sy: f32, sz: f32) -> Self {
        self.scale = [sx, sy, sz];
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(scale, scale, scale)
    }
}

/// Relative and absolute 4x4 column-major matrices of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMatrices {
    pub relative: [f32; 16],
    pub absolute: [f32; 16],
}

/// World space bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn contains(&self, point: [f32; 3]) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

/// One ray intersection, ordered by distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub node: Node,
    pub distance: f32,
    pub point: [f32; 3],
}

/// Batch and vertex range of a mesh node inside its geometry resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshBatch {
    pub batch_start: u32,
    pub batch_count: u32,
    pub vert_range_start: u32,
    pub vert_range_end: u32,
}

impl Engine {
    /// Type of a node; `Undefined` for invalid handles
    pub fn node_type(&self, node: Node) -> NodeType {
        let raw = unsafe { (self.api.get_node_type)(node.raw()) };
        NodeType::from_raw(raw).unwrap_or(NodeType::Undefined)
    }

    /// `None` for the root node and invalid handles
    pub fn node_parent(&self, node: Node) -> Option<Node> {
        Node::checked(unsafe { (self.api.get_node_parent)(node.raw()) })
    }

    pub fn set_node_parent(&self, node: Node, parent: Node) -> Result<()> {
        if unsafe { (self.api.set_node_parent)(node.raw(), parent.raw()) } {
            Ok(())
        } else {
            Err(HordeError::Rejected { call: "h3dSetNodeParent" })
        }
    }

    /// Child at `index`, `None` when out of range
    pub fn node_child(&self, node: Node, index: usize) -> Option<Node> {
        let index = c_int::try_from(index).ok()?;
        Node::checked(unsafe { (self.api.get_node_child)(node.raw(), index) })
    }

    pub fn node_children(&self, node: Node) -> Vec<Node> {
        (0..).map_while(|index| self.node_child(node, index)).collect()
    }

    /// Instantiates a scene graph resource below `parent`; returns its root
    pub fn add_nodes(&self, parent: Node, scene_graph: Resource) -> Result<Node> {
        Node::checked(unsafe { (self.api.add_nodes)(parent.raw(), scene_graph.raw()) })
            .ok_or(HordeError::Rejected { call: "h3dAddNodes" })
    }

    /// Removes a node and its subtree
    pub fn remove_node(&self, node: Node) {
        unsafe { (self.api.remove_node)(node.raw()) }
    }

    /// True if the node was transformed since the flag was last reset
    pub fn check_node_trans_flag(&self, node: Node, reset: bool) -> bool {
        unsafe { (self.api.check_node_trans_flag)(node.raw(), reset) }
    }

    pub fn node_transform(&self, node: Node) -> Transform {
        let mut t = Transform::IDENTITY;
        let [tx, ty, tz] = &mut t.translation;
        let [rx, ry, rz] = &mut t.rotation;
        let [sx, sy, sz] = &mut t.scale;
        unsafe { (self.api.get_node_transform)(node.raw(), tx, ty, tz, rx, ry, rz, sx, sy, sz) };
        t
    }

    pub fn set_node_transform(&self, node: Node, transform: &Transform) {
        let [tx, ty, tz] = transform.translation;
        let [rx, ry, rz] = transform.rotation;
        let [sx, sy, sz] = transform.scale;
        unsafe { (self.api.set_node_transform)(node.raw(), tx, ty, tz, rx, ry, rz, sx, sy, sz) }
    }

    /// Copies the node matrices; `None` for invalid handles
    pub fn node_matrices(&self, node: Node) -> Option<NodeMatrices> {
        let mut relative: *const c_float = std::ptr::null();
        let mut absolute: *const c_float = std::ptr::null();
        unsafe { (self.api.get_node_trans_mats)(node.raw(), &mut relative, &mut absolute) };
        if relative.is_null() || absolute.is_null() {
            return None;
        }
        let mut matrices = NodeMatrices {
            relative: [0.0; 16],
            absolute: [0.0; 16],
        };
        unsafe {
            matrices
                .relative
                .copy_from_slice(std::slice::from_raw_parts(relative, 16));
            matrices
                .absolute
                .copy_from_slice(std::slice::from_raw_parts(absolute, 16));
        }
        Some(matrices)
    }

    /// Sets the relative matrix (column-major)
    pub fn set_node_matrix(&self, node: Node, matrix: &[f32; 16]) {
        unsafe { (self.api.set_node_trans_mat)(node.raw(), matrix.as_ptr()) }
    }

    pub fn node_param_i(&self, node: Node, param: impl NodeAccessor) -> i32 {
        unsafe { (self.api.get_node_param_i)(node.raw(), param.raw()) }
    }

    pub fn set_node_param_i(&self, node: Node, param: impl NodeAccessor, value: i32) {
        unsafe { (self.api.set_node_param_i)(node.raw(), param.raw(), value) }
    }

    /// `comp_idx` selects the component of vector parameters (0 for scalars)
    pub fn node_param_f(&self, node: Node, param: impl NodeAccessor, comp_idx: usize) -> Result<f32> {
        let comp_idx = c_len(comp_idx)?;
        Ok(unsafe { (self.api.get_node_param_f)(node.raw(), param.raw(), comp_idx) })
    }

    pub fn set_node_param_f(
        &self,
        node: Node,
        param: impl NodeAccessor,
        comp_idx: usize,
        value: f32,
    ) -> Result<()> {
        let comp_idx = c_len(comp_idx)?;
        unsafe { (self.api.set_node_param_f)(node.raw(), param.raw(), comp_idx, value) };
        Ok(())
    }

    pub fn node_param_str(&self, node: Node, param: impl NodeAccessor) -> String {
        unsafe { copy_engine_string((self.api.get_node_param_str)(node.raw(), param.raw())) }
    }

    /// The string stays alive for the duration of the call; the engine copies it
    pub fn set_node_param_str(&self, node: Node, param: impl NodeAccessor, value: &str) -> Result<()> {
        let value = c_string(value)?;
        unsafe { (self.api.set_node_param_str)(node.raw(), param.raw(), value.as_ptr()) };
        Ok(())
    }

    pub fn node_flags(&self, node: Node) -> NodeFlags {
        NodeFlags::from_bits_truncate(unsafe { (self.api.get_node_flags)(node.raw()) })
    }

    pub fn set_node_flags(&self, node: Node, flags: NodeFlags, recursive: bool) {
        unsafe { (self.api.set_node_flags)(node.raw(), flags.bits(), recursive) }
    }

    pub fn node_aabb(&self, node: Node) -> Aabb {
        let mut aabb = Aabb::default();
        let [min_x, min_y, min_z] = &mut aabb.min;
        let [max_x, max_y, max_z] = &mut aabb.max;
        unsafe { (self.api.get_node_aabb)(node.raw(), min_x, min_y, min_z, max_x, max_y, max_z) };
        aabb
    }

    /// Nodes below `start` (inclusive) whose name matches; an empty name
    /// matches every node and `NodeType::Undefined` every type
    pub fn find_nodes(&self, start: Node, name: &str, node_type: NodeType) -> Result<Vec<Node>> {
        let name = c_string(name)?;
        let count = unsafe { (self.api.find_nodes)(start.raw(), name.as_ptr(), node_type.raw()) };
        Ok((0..count.max(0))
            .filter_map(|index| Node::checked(unsafe { (self.api.get_node_find_result)(index) }))
            .collect())
    }

    /// Casts a ray from `origin` along `direction` (whose length bounds the
    /// search); `num_nearest` of 0 returns every hit
    pub fn cast_ray(
        &self,
        node: Node,
        origin: [f32; 3],
        direction: [f32; 3],
        num_nearest: usize,
    ) -> Result<Vec<RayHit>> {
        let num_nearest = c_len(num_nearest)?;
        let [ox, oy, oz] = origin;
        let [dx, dy, dz] = direction;
        let count = unsafe { (self.api.cast_ray)(node.raw(), ox, oy, oz, dx, dy, dz, num_nearest) };

        let mut hits = Vec::with_capacity(count.max(0) as usize);
        for index in 0..count.max(0) {
            let mut raw_node = 0;
            let mut distance = 0.0;
            let mut point = [0.0f32; 3];
            let ok = unsafe {
                (self.api.get_cast_ray_result)(index, &mut raw_node, &mut distance, point.as_mut_ptr())
            };
            if let (true, Some(node)) = (ok, Node::checked(raw_node)) {
                hits.push(RayHit { node, distance, point });
            }
        }
        Ok(hits)
    }

    /// LOD level the node would be rendered with, `None` when culled
    pub fn node_visibility(
        &self,
        node: Node,
        camera: Node,
        check_occlusion: bool,
        calc_lod: bool,
    ) -> Option<u32> {
        let lod = unsafe {
            (self.api.check_node_visibility)(node.raw(), camera.raw(), check_occlusion, calc_lod)
        };
        u32::try_from(lod).ok()
    }

    // --- Node type specific functions ---

    pub fn add_group_node(&self, parent: Node, name: &str) -> Result<Node> {
        let name = c_string(name)?;
        Node::checked(unsafe { (self.api.add_group_node)(parent.raw(), name.as_ptr()) })
            .ok_or(HordeError::Rejected { call: "h3dAddGroupNode" })
    }

    pub fn add_model_node(&self, parent: Node, name: &str, geometry: Resource) -> Result<Node> {
        let name = c_string(name)?;
        Node::checked(unsafe { (self.api.add_model_node)(parent.raw(), name.as_ptr(), geometry.raw()) })
            .ok_or(HordeError::Rejected { call: "h3dAddModelNode" })
    }

    /// Binds an animation to a stage of a model; `start_node` limits it to a
    /// subtree (empty for the whole model)
    pub fn setup_model_anim_stage(
        &self,
        model: Node,
        stage: u32,
        animation: Resource,
        layer: u32,
        start_node: &str,
        additive: bool,
    ) -> Result<()> {
        let start_node = c_string(start_node)?;
        let (stage, layer) = (c_len(stage as usize)?, c_len(layer as usize)?);
        unsafe {
            (self.api.setup_model_anim_stage)(
                model.raw(),
                stage,
                animation.raw(),
                layer,
                start_node.as_ptr(),
                additive,
            )
        };
        Ok(())
    }

    /// Sets time (in frames) and blend weight of an animation stage
    pub fn set_model_anim_params(&self, model: Node, stage: u32, time: f32, weight: f32) -> Result<()> {
        let stage = c_len(stage as usize)?;
        unsafe { (self.api.set_model_anim_params)(model.raw(), stage, time, weight) };
        Ok(())
    }

    /// Sets the weight of a morph target; an empty target name applies to all
    pub fn set_model_morpher(&self, model: Node, target: &str, weight: f32) -> Result<()> {
        let target = c_string(target)?;
        if unsafe { (self.api.set_model_morpher)(model.raw(), target.as_ptr(), weight) } {
            Ok(())
        } else {
            Err(HordeError::Rejected { call: "h3dSetModelMorpher" })
        }
    }

    pub fn add_mesh_node(
        &self,
        parent: Node,
        name: &str,
        material: Resource,
        batch: MeshBatch,
    ) -> Result<Node> {
        let name = c_string(name)?;
        let node = unsafe {
            (self.api.add_mesh_node)(
                parent.raw(),
                name.as_ptr(),
                material.raw(),
                c_len(batch.batch_start as usize)?,
                c_len(batch.batch_count as usize)?,
                c_len(batch.vert_range_start as usize)?,
                c_len(batch.vert_range_end as usize)?,
            )
        };
        Node::checked(node).ok_or(HordeError::Rejected { call: "h3dAddMeshNode" })
    }

    pub fn add_joint_node(&self, parent: Node, name: &str, joint_index: u32) -> Result<Node> {
        let name = c_string(name)?;
        let joint_index = c_len(joint_index as usize)?;
        Node::checked(unsafe { (self.api.add_joint_node)(parent.raw(), name.as_ptr(), joint_index) })
            .ok_or(HordeError::Rejected { call: "h3dAddJointNode" })
    }

    /// `material` may be `Resource::NONE`
    pub fn add_light_node(
        &self,
        parent: Node,
        name: &str,
        material: Resource,
        lighting_context: &str,
        shadow_context: &str,
    ) -> Result<Node> {
        let name = c_string(name)?;
        let lighting_context = c_string(lighting_context)?;
        let shadow_context = c_string(shadow_context)?;
        let node = unsafe {
            (self.api.add_light_node)(
                parent.raw(),
                name.as_ptr(),
                material.raw(),
                lighting_context.as_ptr(),
                shadow_context.as_ptr(),
            )
        };
        Node::checked(node).ok_or(HordeError::Rejected { call: "h3dAddLightNode" })
    }

    pub fn add_camera_node(&self, parent: Node, name: &str, pipeline: Resource) -> Result<Node> {
        let name = c_string(name)?;
        Node::checked(unsafe { (self.api.add_camera_node)(parent.raw(), name.as_ptr(), pipeline.raw()) })
            .ok_or(HordeError::Rejected { call: "h3dAddCameraNode" })
    }

    /// Sets a perspective frustum; `fov` is the vertical angle in degrees
    pub fn setup_camera_view(&self, camera: Node, fov: f32, aspect: f32, near: f32, far: f32) {
        unsafe { (self.api.setup_camera_view)(camera.raw(), fov, aspect, near, far) }
    }

    /// Column-major projection matrix of a camera
    pub fn camera_projection(&self, camera: Node) -> [f32; 16] {
        let mut matrix = [0.0f32; 16];
        unsafe { (self.api.get_camera_proj_mat)(camera.raw(), matrix.as_mut_ptr()) };
        matrix
    }

    /// `respawn_count` of -1 respawns forever
    pub fn add_emitter_node(
        &self,
        parent: Node,
        name: &str,
        material: Resource,
        particle_effect: Resource,
        max_particles: u32,
        respawn_count: i32,
    ) -> Result<Node> {
        let name = c_string(name)?;
        let max_particles = c_len(max_particles as usize)?;
        let node = unsafe {
            (self.api.add_emitter_node)(
                parent.raw(),
                name.as_ptr(),
                material.raw(),
                particle_effect.raw(),
                max_particles,
                respawn_count,
            )
        };
        Node::checked(node).ok_or(HordeError::Rejected { call: "h3dAddEmitterNode" })
    }

    /// Advances particle simulation by `time_delta` seconds
    pub fn advance_emitter_time(&self, emitter: Node, time_delta: f32) {
        unsafe { (self.api.advance_emitter_time)(emitter.raw(), time_delta) }
    }

    pub fn has_emitter_finished(&self, emitter: Node) -> bool {
        unsafe { (self.api.has_emitter_finished)(emitter.raw()) }
    }
}
