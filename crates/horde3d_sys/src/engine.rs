//! Core library entry points (`libHorde3D`)

use std::os::raw::{c_char, c_float, c_int, c_void};

use crate::{H3DNode, H3DRes};

function_table! {
    /// Function table of the Horde3D core library
    pub struct Horde3DApi {
        // Basic functions
        get_version_string = "h3dGetVersionString": fn() -> *const c_char;
        check_extension = "h3dCheckExtension": fn(extension_name: *const c_char) -> bool;
        get_error = "h3dGetError": fn() -> bool;
        init = "h3dInit": fn() -> bool;
        release = "h3dRelease": fn();
        render = "h3dRender": fn(camera_node: H3DNode);
        finalize_frame = "h3dFinalizeFrame": fn();
        clear = "h3dClear": fn();
        get_message = "h3dGetMessage": fn(level: *mut c_int, time: *mut c_float) -> *const c_char;
        get_option = "h3dGetOption": fn(param: c_int) -> c_float;
        set_option = "h3dSetOption": fn(param: c_int, value: c_float) -> bool;
        get_stat = "h3dGetStat": fn(param: c_int, reset: bool) -> c_float;
        show_overlays = "h3dShowOverlays": fn(
            verts: *const c_float,
            vert_count: c_int,
            col_r: c_float,
            col_g: c_float,
            col_b: c_float,
            col_a: c_float,
            material_res: H3DRes,
            flags: c_int
        );
        clear_overlays = "h3dClearOverlays": fn();

        // Resource functions
        get_res_type = "h3dGetResType": fn(res: H3DRes) -> c_int;
        get_res_name = "h3dGetResName": fn(res: H3DRes) -> *const c_char;
        get_next_resource = "h3dGetNextResource": fn(res_type: c_int, start: H3DRes) -> H3DRes;
        find_resource = "h3dFindResource": fn(res_type: c_int, name: *const c_char) -> H3DRes;
        add_resource = "h3dAddResource": fn(res_type: c_int, name: *const c_char, flags: c_int) -> H3DRes;
        clone_resource = "h3dCloneResource": fn(source_res: H3DRes, name: *const c_char) -> H3DRes;
        remove_resource = "h3dRemoveResource": fn(res: H3DRes) -> c_int;
        is_res_loaded = "h3dIsResLoaded": fn(res: H3DRes) -> bool;
        load_resource = "h3dLoadResource": fn(res: H3DRes, data: *const c_char, size: c_int) -> bool;
        unload_resource = "h3dUnloadResource": fn(res: H3DRes);
        get_res_elem_count = "h3dGetResElemCount": fn(res: H3DRes, elem: c_int) -> c_int;
        find_res_elem = "h3dFindResElem": fn(
            res: H3DRes,
            elem: c_int,
            param: c_int,
            value: *const c_char
        ) -> c_int;
        get_res_param_i = "h3dGetResParamI": fn(
            res: H3DRes,
            elem: c_int,
            elem_idx: c_int,
            param: c_int
        ) -> c_int;
        set_res_param_i = "h3dSetResParamI": fn(
            res: H3DRes,
            elem: c_int,
            elem_idx: c_int,
            param: c_int,
            value: c_int
        );
        get_res_param_f = "h3dGetResParamF": fn(
            res: H3DRes,
            elem: c_int,
            elem_idx: c_int,
            param: c_int,
            comp_idx: c_int
        ) -> c_float;
        set_res_param_f = "h3dSetResParamF": fn(
            res: H3DRes,
            elem: c_int,
            elem_idx: c_int,
            param: c_int,
            comp_idx: c_int,
            value: c_float
        );
        get_res_param_str = "h3dGetResParamStr": fn(
            res: H3DRes,
            elem: c_int,
            elem_idx: c_int,
            param: c_int
        ) -> *const c_char;
        set_res_param_str = "h3dSetResParamStr": fn(
            res: H3DRes,
            elem: c_int,
            elem_idx: c_int,
            param: c_int,
            value: *const c_char
        );
        map_res_stream = "h3dMapResStream": fn(
            res: H3DRes,
            elem: c_int,
            elem_idx: c_int,
            stream: c_int,
            read: bool,
            write: bool
        ) -> *mut c_void;
        unmap_res_stream = "h3dUnmapResStream": fn(res: H3DRes);
        query_unloaded_resource = "h3dQueryUnloadedResource": fn(index: c_int) -> H3DRes;
        release_unused_resources = "h3dReleaseUnusedResources": fn();
        create_texture = "h3dCreateTexture": fn(
            name: *const c_char,
            width: c_int,
            height: c_int,
            fmt: c_int,
            flags: c_int
        ) -> H3DRes;
        set_shader_preambles = "h3dSetShaderPreambles": fn(
            vert_preamble: *const c_char,
            frag_preamble: *const c_char
        );
        set_material_uniform = "h3dSetMaterialUniform": fn(
            material_res: H3DRes,
            name: *const c_char,
            a: c_float,
            b: c_float,
            c: c_float,
            d: c_float
        ) -> bool;
        resize_pipeline_buffers = "h3dResizePipelineBuffers": fn(
            pipe_res: H3DRes,
            width: c_int,
            height: c_int
        );
        get_render_target_data = "h3dGetRenderTargetData": fn(
            pipeline_res: H3DRes,
            target_name: *const c_char,
            buf_index: c_int,
            width: *mut c_int,
            height: *mut c_int,
            comp_count: *mut c_int,
            data_buffer: *mut c_void,
            buffer_size: c_int
        ) -> bool;

        // Scene graph functions
        get_node_type = "h3dGetNodeType": fn(node: H3DNode) -> c_int;
        get_node_parent = "h3dGetNodeParent": fn(node: H3DNode) -> H3DNode;
        set_node_parent = "h3dSetNodeParent": fn(node: H3DNode, parent: H3DNode) -> bool;
        get_node_child = "h3dGetNodeChild": fn(node: H3DNode, index: c_int) -> H3DNode;
        add_nodes = "h3dAddNodes": fn(parent: H3DNode, scene_graph_res: H3DRes) -> H3DNode;
        remove_node = "h3dRemoveNode": fn(node: H3DNode);
        check_node_trans_flag = "h3dCheckNodeTransFlag": fn(node: H3DNode, reset: bool) -> bool;
        get_node_transform = "h3dGetNodeTransform": fn(
            node: H3DNode,
            tx: *mut c_float,
            ty: *mut c_float,
            tz: *mut c_float,
            rx: *mut c_float,
            ry: *mut c_float,
            rz: *mut c_float,
            sx: *mut c_float,
            sy: *mut c_float,
            sz: *mut c_float
        );
        set_node_transform = "h3dSetNodeTransform": fn(
            node: H3DNode,
            tx: c_float,
            ty: c_float,
            tz: c_float,
            rx: c_float,
            ry: c_float,
            rz: c_float,
            sx: c_float,
            sy: c_float,
            sz: c_float
        );
        get_node_trans_mats = "h3dGetNodeTransMats": fn(
            node: H3DNode,
            rel_mat: *mut *const c_float,
            abs_mat: *mut *const c_float
        );
        set_node_trans_mat = "h3dSetNodeTransMat": fn(node: H3DNode, mat4x4: *const c_float);
        get_node_param_i = "h3dGetNodeParamI": fn(node: H3DNode, param: c_int) -> c_int;
        set_node_param_i = "h3dSetNodeParamI": fn(node: H3DNode, param: c_int, value: c_int);
        get_node_param_f = "h3dGetNodeParamF": fn(node: H3DNode, param: c_int, comp_idx: c_int) -> c_float;
        set_node_param_f = "h3dSetNodeParamF": fn(
            node: H3DNode,
            param: c_int,
            comp_idx: c_int,
            value: c_float
        );
        get_node_param_str = "h3dGetNodeParamStr": fn(node: H3DNode, param: c_int) -> *const c_char;
        set_node_param_str = "h3dSetNodeParamStr": fn(node: H3DNode, param: c_int, value: *const c_char);
        get_node_flags = "h3dGetNodeFlags": fn(node: H3DNode) -> c_int;
        set_node_flags = "h3dSetNodeFlags": fn(node: H3DNode, flags: c_int, recursive: bool);
        get_node_aabb = "h3dGetNodeAABB": fn(
            node: H3DNode,
            min_x: *mut c_float,
            min_y: *mut c_float,
            min_z: *mut c_float,
            max_x: *mut c_float,
            max_y: *mut c_float,
            max_z: *mut c_float
        );
        find_nodes = "h3dFindNodes": fn(start_node: H3DNode, name: *const c_char, node_type: c_int) -> c_int;
        get_node_find_result = "h3dGetNodeFindResult": fn(index: c_int) -> H3DNode;
        cast_ray = "h3dCastRay": fn(
            node: H3DNode,
            ox: c_float,
            oy: c_float,
            oz: c_float,
            dx: c_float,
            dy: c_float,
            dz: c_float,
            num_nearest: c_int
        ) -> c_int;
        get_cast_ray_result = "h3dGetCastRayResult": fn(
            index: c_int,
            node: *mut H3DNode,
            distance: *mut c_float,
            intersection: *mut c_float
        ) -> bool;
        check_node_visibility = "h3dCheckNodeVisibility": fn(
            node: H3DNode,
            camera_node: H3DNode,
            check_occlusion: bool,
            calc_lod: bool
        ) -> c_int;

        // Node type specific functions
        add_group_node = "h3dAddGroupNode": fn(parent: H3DNode, name: *const c_char) -> H3DNode;
        add_model_node = "h3dAddModelNode": fn(
            parent: H3DNode,
            name: *const c_char,
            geometry_res: H3DRes
        ) -> H3DNode;
        setup_model_anim_stage = "h3dSetupModelAnimStage": fn(
            model_node: H3DNode,
            stage: c_int,
            animation_res: H3DRes,
            layer: c_int,
            start_node: *const c_char,
            additive: bool
        );
        set_model_anim_params = "h3dSetModelAnimParams": fn(
            model_node: H3DNode,
            stage: c_int,
            time: c_float,
            weight: c_float
        );
        set_model_morpher = "h3dSetModelMorpher": fn(
            model_node: H3DNode,
            target: *const c_char,
            weight: c_float
        ) -> bool;
        add_mesh_node = "h3dAddMeshNode": fn(
            parent: H3DNode,
            name: *const c_char,
            material_res: H3DRes,
            batch_start: c_int,
            batch_count: c_int,
            vert_r_start: c_int,
            vert_r_end: c_int
        ) -> H3DNode;
        add_joint_node = "h3dAddJointNode": fn(
            parent: H3DNode,
            name: *const c_char,
            joint_index: c_int
        ) -> H3DNode;
        add_light_node = "h3dAddLightNode": fn(
            parent: H3DNode,
            name: *const c_char,
            material_res: H3DRes,
            lighting_context: *const c_char,
            shadow_context: *const c_char
        ) -> H3DNode;
        add_camera_node = "h3dAddCameraNode": fn(
            parent: H3DNode,
            name: *const c_char,
            pipeline_res: H3DRes
        ) -> H3DNode;
        setup_camera_view = "h3dSetupCameraView": fn(
            camera_node: H3DNode,
            fov: c_float,
            aspect: c_float,
            near_dist: c_float,
            far_dist: c_float
        );
        get_camera_proj_mat = "h3dGetCameraProjMat": fn(camera_node: H3DNode, proj_mat: *mut c_float);
        add_emitter_node = "h3dAddEmitterNode": fn(
            parent: H3DNode,
            name: *const c_char,
            material_res: H3DRes,
            particle_effect_res: H3DRes,
            max_particle_count: c_int,
            respawn_count: c_int
        ) -> H3DNode;
        advance_emitter_time = "h3dAdvanceEmitterTime": fn(emitter_node: H3DNode, time_delta: c_float);
        has_emitter_finished = "h3dHasEmitterFinished": fn(emitter_node: H3DNode) -> bool;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stubbed_table_returns_zeroes() {
        let api = Horde3DApi::stubbed();
        assert!(!api.is_loaded());
        unsafe {
            assert!(!(api.init)());
            assert!((api.get_version_string)().is_null());
            assert_eq!((api.add_camera_node)(1, std::ptr::null(), 0), 0);
            assert_eq!((api.get_option)(1), 0.0);
            (api.finalize_frame)();
        }
    }

    #[test]
    fn test_entries_can_be_replaced() {
        extern "C" fn fake_init() -> bool {
            true
        }

        let mut api = Horde3DApi::stubbed();
        api.init = fake_init;
        assert!(unsafe { (api.init)() });
    }

    #[test]
    fn test_debug_hides_pointers() {
        let debug = format!("{:?}", Horde3DApi::stubbed());
        assert!(debug.contains("Horde3DApi"));
        assert!(debug.contains("loaded: false"));
    }
}
