//! Engine calls against stubbed function tables with recording fakes

use std::cell::RefCell;
use std::ffi::CStr;
use std::os::raw::{c_char, c_float, c_int, c_short, c_uint, c_void};

use horde3d::sys::{H3DNode, H3DRes, Horde3DApi, Horde3DUtilsApi};
use horde3d::{
    CameraParams, Engine, GeometryData, GeometryRes, HordeError, LightParams, Node, NodeFlags,
    NodeParams, NodeType, Resource, ResourceFlags, ResourceType, Transform,
};

thread_local! {
    static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static MESSAGES: RefCell<Vec<(c_int, &'static CStr)>> = const { RefCell::new(Vec::new()) };
    static TGA_FREED: RefCell<bool> = const { RefCell::new(false) };
}

fn record(call: String) {
    CALLS.with(|calls| calls.borrow_mut().push(call));
}

fn calls() -> Vec<String> {
    CALLS.with(|calls| calls.borrow().clone())
}

unsafe fn text(ptr: *const c_char) -> String {
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

extern "C" fn fake_init() -> bool {
    record("init".into());
    true
}

extern "C" fn fake_release() {
    record("release".into());
}

extern "C" fn fake_version() -> *const c_char {
    c"Horde3D 1.0.0".as_ptr()
}

extern "C" fn fake_get_message(level: *mut c_int, time: *mut c_float) -> *const c_char {
    let next = MESSAGES.with(|queue| {
        let mut queue = queue.borrow_mut();
        (!queue.is_empty()).then(|| queue.remove(0))
    });
    match next {
        Some((lvl, msg)) => {
            unsafe {
                *level = lvl;
                *time = 1.5;
            }
            msg.as_ptr()
        }
        None => c"".as_ptr(),
    }
}

extern "C" fn fake_add_resource(res_type: c_int, name: *const c_char, flags: c_int) -> H3DRes {
    record(format!("add_resource {} {} {}", res_type, unsafe { text(name) }, flags));
    10 + res_type
}

extern "C" fn fake_add_nodes(parent: H3DNode, res: H3DRes) -> H3DNode {
    record(format!("add_nodes {} {}", parent, res));
    if res == 0 { 0 } else { 100 + res }
}

extern "C" fn fake_get_node_child(node: H3DNode, index: c_int) -> H3DNode {
    if node == 1 && index < 3 { 20 + index } else { 0 }
}

extern "C" fn fake_set_node_param_str(node: H3DNode, param: c_int, value: *const c_char) {
    record(format!("set_node_param_str {} {} {}", node, param, unsafe { text(value) }));
}

extern "C" fn fake_set_node_param_f(node: H3DNode, param: c_int, comp: c_int, value: c_float) {
    record(format!("set_node_param_f {} {} {} {}", node, param, comp, value));
}

extern "C" fn fake_set_node_transform(
    node: H3DNode,
    tx: c_float,
    ty: c_float,
    tz: c_float,
    _rx: c_float,
    ry: c_float,
    _rz: c_float,
    sx: c_float,
    _sy: c_float,
    _sz: c_float,
) {
    record(format!("set_node_transform {} {} {} {} {} {}", node, tx, ty, tz, ry, sx));
}

extern "C" fn fake_get_node_flags(_node: H3DNode) -> c_int {
    5
}

extern "C" fn fake_find_nodes(_start: H3DNode, _name: *const c_char, _node_type: c_int) -> c_int {
    2
}

extern "C" fn fake_get_node_find_result(index: c_int) -> H3DNode {
    40 + index
}

extern "C" fn fake_cast_ray(
    _node: H3DNode,
    _ox: c_float,
    _oy: c_float,
    _oz: c_float,
    _dx: c_float,
    _dy: c_float,
    _dz: c_float,
    _num: c_int,
) -> c_int {
    1
}

extern "C" fn fake_get_cast_ray_result(
    index: c_int,
    node: *mut H3DNode,
    distance: *mut c_float,
    point: *mut c_float,
) -> bool {
    unsafe {
        *node = 77 + index;
        *distance = 12.5;
        *point = 1.0;
        *point.add(1) = 2.0;
        *point.add(2) = 3.0;
    }
    true
}

extern "C" fn fake_check_node_visibility(node: H3DNode, _cam: H3DNode, _occ: bool, _lod: bool) -> c_int {
    if node == 5 { -1 } else { 2 }
}

extern "C" fn fake_set_option(param: c_int, value: c_float) -> bool {
    record(format!("set_option {} {}", param, value));
    param != 4
}

extern "C" fn fake_create_tga_image(
    _pixels: *const u8,
    _width: c_int,
    _height: c_int,
    _bpp: c_int,
    out_data: *mut *mut c_char,
    out_size: *mut c_int,
) -> bool {
    let buffer = Box::leak(Box::new(*b"TGA!"));
    unsafe {
        *out_data = buffer.as_mut_ptr().cast();
        *out_size = 4;
    }
    true
}

extern "C" fn fake_free_mem(ptr: *mut *mut c_char) {
    unsafe { *ptr = std::ptr::null_mut() };
    TGA_FREED.with(|freed| *freed.borrow_mut() = true);
}

extern "C" fn fake_map_res_stream(
    res: H3DRes,
    elem: c_int,
    elem_idx: c_int,
    stream: c_int,
    read: bool,
    write: bool,
) -> *mut c_void {
    record(format!("map {} {} {} {} {} {}", res, elem, elem_idx, stream, read, write));
    if res == 0 {
        return std::ptr::null_mut();
    }
    Box::leak(Box::new([1.0f32, 2.0, 3.0, 4.0])).as_mut_ptr().cast()
}

extern "C" fn fake_unmap_res_stream(res: H3DRes) {
    record(format!("unmap {}", res));
}

#[allow(clippy::too_many_arguments)]
extern "C" fn fake_get_render_target_data(
    pipeline: H3DRes,
    target: *const c_char,
    buf_index: c_int,
    width: *mut c_int,
    height: *mut c_int,
    comp_count: *mut c_int,
    data: *mut c_void,
    size: c_int,
) -> bool {
    record(format!(
        "render_target {} {} {} data={} size={}",
        pipeline,
        unsafe { text(target) },
        buf_index,
        !data.is_null(),
        size
    ));
    unsafe {
        if !width.is_null() {
            *width = 2;
        }
        if !height.is_null() {
            *height = 1;
        }
        if !comp_count.is_null() {
            *comp_count = 4;
        }
        if !data.is_null() {
            let floats = std::slice::from_raw_parts_mut(data.cast::<f32>(), size as usize / 4);
            for (i, value) in floats.iter_mut().enumerate() {
                *value = i as f32;
            }
        }
    }
    pipeline != 0
}

#[allow(clippy::too_many_arguments)]
extern "C" fn fake_create_geometry_res(
    name: *const c_char,
    vertices: c_int,
    indices: c_int,
    positions: *const c_float,
    index_data: *const c_uint,
    normals: *const c_short,
    tangents: *const c_short,
    bitangents: *const c_short,
    tex_coords0: *const c_float,
    tex_coords1: *const c_float,
) -> H3DRes {
    record(format!(
        "geometry {} {} {} pos={} idx={} normals={} tangents={} bitangents={} uv0={} uv1={}",
        unsafe { text(name) },
        vertices,
        indices,
        !positions.is_null(),
        !index_data.is_null(),
        !normals.is_null(),
        !tangents.is_null(),
        !bitangents.is_null(),
        !tex_coords0.is_null(),
        !tex_coords1.is_null()
    ));
    55
}

extern "C" fn fake_get_next_resource(_res_type: c_int, start: H3DRes) -> H3DRes {
    match start {
        0 => 3,
        3 => 4,
        _ => 0,
    }
}

extern "C" fn fake_query_unloaded_resource(index: c_int) -> H3DRes {
    record(format!("unloaded {}", index));
    if index < 2 { 60 + index } else { 0 }
}

static RELATIVE: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 6.0, 7.0, 1.0,
];
static ABSOLUTE: [f32; 16] = [
    2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 8.0, 9.0, 10.0, 1.0,
];

extern "C" fn fake_get_node_trans_mats(
    node: H3DNode,
    relative: *mut *const c_float,
    absolute: *mut *const c_float,
) {
    if node == 2 {
        unsafe {
            *relative = RELATIVE.as_ptr();
            *absolute = ABSOLUTE.as_ptr();
        }
    }
}

fn engine() -> Engine {
    CALLS.with(|calls| calls.borrow_mut().clear());
    let mut api = Horde3DApi::stubbed();
    api.init = fake_init;
    api.release = fake_release;
    api.get_version_string = fake_version;
    api.get_message = fake_get_message;
    api.add_resource = fake_add_resource;
    api.add_nodes = fake_add_nodes;
    api.get_node_child = fake_get_node_child;
    api.set_node_param_str = fake_set_node_param_str;
    api.set_node_param_f = fake_set_node_param_f;
    api.set_node_transform = fake_set_node_transform;
    api.get_node_flags = fake_get_node_flags;
    api.find_nodes = fake_find_nodes;
    api.get_node_find_result = fake_get_node_find_result;
    api.cast_ray = fake_cast_ray;
    api.get_cast_ray_result = fake_get_cast_ray_result;
    api.check_node_visibility = fake_check_node_visibility;
    api.set_option = fake_set_option;
    api.map_res_stream = fake_map_res_stream;
    api.unmap_res_stream = fake_unmap_res_stream;
    api.get_render_target_data = fake_get_render_target_data;
    api.get_next_resource = fake_get_next_resource;
    api.query_unloaded_resource = fake_query_unloaded_resource;

    let mut utils = Horde3DUtilsApi::stubbed();
    utils.create_tga_image = fake_create_tga_image;
    utils.free_mem = fake_free_mem;
    utils.create_geometry_res = fake_create_geometry_res;

    Engine::from_tables(api, Some(utils))
}

#[test]
fn test_init_and_release_once() {
    let mut engine = engine();
    engine.init().unwrap();
    engine.init().unwrap();
    assert!(engine.is_initialized());
    drop(engine);
    assert_eq!(calls(), vec!["init", "release"]);
}

#[test]
fn test_release_skipped_without_init() {
    let engine = engine();
    drop(engine);
    assert!(calls().is_empty());
}

#[test]
fn test_version_string_is_copied() {
    assert_eq!(engine().version_string(), "Horde3D 1.0.0");
}

#[test]
fn test_messages_drain_in_order() {
    MESSAGES.with(|queue| {
        *queue.borrow_mut() = vec![(2, c"shader warning"), (4, c"loaded pipeline")];
    });
    let engine = engine();
    let messages = engine.drain_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].text, "shader warning");
    assert_eq!(messages[0].log_level(), log::Level::Warn);
    assert_eq!(messages[1].level, 4);
    assert_eq!(messages[1].time, 1.5);
    assert!(engine.next_message().is_none());
}

#[test]
fn test_add_resource_passes_type_name_and_flags() {
    let engine = engine();
    let res = engine
        .add_resource(ResourceType::Texture, "overlays/logo.tga", ResourceFlags::NO_TEX_MIPMAPS)
        .unwrap();
    assert_eq!(res, Resource::from_raw(17));
    assert_eq!(calls(), vec!["add_resource 7 overlays/logo.tga 4"]);
}

#[test]
fn test_add_resource_rejects_nul() {
    let engine = engine();
    let err = engine
        .add_resource(ResourceType::Material, "bad\0name", ResourceFlags::empty())
        .unwrap_err();
    assert!(matches!(err, HordeError::InvalidString(_)));
    assert!(calls().is_empty());
}

#[test]
fn test_add_nodes_zero_is_rejected() {
    let engine = engine();
    assert_eq!(engine.add_nodes(Node::ROOT, Resource::from_raw(3)).unwrap(), Node::from_raw(103));
    assert!(matches!(
        engine.add_nodes(Node::ROOT, Resource::NONE),
        Err(HordeError::Rejected { call: "h3dAddNodes" })
    ));
}

#[test]
fn test_node_children_returns_nodes() {
    let engine = engine();
    assert_eq!(engine.node_child(Node::ROOT, 1), Some(Node::from_raw(21)));
    assert_eq!(engine.node_child(Node::ROOT, 3), None);
    assert_eq!(
        engine.node_children(Node::ROOT),
        vec![Node::from_raw(20), Node::from_raw(21), Node::from_raw(22)]
    );
}

#[test]
fn test_set_node_param_str_keeps_string_alive() {
    let engine = engine();
    let node = Node::from_raw(9);
    engine.set_node_param_str(node, NodeParams::NameStr, "Knight").unwrap();
    engine.set_node_param_str(node, LightParams::LightingContextStr, "LIGHTING").unwrap();
    assert_eq!(
        calls(),
        vec!["set_node_param_str 9 1 Knight", "set_node_param_str 9 508 LIGHTING"]
    );
}

#[test]
fn test_vector_param_components() {
    let engine = engine();
    let light = Node::from_raw(4);
    for (i, value) in [1.0, 0.8, 0.7].into_iter().enumerate() {
        engine.set_node_param_f(light, LightParams::ColorF3, i, value).unwrap();
    }
    assert_eq!(
        calls(),
        vec![
            "set_node_param_f 4 503 0 1",
            "set_node_param_f 4 503 1 0.8",
            "set_node_param_f 4 503 2 0.7"
        ]
    );
}

#[test]
fn test_set_node_transform_order() {
    let engine = engine();
    let transform = Transform::from_translation(0.0, 0.0, -30.0)
        .with_rotation(0.0, 180.0, 0.0)
        .with_uniform_scale(0.1);
    engine.set_node_transform(Node::from_raw(2), &transform);
    assert_eq!(calls(), vec!["set_node_transform 2 0 0 -30 180 0.1"]);
}

#[test]
fn test_node_flags_are_typed() {
    let flags = engine().node_flags(Node::from_raw(2));
    assert_eq!(flags, NodeFlags::NO_DRAW | NodeFlags::NO_RAY_QUERY);
}

#[test]
fn test_find_nodes_collects_results() {
    let nodes = engine().find_nodes(Node::ROOT, "Bip01_Head", NodeType::Joint).unwrap();
    assert_eq!(nodes, vec![Node::from_raw(40), Node::from_raw(41)]);
}

#[test]
fn test_cast_ray_hits() {
    let hits = engine()
        .cast_ray(Node::ROOT, [0.0, 0.0, 0.0], [0.0, 0.0, -100.0], 0)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].node, Node::from_raw(77));
    assert_eq!(hits[0].distance, 12.5);
    assert_eq!(hits[0].point, [1.0, 2.0, 3.0]);
}

#[test]
fn test_visibility_culled_is_none() {
    let engine = engine();
    let camera = Node::from_raw(3);
    assert_eq!(engine.node_visibility(Node::from_raw(5), camera, false, true), None);
    assert_eq!(engine.node_visibility(Node::from_raw(6), camera, false, true), Some(2));
}

#[test]
fn test_set_option_reports_rejection() {
    let engine = engine();
    assert!(engine.set_option(horde3d::EngineOption::ShadowMapSize, 2048.0).is_ok());
    assert!(matches!(
        engine.set_option(horde3d::EngineOption::MaxAnisotropy, 3.0),
        Err(HordeError::Rejected { call: "h3dSetOption" })
    ));
    assert_eq!(calls(), vec!["set_option 9 2048", "set_option 4 3"]);
}

#[test]
fn test_tga_buffer_is_copied_and_freed() {
    let engine = engine();
    let image = engine.create_tga_image(&[0u8; 2 * 2 * 4], 2, 2, 32).unwrap();
    assert_eq!(image, b"TGA!");
    assert!(TGA_FREED.with(|freed| *freed.borrow()));
}

#[test]
fn test_tga_size_mismatch() {
    let err = engine().create_tga_image(&[0u8; 10], 2, 2, 32).unwrap_err();
    assert!(matches!(err, HordeError::ImageSize { expected: 16, actual: 10 }));
}

#[test]
fn test_utils_functions_need_utils_library() {
    let engine = Engine::from_tables(Horde3DApi::stubbed(), None);
    assert!(matches!(
        engine.show_frame_stats(Resource::NONE, Resource::NONE, 1),
        Err(HordeError::UtilsUnavailable)
    ));
    assert!(matches!(
        engine.load_resources_from_disk("Content"),
        Err(HordeError::UtilsUnavailable)
    ));
}

#[test]
fn test_stubbed_getters_default() {
    let engine = engine();
    let camera = Node::from_raw(3);
    assert_eq!(engine.node_param_i(camera, CameraParams::ViewportWidthI), 0);
    assert_eq!(engine.node_type(camera), NodeType::Undefined);
    assert_eq!(engine.node_parent(camera), None);
    assert!(engine.node_matrices(camera).is_none());
    assert_eq!(engine.resource_name(Resource::from_raw(2)), "");
}

#[test]
fn test_mapped_stream_reads_and_unmaps_on_drop() {
    let mut engine = engine();
    let geometry = Resource::from_raw(8);
    {
        let mut stream = engine
            .map_resource_stream(
                geometry,
                GeometryRes::GeometryElem,
                0,
                GeometryRes::GeoVertPosStream,
                true,
                false,
            )
            .unwrap();
        assert_eq!(stream.resource(), geometry);
        let values: Vec<f32> = unsafe { stream.read(4) }.unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            unsafe { stream.write(&[0.0f32]) },
            Err(HordeError::Rejected { .. })
        ));
        assert_eq!(calls().len(), 1);
    }
    assert_eq!(
        calls(),
        vec![
            format!(
                "map 8 {} 0 {} true false",
                GeometryRes::GeometryElem.raw(),
                GeometryRes::GeoVertPosStream.raw()
            ),
            "unmap 8".to_string(),
        ]
    );
}

#[test]
fn test_write_only_stream_refuses_reads() {
    let mut engine = engine();
    let mut stream = engine
        .map_resource_stream(
            Resource::from_raw(8),
            GeometryRes::GeometryElem,
            0,
            GeometryRes::GeoVertPosStream,
            false,
            true,
        )
        .unwrap();
    assert!(matches!(
        unsafe { stream.read::<f32>(1) },
        Err(HordeError::Rejected { .. })
    ));
    unsafe { stream.write(&[9.0f32, 8.0]) }.unwrap();
    let values: Vec<f32> = unsafe { std::slice::from_raw_parts(stream.as_ptr().cast::<f32>(), 2) }.to_vec();
    assert_eq!(values, vec![9.0, 8.0]);
}

#[test]
fn test_failed_map_does_not_unmap() {
    let mut engine = engine();
    assert!(engine
        .map_resource_stream(
            Resource::NONE,
            GeometryRes::GeometryElem,
            0,
            GeometryRes::GeoVertPosStream,
            true,
            false,
        )
        .is_err());
    assert!(!calls().iter().any(|call| call.starts_with("unmap")));
}

#[test]
fn test_render_target_data_queries_size_then_reads() {
    let engine = engine();
    let target = engine
        .render_target_data(Resource::from_raw(12), "HDRBUF", 0)
        .unwrap();
    assert_eq!((target.width, target.height, target.components), (2, 1, 4));
    assert_eq!(target.data, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(
        calls(),
        vec![
            "render_target 12 HDRBUF 0 data=false size=0",
            "render_target 12 HDRBUF 0 data=true size=32",
        ]
    );
}

#[test]
fn test_render_target_data_failed_query() {
    let engine = engine();
    assert!(matches!(
        engine.render_target_data(Resource::NONE, "", 32),
        Err(HordeError::Rejected { call: "h3dGetRenderTargetData" })
    ));
    assert_eq!(calls().len(), 1);
}

#[test]
fn test_create_geometry_passes_null_for_absent_streams() {
    let engine = engine();
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let tex_coords = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
    let geometry = GeometryData {
        positions: &positions,
        indices: &[0, 1, 2],
        tex_coords0: Some(&tex_coords),
        ..Default::default()
    };
    let res = engine.create_geometry("triangle", &geometry).unwrap();
    assert_eq!(res, Resource::from_raw(55));
    assert_eq!(
        calls(),
        vec![
            "geometry triangle 3 3 pos=true idx=true normals=false tangents=false \
             bitangents=false uv0=true uv1=false"
        ]
    );
}

#[test]
fn test_create_geometry_validates_before_calling() {
    let engine = engine();
    let geometry = GeometryData {
        positions: &[0.0, 0.0, 0.0],
        indices: &[0, 0, 1],
        ..Default::default()
    };
    assert!(matches!(
        engine.create_geometry("bad", &geometry),
        Err(HordeError::Geometry(_))
    ));
    assert!(calls().is_empty());
}

#[test]
fn test_resource_lists_stop_at_zero() {
    let engine = engine();
    assert_eq!(
        engine.resources(ResourceType::Undefined),
        vec![Resource::from_raw(3), Resource::from_raw(4)]
    );
    assert_eq!(
        engine.unloaded_resources(),
        vec![Resource::from_raw(60), Resource::from_raw(61)]
    );
    assert_eq!(calls(), vec!["unloaded 0", "unloaded 1", "unloaded 2"]);
}

#[test]
fn test_node_matrices_copy_both_matrices() {
    let mut api = Horde3DApi::stubbed();
    api.get_node_trans_mats = fake_get_node_trans_mats;
    let engine = Engine::from_tables(api, None);

    let matrices = engine.node_matrices(Node::from_raw(2)).unwrap();
    assert_eq!(matrices.relative, RELATIVE);
    assert_eq!(matrices.absolute, ABSOLUTE);
    assert_eq!(&matrices.absolute[12..15], &[8.0, 9.0, 10.0]);
    assert!(engine.node_matrices(Node::from_raw(3)).is_none());
}
