//! Utility library entry points (`libHorde3DUtils`)

use std::os::raw::{c_char, c_float, c_int, c_short, c_uchar, c_uint};

use crate::{H3DNode, H3DRes};

function_table! {
    /// Function table of the Horde3DUtils helper library
    pub struct Horde3DUtilsApi {
        free_mem = "h3dutFreeMem": fn(ptr: *mut *mut c_char);
        dump_messages = "h3dutDumpMessages": fn() -> bool;
        load_resources_from_disk = "h3dutLoadResourcesFromDisk": fn(content_dir: *const c_char) -> bool;
        create_geometry_res = "h3dutCreateGeometryRes": fn(
            name: *const c_char,
            num_vertices: c_int,
            num_triangle_indices: c_int,
            pos_data: *const c_float,
            index_data: *const c_uint,
            normal_data: *const c_short,
            tangent_data: *const c_short,
            bitangent_data: *const c_short,
            tex_data1: *const c_float,
            tex_data2: *const c_float
        ) -> H3DRes;
        create_tga_image = "h3dutCreateTGAImage": fn(
            pixels: *const c_uchar,
            width: c_int,
            height: c_int,
            bpp: c_int,
            out_data: *mut *mut c_char,
            out_size: *mut c_int
        ) -> bool;
        screenshot = "h3dutScreenshot": fn(filename: *const c_char) -> bool;
        pick_ray = "h3dutPickRay": fn(
            camera_node: H3DNode,
            nwx: c_float,
            nwy: c_float,
            ox: *mut c_float,
            oy: *mut c_float,
            oz: *mut c_float,
            dx: *mut c_float,
            dy: *mut c_float,
            dz: *mut c_float
        );
        pick_node = "h3dutPickNode": fn(camera_node: H3DNode, nwx: c_float, nwy: c_float) -> H3DNode;
        show_text = "h3dutShowText": fn(
            text: *const c_char,
            x: c_float,
            y: c_float,
            size: c_float,
            col_r: c_float,
            col_g: c_float,
            col_b: c_float,
            font_material_res: H3DRes
        );
        show_frame_stats = "h3dutShowFrameStats": fn(
            font_material_res: H3DRes,
            panel_material_res: H3DRes,
            mode: c_int
        );
    }
}
