//! Numeric values of the engine enumerations
//!
//! Grouped by the C enumeration they belong to. Values follow the native
//! Horde3D 1.0 header.

use std::os::raw::c_int;

/// Engine option parameters (`h3dGetOption` / `h3dSetOption`)
pub mod options {
    use super::c_int;

    pub const MAX_LOG_LEVEL: c_int = 1;
    pub const MAX_NUM_MESSAGES: c_int = 2;
    pub const TRILINEAR_FILTERING: c_int = 3;
    pub const MAX_ANISOTROPY: c_int = 4;
    pub const TEX_COMPRESSION: c_int = 5;
    pub const SRGB_LINEARIZATION: c_int = 6;
    pub const LOAD_TEXTURES: c_int = 7;
    pub const FAST_ANIMATION: c_int = 8;
    pub const SHADOW_MAP_SIZE: c_int = 9;
    pub const SAMPLE_COUNT: c_int = 10;
    pub const WIREFRAME_MODE: c_int = 11;
    pub const DEBUG_VIEW_MODE: c_int = 12;
    pub const DUMP_FAILED_SHADERS: c_int = 13;
    pub const GATHER_TIME_STATS: c_int = 14;
}

/// Engine statistics (`h3dGetStat`)
pub mod stats {
    use super::c_int;

    pub const TRI_COUNT: c_int = 100;
    pub const BATCH_COUNT: c_int = 101;
    pub const LIGHT_PASS_COUNT: c_int = 102;
    pub const FRAME_TIME: c_int = 103;
    pub const ANIMATION_TIME: c_int = 104;
    pub const GEO_UPDATE_TIME: c_int = 105;
    pub const PARTICLE_SIM_TIME: c_int = 106;
    pub const FWD_LIGHTS_GPU_TIME: c_int = 107;
    pub const DEF_LIGHTS_GPU_TIME: c_int = 108;
    pub const SHADOWS_GPU_TIME: c_int = 109;
    pub const PARTICLE_GPU_TIME: c_int = 110;
    pub const TEXTURE_VMEM: c_int = 111;
    pub const GEOMETRY_VMEM: c_int = 112;
}

pub mod res_types {
    use super::c_int;

    pub const UNDEFINED: c_int = 0;
    pub const SCENE_GRAPH: c_int = 1;
    pub const GEOMETRY: c_int = 2;
    pub const ANIMATION: c_int = 3;
    pub const MATERIAL: c_int = 4;
    pub const CODE: c_int = 5;
    pub const SHADER: c_int = 6;
    pub const TEXTURE: c_int = 7;
    pub const PARTICLE_EFFECT: c_int = 8;
    pub const PIPELINE: c_int = 9;
}

/// Flags accepted by `h3dAddResource` and `h3dCreateTexture`
pub mod res_flags {
    use super::c_int;

    pub const NO_QUERY: c_int = 1;
    pub const NO_TEX_COMPRESSION: c_int = 2;
    pub const NO_TEX_MIPMAPS: c_int = 4;
    pub const TEX_CUBEMAP: c_int = 8;
    pub const TEX_DYNAMIC: c_int = 16;
    pub const TEX_RENDERABLE: c_int = 32;
    pub const TEX_SRGB: c_int = 64;
}

pub mod formats {
    use super::c_int;

    pub const UNKNOWN: c_int = 0;
    pub const TEX_BGRA8: c_int = 1;
    pub const TEX_DXT1: c_int = 2;
    pub const TEX_DXT3: c_int = 3;
    pub const TEX_DXT5: c_int = 4;
    pub const TEX_RGBA16F: c_int = 5;
    pub const TEX_RGBA32F: c_int = 6;
}

/// Geometry resource accessors
pub mod geo_res {
    use super::c_int;

    pub const GEOMETRY_ELEM: c_int = 200;
    pub const GEO_INDEX_COUNT_I: c_int = 201;
    pub const GEO_VERTEX_COUNT_I: c_int = 202;
    pub const GEO_INDICES16_I: c_int = 203;
    pub const GEO_INDEX_STREAM: c_int = 204;
    pub const GEO_VERT_POS_STREAM: c_int = 205;
    pub const GEO_VERT_TAN_STREAM: c_int = 206;
    pub const GEO_VERT_STATIC_STREAM: c_int = 207;
}

/// Animation resource accessors
pub mod anim_res {
    use super::c_int;

    pub const ENTITY_ELEM: c_int = 300;
    pub const ENT_FRAME_COUNT_I: c_int = 301;
}

/// Material resource accessors
pub mod mat_res {
    use super::c_int;

    pub const MATERIAL_ELEM: c_int = 400;
    pub const SAMPLER_ELEM: c_int = 401;
    pub const UNIFORM_ELEM: c_int = 402;
    pub const MAT_CLASS_STR: c_int = 403;
    pub const MAT_LINK_I: c_int = 404;
    pub const MAT_SHADER_I: c_int = 405;
    pub const SAMP_NAME_STR: c_int = 406;
    pub const SAMP_TEX_RES_I: c_int = 407;
    pub const UNIF_NAME_STR: c_int = 408;
    pub const UNIF_VALUE_F4: c_int = 409;
}

/// Shader resource accessors
pub mod shader_res {
    use super::c_int;

    pub const CONTEXT_ELEM: c_int = 600;
    pub const SAMPLER_ELEM: c_int = 601;
    pub const UNIFORM_ELEM: c_int = 602;
    pub const CONT_NAME_STR: c_int = 603;
    pub const SAMP_NAME_STR: c_int = 604;
    pub const UNIF_NAME_STR: c_int = 605;
    pub const UNIF_SIZE_I: c_int = 606;
    pub const UNIF_DEF_VALUE_F4: c_int = 607;
}

/// Texture resource accessors
pub mod tex_res {
    use super::c_int;

    pub const TEXTURE_ELEM: c_int = 700;
    pub const IMAGE_ELEM: c_int = 701;
    pub const TEX_FORMAT_I: c_int = 702;
    pub const TEX_SLICE_COUNT_I: c_int = 703;
    pub const IMG_WIDTH_I: c_int = 704;
    pub const IMG_HEIGHT_I: c_int = 705;
    pub const IMG_PIXEL_STREAM: c_int = 706;
}

/// Particle effect resource accessors
pub mod part_eff_res {
    use super::c_int;

    pub const PARTICLE_ELEM: c_int = 800;
    pub const CHAN_MOVE_VEL_ELEM: c_int = 801;
    pub const CHAN_ROT_VEL_ELEM: c_int = 802;
    pub const CHAN_SIZE_ELEM: c_int = 803;
    pub const CHAN_COL_R_ELEM: c_int = 804;
    pub const CHAN_COL_G_ELEM: c_int = 805;
    pub const CHAN_COL_B_ELEM: c_int = 806;
    pub const CHAN_COL_A_ELEM: c_int = 807;
    pub const PART_LIFE_MIN_F: c_int = 808;
    pub const PART_LIFE_MAX_F: c_int = 809;
    pub const CHAN_START_MIN_F: c_int = 810;
    pub const CHAN_START_MAX_F: c_int = 811;
    pub const CHAN_END_RATE_F: c_int = 812;
    pub const CHAN_DRAG_ELEM: c_int = 813;
}

/// Pipeline resource accessors
pub mod pipe_res {
    use super::c_int;

    pub const STAGE_ELEM: c_int = 900;
    pub const STAGE_NAME_STR: c_int = 901;
    pub const STAGE_ACTIVATION_I: c_int = 902;
}

pub mod node_types {
    use super::c_int;

    pub const UNDEFINED: c_int = 0;
    pub const GROUP: c_int = 1;
    pub const MODEL: c_int = 2;
    pub const MESH: c_int = 3;
    pub const JOINT: c_int = 4;
    pub const LIGHT: c_int = 5;
    pub const CAMERA: c_int = 6;
    pub const EMITTER: c_int = 7;
}

pub mod node_flags {
    use super::c_int;

    pub const NO_DRAW: c_int = 1;
    pub const NO_CAST_SHADOW: c_int = 2;
    pub const NO_RAY_QUERY: c_int = 4;
    /// NO_DRAW | NO_CAST_SHADOW | NO_RAY_QUERY
    pub const INACTIVE: c_int = 7;
}

/// Parameters shared by every node type
pub mod node_params {
    use super::c_int;

    pub const NAME_STR: c_int = 1;
    pub const ATTACHMENT_STR: c_int = 2;
}

pub mod model {
    use super::c_int;

    pub const GEO_RES_I: c_int = 200;
    pub const SW_SKINNING_I: c_int = 201;
    pub const LOD_DIST1_F: c_int = 202;
    pub const LOD_DIST2_F: c_int = 203;
    pub const LOD_DIST3_F: c_int = 204;
    pub const LOD_DIST4_F: c_int = 205;
}

pub mod mesh {
    use super::c_int;

    pub const MAT_RES_I: c_int = 300;
    pub const BATCH_START_I: c_int = 301;
    pub const BATCH_COUNT_I: c_int = 302;
    pub const VERT_R_START_I: c_int = 303;
    pub const VERT_R_END_I: c_int = 304;
    pub const LOD_LEVEL_I: c_int = 305;
}

pub mod joint {
    use super::c_int;

    pub const JOINT_INDEX_I: c_int = 400;
}

pub mod light {
    use super::c_int;

    pub const MAT_RES_I: c_int = 500;
    pub const RADIUS_F: c_int = 501;
    pub const FOV_F: c_int = 502;
    pub const COLOR_F3: c_int = 503;
    pub const COLOR_MULTIPLIER_F: c_int = 504;
    pub const SHADOW_MAP_COUNT_I: c_int = 505;
    pub const SHADOW_SPLIT_LAMBDA_F: c_int = 506;
    pub const SHADOW_MAP_BIAS_F: c_int = 507;
    pub const LIGHTING_CONTEXT_STR: c_int = 508;
    pub const SHADOW_CONTEXT_STR: c_int = 509;
}

pub mod camera {
    use super::c_int;

    pub const PIPE_RES_I: c_int = 600;
    pub const OUT_TEX_RES_I: c_int = 601;
    pub const OUT_BUF_INDEX_I: c_int = 602;
    pub const LEFT_PLANE_F: c_int = 603;
    pub const RIGHT_PLANE_F: c_int = 604;
    pub const BOTTOM_PLANE_F: c_int = 605;
    pub const TOP_PLANE_F: c_int = 606;
    pub const NEAR_PLANE_F: c_int = 607;
    pub const FAR_PLANE_F: c_int = 608;
    pub const VIEWPORT_X_I: c_int = 609;
    pub const VIEWPORT_Y_I: c_int = 610;
    pub const VIEWPORT_WIDTH_I: c_int = 611;
    pub const VIEWPORT_HEIGHT_I: c_int = 612;
    pub const ORTHO_I: c_int = 613;
    pub const OCC_CULLING_I: c_int = 614;
}

pub mod emitter {
    use super::c_int;

    pub const MAT_RES_I: c_int = 700;
    pub const PART_EFF_RES_I: c_int = 701;
    pub const MAX_COUNT_I: c_int = 702;
    pub const RESPAWN_COUNT_I: c_int = 703;
    pub const DELAY_F: c_int = 704;
    pub const EMISSION_RATE_F: c_int = 705;
    pub const SPREAD_ANGLE_F: c_int = 706;
    pub const FORCE_F3: c_int = 707;
}

/// Number of frame stat display modes offered by `h3dutShowFrameStats`
pub const H3DUT_MAX_STAT_MODE: c_int = 2;

/// Buffer index selecting the depth buffer in `h3dGetRenderTargetData`
pub const DEPTH_BUFFER_INDEX: c_int = 32;
