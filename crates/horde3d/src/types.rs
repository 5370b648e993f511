//! Typed engine enumerations
//!
//! Each enum maps 1:1 onto a native enumeration. Resource accessors and node
//! parameters implement [`ResourceAccessor`] / [`NodeAccessor`] so the
//! parameter functions on [`crate::Engine`] accept any of them.

use std::os::raw::c_int;

use bitflags::bitflags;
use horde3d_sys::constants::*;

/// Element or parameter of a resource (`h3dGetResParam*` family)
pub trait ResourceAccessor: Copy {
    fn raw(self) -> c_int;
}

/// Parameter of a scene node (`h3dGetNodeParam*` family)
pub trait NodeAccessor: Copy {
    fn raw(self) -> c_int;
}

macro_rules! engine_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:path, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $name {
            /// Every variant, in native order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

            /// Native value
            pub fn raw(self) -> c_int {
                match self {
                    $( $name::$variant => $value, )*
                }
            }

            /// Variant for a native value
            pub fn from_raw(value: c_int) -> Option<Self> {
                $(
                    if value == $value {
                        return Some($name::$variant);
                    }
                )*
                None
            }
        }
    };
}

macro_rules! accessor {
    ($trait:ident for $($name:ident),+) => {
        $(
            impl $trait for $name {
                fn raw(self) -> c_int {
                    $name::raw(self)
                }
            }
        )+
    };
}

engine_enum! {
    /// Engine option parameters
    pub enum EngineOption {
        /// Maximum log level published in the message queue (default 4)
        MaxLogLevel = options::MAX_LOG_LEVEL,
        MaxNumMessages = options::MAX_NUM_MESSAGES,
        TrilinearFiltering = options::TRILINEAR_FILTERING,
        /// 1, 2, 4 or 8
        MaxAnisotropy = options::MAX_ANISOTROPY,
        /// Only affects textures loaded after the option is set
        TexCompression = options::TEX_COMPRESSION,
        SrgbLinearization = options::SRGB_LINEARIZATION,
        LoadTextures = options::LOAD_TEXTURES,
        /// Disables inter-frame interpolation for animations
        FastAnimation = options::FAST_ANIMATION,
        /// 128, 256, 512, 1024 or 2048
        ShadowMapSize = options::SHADOW_MAP_SIZE,
        /// Only affects pipelines loaded after the option is set
        SampleCount = options::SAMPLE_COUNT,
        WireframeMode = options::WIREFRAME_MODE,
        DebugViewMode = options::DEBUG_VIEW_MODE,
        DumpFailedShaders = options::DUMP_FAILED_SHADERS,
        GatherTimeStats = options::GATHER_TIME_STATS,
    }
}

engine_enum! {
    /// Engine statistics
    pub enum EngineStat {
        TriCount = stats::TRI_COUNT,
        BatchCount = stats::BATCH_COUNT,
        LightPassCount = stats::LIGHT_PASS_COUNT,
        /// Milliseconds between two `finalize_frame` calls
        FrameTime = stats::FRAME_TIME,
        AnimationTime = stats::ANIMATION_TIME,
        GeoUpdateTime = stats::GEO_UPDATE_TIME,
        ParticleSimTime = stats::PARTICLE_SIM_TIME,
        FwdLightsGpuTime = stats::FWD_LIGHTS_GPU_TIME,
        DefLightsGpuTime = stats::DEF_LIGHTS_GPU_TIME,
        ShadowsGpuTime = stats::SHADOWS_GPU_TIME,
        ParticleGpuTime = stats::PARTICLE_GPU_TIME,
        /// Estimated texture memory in Mb
        TextureVMem = stats::TEXTURE_VMEM,
        /// Estimated geometry memory in Mb
        GeometryVMem = stats::GEOMETRY_VMEM,
    }
}

engine_enum! {
    /// Resource types
    pub enum ResourceType {
        /// Returned for invalid handles
        Undefined = res_types::UNDEFINED,
        SceneGraph = res_types::SCENE_GRAPH,
        Geometry = res_types::GEOMETRY,
        Animation = res_types::ANIMATION,
        Material = res_types::MATERIAL,
        Code = res_types::CODE,
        Shader = res_types::SHADER,
        Texture = res_types::TEXTURE,
        ParticleEffect = res_types::PARTICLE_EFFECT,
        Pipeline = res_types::PIPELINE,
    }
}

engine_enum! {
    /// Texture stream formats
    pub enum TextureFormat {
        Unknown = formats::UNKNOWN,
        Bgra8 = formats::TEX_BGRA8,
        Dxt1 = formats::TEX_DXT1,
        Dxt3 = formats::TEX_DXT3,
        Dxt5 = formats::TEX_DXT5,
        Rgba16F = formats::TEX_RGBA16F,
        Rgba32F = formats::TEX_RGBA32F,
    }
}

engine_enum! {
    /// Scene node types
    pub enum NodeType {
        /// Returned for invalid handles; matches any type in searches
        Undefined = node_types::UNDEFINED,
        Group = node_types::GROUP,
        Model = node_types::MODEL,
        Mesh = node_types::MESH,
        Joint = node_types::JOINT,
        Light = node_types::LIGHT,
        Camera = node_types::CAMERA,
        Emitter = node_types::EMITTER,
    }
}

bitflags! {
    /// Flags used when adding a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResourceFlags: c_int {
        /// Excluded from `unloaded_resources`
        const NO_QUERY = res_flags::NO_QUERY;
        const NO_TEX_COMPRESSION = res_flags::NO_TEX_COMPRESSION;
        const NO_TEX_MIPMAPS = res_flags::NO_TEX_MIPMAPS;
        const TEX_CUBEMAP = res_flags::TEX_CUBEMAP;
        const TEX_DYNAMIC = res_flags::TEX_DYNAMIC;
        const TEX_RENDERABLE = res_flags::TEX_RENDERABLE;
        const TEX_SRGB = res_flags::TEX_SRGB;
    }
}

bitflags! {
    /// Scene node flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: c_int {
        const NO_DRAW = node_flags::NO_DRAW;
        const NO_CAST_SHADOW = node_flags::NO_CAST_SHADOW;
        const NO_RAY_QUERY = node_flags::NO_RAY_QUERY;
        const INACTIVE = node_flags::INACTIVE;
    }
}

// --- Resource accessors ---

engine_enum! {
    pub enum GeometryRes {
        GeometryElem = geo_res::GEOMETRY_ELEM,
        GeoIndexCountI = geo_res::GEO_INDEX_COUNT_I,
        GeoVertexCountI = geo_res::GEO_VERTEX_COUNT_I,
        /// 1 when index data is 16 bit, 0 for 32 bit
        GeoIndices16I = geo_res::GEO_INDICES16_I,
        GeoIndexStream = geo_res::GEO_INDEX_STREAM,
        /// float x, y, z
        GeoVertPosStream = geo_res::GEO_VERT_POS_STREAM,
        /// float nx, ny, nz, tx, ty, tz, tw
        GeoVertTanStream = geo_res::GEO_VERT_TAN_STREAM,
        GeoVertStaticStream = geo_res::GEO_VERT_STATIC_STREAM,
    }
}

engine_enum! {
    pub enum AnimationRes {
        EntityElem = anim_res::ENTITY_ELEM,
        EntFrameCountI = anim_res::ENT_FRAME_COUNT_I,
    }
}

engine_enum! {
    pub enum MaterialRes {
        MaterialElem = mat_res::MATERIAL_ELEM,
        SamplerElem = mat_res::SAMPLER_ELEM,
        UniformElem = mat_res::UNIFORM_ELEM,
        MatClassStr = mat_res::MAT_CLASS_STR,
        MatLinkI = mat_res::MAT_LINK_I,
        MatShaderI = mat_res::MAT_SHADER_I,
        SampNameStr = mat_res::SAMP_NAME_STR,
        SampTexResI = mat_res::SAMP_TEX_RES_I,
        UnifNameStr = mat_res::UNIF_NAME_STR,
        UnifValueF4 = mat_res::UNIF_VALUE_F4,
    }
}

engine_enum! {
    pub enum ShaderRes {
        ContextElem = shader_res::CONTEXT_ELEM,
        SamplerElem = shader_res::SAMPLER_ELEM,
        UniformElem = shader_res::UNIFORM_ELEM,
        ContNameStr = shader_res::CONT_NAME_STR,
        SampNameStr = shader_res::SAMP_NAME_STR,
        UnifNameStr = shader_res::UNIF_NAME_STR,
        UnifSizeI = shader_res::UNIF_SIZE_I,
        UnifDefValueF4 = shader_res::UNIF_DEF_VALUE_F4,
    }
}

engine_enum! {
    pub enum TextureRes {
        TextureElem = tex_res::TEXTURE_ELEM,
        /// Base image of a slice or one mipmap level of it
        ImageElem = tex_res::IMAGE_ELEM,
        TexFormatI = tex_res::TEX_FORMAT_I,
        TexSliceCountI = tex_res::TEX_SLICE_COUNT_I,
        ImgWidthI = tex_res::IMG_WIDTH_I,
        ImgHeightI = tex_res::IMG_HEIGHT_I,
        /// First element is the lower left corner
        ImgPixelStream = tex_res::IMG_PIXEL_STREAM,
    }
}

engine_enum! {
    pub enum ParticleEffectRes {
        ParticleElem = part_eff_res::PARTICLE_ELEM,
        ChanMoveVelElem = part_eff_res::CHAN_MOVE_VEL_ELEM,
        ChanRotVelElem = part_eff_res::CHAN_ROT_VEL_ELEM,
        ChanSizeElem = part_eff_res::CHAN_SIZE_ELEM,
        ChanColRElem = part_eff_res::CHAN_COL_R_ELEM,
        ChanColGElem = part_eff_res::CHAN_COL_G_ELEM,
        ChanColBElem = part_eff_res::CHAN_COL_B_ELEM,
        ChanColAElem = part_eff_res::CHAN_COL_A_ELEM,
        PartLifeMinF = part_eff_res::PART_LIFE_MIN_F,
        PartLifeMaxF = part_eff_res::PART_LIFE_MAX_F,
        ChanStartMinF = part_eff_res::CHAN_START_MIN_F,
        ChanStartMaxF = part_eff_res::CHAN_START_MAX_F,
        ChanEndRateF = part_eff_res::CHAN_END_RATE_F,
        ChanDragElem = part_eff_res::CHAN_DRAG_ELEM,
    }
}

engine_enum! {
    pub enum PipelineRes {
        StageElem = pipe_res::STAGE_ELEM,
        StageNameStr = pipe_res::STAGE_NAME_STR,
        StageActivationI = pipe_res::STAGE_ACTIVATION_I,
    }
}

accessor!(ResourceAccessor for
    GeometryRes, AnimationRes, MaterialRes, ShaderRes, TextureRes, ParticleEffectRes, PipelineRes);

// --- Node parameters ---

engine_enum! {
    /// Parameters available on every node type
    pub enum NodeParams {
        NameStr = node_params::NAME_STR,
        /// Application specific `Attachment` XML string
        AttachmentStr = node_params::ATTACHMENT_STR,
    }
}

engine_enum! {
    pub enum ModelParams {
        GeoResI = model::GEO_RES_I,
        SwSkinningI = model::SW_SKINNING_I,
        LodDist1F = model::LOD_DIST1_F,
        LodDist2F = model::LOD_DIST2_F,
        LodDist3F = model::LOD_DIST3_F,
        LodDist4F = model::LOD_DIST4_F,
    }
}

engine_enum! {
    pub enum MeshParams {
        MatResI = mesh::MAT_RES_I,
        BatchStartI = mesh::BATCH_START_I,
        BatchCountI = mesh::BATCH_COUNT_I,
        VertRStartI = mesh::VERT_R_START_I,
        VertREndI = mesh::VERT_R_END_I,
        LodLevelI = mesh::LOD_LEVEL_I,
    }
}

engine_enum! {
    pub enum JointParams {
        JointIndexI = joint::JOINT_INDEX_I,
    }
}

engine_enum! {
    pub enum LightParams {
        MatResI = light::MAT_RES_I,
        RadiusF = light::RADIUS_F,
        FovF = light::FOV_F,
        /// RGB, components 0..=2
        ColorF3 = light::COLOR_F3,
        ColorMultiplierF = light::COLOR_MULTIPLIER_F,
        /// 0 to 4
        ShadowMapCountI = light::SHADOW_MAP_COUNT_I,
        ShadowSplitLambdaF = light::SHADOW_SPLIT_LAMBDA_F,
        ShadowMapBiasF = light::SHADOW_MAP_BIAS_F,
        LightingContextStr = light::LIGHTING_CONTEXT_STR,
        ShadowContextStr = light::SHADOW_CONTEXT_STR,
    }
}

engine_enum! {
    pub enum CameraParams {
        PipeResI = camera::PIPE_RES_I,
        /// 0 renders to the main framebuffer
        OutTexResI = camera::OUT_TEX_RES_I,
        OutBufIndexI = camera::OUT_BUF_INDEX_I,
        LeftPlaneF = camera::LEFT_PLANE_F,
        RightPlaneF = camera::RIGHT_PLANE_F,
        BottomPlaneF = camera::BOTTOM_PLANE_F,
        TopPlaneF = camera::TOP_PLANE_F,
        NearPlaneF = camera::NEAR_PLANE_F,
        FarPlaneF = camera::FAR_PLANE_F,
        ViewportXI = camera::VIEWPORT_X_I,
        ViewportYI = camera::VIEWPORT_Y_I,
        ViewportWidthI = camera::VIEWPORT_WIDTH_I,
        ViewportHeightI = camera::VIEWPORT_HEIGHT_I,
        OrthoI = camera::ORTHO_I,
        OccCullingI = camera::OCC_CULLING_I,
    }
}

engine_enum! {
    pub enum EmitterParams {
        MatResI = emitter::MAT_RES_I,
        PartEffResI = emitter::PART_EFF_RES_I,
        MaxCountI = emitter::MAX_COUNT_I,
        /// -1 for infinite
        RespawnCountI = emitter::RESPAWN_COUNT_I,
        DelayF = emitter::DELAY_F,
        EmissionRateF = emitter::EMISSION_RATE_F,
        SpreadAngleF = emitter::SPREAD_ANGLE_F,
        ForceF3 = emitter::FORCE_F3,
    }
}

accessor!(NodeAccessor for
    NodeParams, ModelParams, MeshParams, JointParams, LightParams, CameraParams, EmitterParams);
