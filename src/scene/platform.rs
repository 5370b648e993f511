//! Platform scene: a platform model on the forward pipeline, lit by one
//! strong light

use horde3d::{
    Engine, HordeError, LightParams, Node, Resource, ResourceFlags, ResourceType, Transform,
};

/// Subdirectories searched for the bare resource names this scene uses
const CONTENT_SUBDIRS: [&str; 9] = [
    "pipelines",
    "models",
    "materials",
    "shaders",
    "textures",
    "animations",
    "particles",
    "models/platform",
    "effects",
];

const LIGHT_COLOR: [f32; 3] = [1.9, 1.7, 1.75];

/// `|` separated search path: `base` followed by its content subdirectories
pub fn content_search_path(base: &str) -> String {
    let base = base.trim_end_matches('/');
    std::iter::once(base.to_string())
        .chain(CONTENT_SUBDIRS.iter().map(|dir| format!("{}/{}", base, dir)))
        .collect::<Vec<_>>()
        .join("|")
}

/// Resources queued before content is loaded from disk
#[derive(Debug, Clone, Copy)]
pub struct PlatformResources {
    pub pipeline: Resource,
    model: Resource,
}

impl PlatformResources {
    /// Queue resources by bare file name; [`content_search_path`] finds them
    pub fn add(engine: &Engine) -> Result<Self, HordeError> {
        Ok(Self {
            pipeline: engine.add_resource(
                ResourceType::Pipeline,
                "forward.pipeline.xml",
                ResourceFlags::empty(),
            )?,
            model: engine.add_resource(
                ResourceType::SceneGraph,
                "platform.scene.xml",
                ResourceFlags::empty(),
            )?,
        })
    }
}

pub struct PlatformScene {
    pub camera: Node,
    pub pipeline: Resource,
}

impl PlatformScene {
    pub fn build(engine: &Engine, resources: PlatformResources) -> Result<Self, HordeError> {
        let camera = engine.add_camera_node(Node::ROOT, "Camera", resources.pipeline)?;

        let model = engine.add_nodes(Node::ROOT, resources.model)?;
        engine.set_node_transform(model, &Transform::from_translation(0.0, -30.0, -150.0));

        let light = engine.add_light_node(Node::ROOT, "Light1", Resource::NONE, "LIGHTING", "SHADOWMAP")?;
        engine.set_node_transform(light, &Transform::from_translation(0.0, 20.0, 0.0));
        engine.set_node_param_f(light, LightParams::RadiusF, 0, 150.0)?;
        engine.set_node_param_f(light, LightParams::FovF, 0, 90.0)?;
        engine.set_node_param_f(light, LightParams::ShadowSplitLambdaF, 0, 0.9)?;
        for (comp, &value) in LIGHT_COLOR.iter().enumerate() {
            engine.set_node_param_f(light, LightParams::ColorF3, comp, value)?;
        }

        Ok(Self {
            camera,
            pipeline: resources.pipeline,
        })
    }
}
