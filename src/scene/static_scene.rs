//! Static scene: a knight, a light and a camera, nothing animated

use horde3d::{
    Engine, HordeError, LightParams, Node, Resource, ResourceFlags, ResourceType, Transform,
};

/// Resources queued before content is loaded from disk
#[derive(Debug, Clone, Copy)]
pub struct StaticResources {
    pub pipeline: Resource,
    model: Resource,
}

impl StaticResources {
    pub fn add(engine: &Engine) -> Result<Self, HordeError> {
        Ok(Self {
            pipeline: engine.add_resource(
                ResourceType::Pipeline,
                "pipelines/hdr.pipeline.xml",
                ResourceFlags::empty(),
            )?,
            model: engine.add_resource(
                ResourceType::SceneGraph,
                "models/knight/knight.scene.xml",
                ResourceFlags::empty(),
            )?,
        })
    }
}

pub struct StaticScene {
    pub camera: Node,
    pub pipeline: Resource,
}

impl StaticScene {
    /// Build the scene graph from loaded resources
    pub fn build(engine: &Engine, resources: StaticResources) -> Result<Self, HordeError> {
        let camera = engine.add_camera_node(Node::ROOT, "Camera", resources.pipeline)?;

        let model = engine.add_nodes(Node::ROOT, resources.model)?;
        engine.set_node_transform(
            model,
            &Transform::from_translation(0.0, 0.0, -30.0).with_uniform_scale(0.1),
        );

        let light = engine.add_light_node(Node::ROOT, "Light1", Resource::NONE, "LIGHTING", "SHADOWMAP")?;
        engine.set_node_transform(light, &Transform::from_translation(0.0, 20.0, 0.0));
        engine.set_node_param_f(light, LightParams::RadiusF, 0, 50.0)?;
        engine.set_node_param_f(light, LightParams::FovF, 0, 90.0)?;

        Ok(Self {
            camera,
            pipeline: resources.pipeline,
        })
    }
}
