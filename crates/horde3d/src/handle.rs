//! Engine handles

use std::fmt;

use horde3d_sys::{H3DNode, H3DRes, H3D_ROOT_NODE};

/// Handle to a resource owned by the engine
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Resource(H3DRes);

impl Resource {
    /// Invalid handle; accepted wherever a resource is optional
    pub const NONE: Resource = Resource(0);

    pub const fn from_raw(raw: H3DRes) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> H3DRes {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// `None` for the invalid handle
    pub fn checked(raw: H3DRes) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({})", self.0)
    }
}

/// Handle to a scene graph node
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Node(H3DNode);

impl Node {
    /// Invalid handle
    pub const NONE: Node = Node(0);

    /// Root of the scene graph; always present
    pub const ROOT: Node = Node(H3D_ROOT_NODE);

    pub const fn from_raw(raw: H3DNode) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> H3DNode {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    pub fn checked(raw: H3DNode) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Node::ROOT {
            f.write_str("Node(root)")
        } else {
            write!(f, "Node({})", self.0)
        }
    }
}
