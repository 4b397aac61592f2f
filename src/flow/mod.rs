//! Workflow graph editor core: node registry, graph model, viewport,
//! edge routing and the gesture state machine. Nothing in here touches the
//! DOM.

mod document;
mod editor;
mod error;
mod geometry;
mod graph;
mod interaction;
mod properties;
mod registry;
mod router;
mod settings;
mod viewport;

pub use document::{Flow, FlowConnection, FlowNode, FlowStatus};
pub use editor::FlowEditor;
pub use error::{EdgeRejection, FlowError};
pub use geometry::{NodeSize, Point};
pub use graph::{Edge, GraphModel, Node, NodeConfig, NodeId};
pub use interaction::{HitTarget, InteractionController, InteractionState, Key};
pub use properties::{ConfigEdit, PropertySheet};
pub use registry::{NodeCategory, NodeTypeDefinition, NodeTypeRegistry};
pub use router::{Arrowhead, ConnectionRouter, CubicBezier, Route};
pub use settings::EditorSettings;
pub use viewport::Viewport;
