mod component;
mod palette;
mod properties;
mod render;

pub use component::FlowEditorCanvas;
