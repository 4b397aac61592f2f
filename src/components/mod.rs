pub mod flow_canvas;
