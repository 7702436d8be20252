//! Retained scene graph: node arena, styles, dirty tracking and the JSON description format.

pub mod desc;
pub mod dirty;
pub mod node;
pub mod style;
pub mod tree;
