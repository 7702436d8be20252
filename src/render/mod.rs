pub mod backend;
pub mod renderer;
pub mod vertices;
