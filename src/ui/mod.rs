pub mod input;
pub mod menu;
pub mod renderer;
pub mod scene;
pub mod sound;
pub mod surface;
