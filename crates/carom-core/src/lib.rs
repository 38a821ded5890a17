pub mod physics;
pub mod table;
pub mod vec2;
