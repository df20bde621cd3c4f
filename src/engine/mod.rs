pub mod clock;
pub mod normalize;
pub mod render;
