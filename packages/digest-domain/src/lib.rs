pub mod normalize;
pub mod paragraph;
