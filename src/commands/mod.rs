pub mod clean;
pub mod inspect;
pub mod normalize;
