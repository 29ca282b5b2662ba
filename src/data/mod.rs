//! Model and transform types shared by the interaction and rendering layers.

pub mod annotations;
pub mod bindings;
pub mod look;
pub mod scale;
pub mod view;
