//! Typed scene graph and its assembly from a generic tree.

mod assembler;
pub(crate) mod model;
pub(crate) mod objects;
pub(crate) mod registry;
pub(crate) mod vertex;
