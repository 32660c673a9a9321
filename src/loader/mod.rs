//! Byte acquisition and the decode/load entry points.

pub(crate) mod pipeline;
pub(crate) mod source;
