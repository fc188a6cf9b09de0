//! libpng simplified-API helpers.

pub mod format;

pub use format::{ChannelMap, component_loc};
