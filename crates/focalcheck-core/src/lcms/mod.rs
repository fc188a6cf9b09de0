//! Little CMS profile I/O helpers.

pub mod tags;

pub use tags::{NormalizeStage, ProfileTags, StageLocation, read_float_output_tag};
