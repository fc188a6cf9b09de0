//! minizip local-header readers.

pub mod local;

pub use local::{UNZ_EOF, UNZ_ERRNO, UNZ_OK, ZipStream, get_short};
