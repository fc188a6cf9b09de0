//! libpcap filter-compiler fragments.

pub mod gencode;

pub use gencode::{FilterCodegen, GencodeError, Mac8Offsets, gen_mac8host, mac8_offsets};
