//! `gen_mac8host`: match a one-byte link-layer host address.
//!
//! Only ARCnet and BACnet MS/TP carry 8-bit MAC addresses. The link type
//! picks the header offsets of the source and destination bytes, the
//! direction qualifier picks which of them the emitted code compares.

use thiserror::Error;

/// ARCnet with BSD-style header.
pub const DLT_ARCNET: i32 = 7;
/// Raw IP, no link-layer header.
pub const DLT_RAW: i32 = 12;
/// ARCnet with Linux-style header.
pub const DLT_ARCNET_LINUX: i32 = 129;
/// BACnet MS/TP frames.
pub const DLT_BACNET_MS_TP: i32 = 165;

pub const Q_DEFAULT: u8 = 0;
pub const Q_SRC: u8 = 1;
pub const Q_DST: u8 = 2;
pub const Q_OR: u8 = 3;
pub const Q_AND: u8 = 4;
pub const Q_ADDR1: u8 = 5;
pub const Q_ADDR2: u8 = 6;
pub const Q_ADDR3: u8 = 7;
pub const Q_ADDR4: u8 = 8;
pub const Q_RA: u8 = 9;
pub const Q_TA: u8 = 10;

/// Offset base used by the generated comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetBase {
    LinkHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GencodeError {
    #[error("'{context}' not supported on {linktype}")]
    UnsupportedLinkType { context: String, linktype: String },
    #[error("'{qualifier}' is not a valid qualifier for '{context}'")]
    InvalidDirection { qualifier: String, context: String },
}

/// Header offsets of the source and destination address bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mac8Offsets {
    pub src_off: u32,
    pub dst_off: u32,
}

/// Code-generation collaborators `gen_mac8host` calls into.
pub trait FilterCodegen {
    type Block;

    /// Emit `link[base + offset] == value` as a one-byte comparison.
    fn gen_byte_cmp(&mut self, base: OffsetBase, offset: u32, value: u8) -> Self::Block;
    fn gen_and(&mut self, a: Self::Block, b: Self::Block) -> Self::Block;
    fn gen_or(&mut self, a: Self::Block, b: Self::Block) -> Self::Block;
}

/// Resolve the address-byte offsets for `linktype`.
pub fn mac8_offsets(linktype: i32, context: &str) -> Result<Mac8Offsets, GencodeError> {
    match linktype {
        DLT_ARCNET | DLT_ARCNET_LINUX => Ok(Mac8Offsets {
            src_off: 0,
            dst_off: 1,
        }),
        DLT_BACNET_MS_TP => Ok(Mac8Offsets {
            src_off: 4,
            dst_off: 3,
        }),
        other => Err(GencodeError::UnsupportedLinkType {
            context: context.to_string(),
            linktype: linktype_name(other),
        }),
    }
}

/// Build the filter block matching `mac8` in the direction `dir`.
pub fn gen_mac8host<C: FilterCodegen>(
    cg: &mut C,
    linktype: i32,
    mac8: u8,
    dir: u8,
    context: &str,
) -> Result<C::Block, GencodeError> {
    let offsets = mac8_offsets(linktype, context)?;
    match dir {
        Q_SRC => Ok(cg.gen_byte_cmp(OffsetBase::LinkHeader, offsets.src_off, mac8)),
        Q_DST => Ok(cg.gen_byte_cmp(OffsetBase::LinkHeader, offsets.dst_off, mac8)),
        Q_AND => {
            let src = cg.gen_byte_cmp(OffsetBase::LinkHeader, offsets.src_off, mac8);
            let dst = cg.gen_byte_cmp(OffsetBase::LinkHeader, offsets.dst_off, mac8);
            Ok(cg.gen_and(src, dst))
        }
        Q_DEFAULT | Q_OR => {
            let src = cg.gen_byte_cmp(OffsetBase::LinkHeader, offsets.src_off, mac8);
            let dst = cg.gen_byte_cmp(OffsetBase::LinkHeader, offsets.dst_off, mac8);
            Ok(cg.gen_or(src, dst))
        }
        other => Err(GencodeError::InvalidDirection {
            qualifier: direction_keyword(other).to_string(),
            context: context.to_string(),
        }),
    }
}

/// Filter-language keyword for a direction qualifier.
#[must_use]
pub fn direction_keyword(dir: u8) -> &'static str {
    match dir {
        Q_DEFAULT => "default",
        Q_SRC => "src",
        Q_DST => "dst",
        Q_OR => "src or dst",
        Q_AND => "src and dst",
        Q_ADDR1 => "addr1",
        Q_ADDR2 => "addr2",
        Q_ADDR3 => "addr3",
        Q_ADDR4 => "addr4",
        Q_RA => "ra",
        Q_TA => "ta",
        _ => "?",
    }
}

fn linktype_name(linktype: i32) -> String {
    match linktype {
        DLT_RAW => "RAW".to_string(),
        other => format!("DLT {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace {
        cmps: Vec<u32>,
    }

    impl FilterCodegen for Trace {
        type Block = String;

        fn gen_byte_cmp(&mut self, _base: OffsetBase, offset: u32, value: u8) -> String {
            self.cmps.push(offset);
            format!("link[{offset}]=={value}")
        }

        fn gen_and(&mut self, a: String, b: String) -> String {
            format!("({a} && {b})")
        }

        fn gen_or(&mut self, a: String, b: String) -> String {
            format!("({a} || {b})")
        }
    }

    #[test]
    fn arcnet_variants_share_offsets() {
        let bsd = mac8_offsets(DLT_ARCNET, "host").unwrap();
        let linux = mac8_offsets(DLT_ARCNET_LINUX, "host").unwrap();
        assert_eq!(bsd, linux);
        assert_eq!(bsd.src_off, 0);
        assert_eq!(bsd.dst_off, 1);
    }

    #[test]
    fn raw_linktype_names_the_keyword() {
        let err = mac8_offsets(DLT_RAW, "ahost").unwrap_err();
        assert_eq!(err.to_string(), "'ahost' not supported on RAW");
    }

    #[test]
    fn or_direction_compares_both_bytes() {
        let mut cg = Trace::default();
        let block = gen_mac8host(&mut cg, DLT_BACNET_MS_TP, 0x2a, Q_OR, "host").unwrap();
        assert_eq!(cg.cmps, vec![4, 3]);
        assert_eq!(block, "(link[4]==42 || link[3]==42)");
    }

    #[test]
    fn wlan_qualifiers_are_rejected() {
        let mut cg = Trace::default();
        let err = gen_mac8host(&mut cg, DLT_ARCNET, 1, Q_RA, "host").unwrap_err();
        assert_eq!(err.to_string(), "'ra' is not a valid qualifier for 'host'");
        assert!(cg.cmps.is_empty());
    }
}
