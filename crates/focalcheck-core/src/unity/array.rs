//! `UnityAssertEqualIntArray`.
//!
//! Arrays arrive as raw little-endian bytes, the way Unity walks memory.
//! The low nibble of the display style is the element width in bytes.

use super::{
    UNITY_STR_ELEMENT, UNITY_STR_EXPECTED, UNITY_STR_NULL_ACTUAL, UNITY_STR_NULL_EXPECTED,
    UNITY_STR_POINTLESS, UNITY_STR_SHORT_ARRAY, UNITY_STR_WAS, Unity, UnityOutput,
};

pub const UNITY_DISPLAY_RANGE_INT: u32 = 0x10;
pub const UNITY_DISPLAY_RANGE_UINT: u32 = 0x20;
pub const UNITY_DISPLAY_RANGE_HEX: u32 = 0x40;

pub const UNITY_DISPLAY_STYLE_INT8: u32 = 1 + UNITY_DISPLAY_RANGE_INT;
pub const UNITY_DISPLAY_STYLE_INT16: u32 = 2 + UNITY_DISPLAY_RANGE_INT;
pub const UNITY_DISPLAY_STYLE_INT32: u32 = 4 + UNITY_DISPLAY_RANGE_INT;
pub const UNITY_DISPLAY_STYLE_INT64: u32 = 8 + UNITY_DISPLAY_RANGE_INT;
pub const UNITY_DISPLAY_STYLE_UINT8: u32 = 1 + UNITY_DISPLAY_RANGE_UINT;
pub const UNITY_DISPLAY_STYLE_UINT16: u32 = 2 + UNITY_DISPLAY_RANGE_UINT;
pub const UNITY_DISPLAY_STYLE_UINT32: u32 = 4 + UNITY_DISPLAY_RANGE_UINT;
pub const UNITY_DISPLAY_STYLE_HEX8: u32 = 1 + UNITY_DISPLAY_RANGE_HEX;
pub const UNITY_DISPLAY_STYLE_HEX16: u32 = 2 + UNITY_DISPLAY_RANGE_HEX;

/// Compare one expected value against every actual element.
pub const UNITY_ARRAY_TO_VAL: u32 = 0;
/// Compare element-wise.
pub const UNITY_ARRAY_TO_ARRAY: u32 = 1;

/// Element width selected by a display style. Unknown widths mean 4.
#[must_use]
pub fn element_width(style: u32) -> usize {
    match style & 0xF {
        1 => 1,
        2 => 2,
        8 => 8,
        _ => 4,
    }
}

/// Read a sign-extended element of `width` bytes at `index`.
fn read_element(bytes: &[u8], index: usize, width: usize) -> Option<i64> {
    let start = index.checked_mul(width)?;
    let chunk = bytes.get(start..start.checked_add(width)?)?;
    Some(match width {
        1 => i64::from(i8::from_le_bytes([chunk[0]])),
        2 => i64::from(i16::from_le_bytes([chunk[0], chunk[1]])),
        8 => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            i64::from_le_bytes(raw)
        }
        _ => i64::from(i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])),
    })
}

/// `UnityPrintNumberByStyle` for already-masked values.
#[must_use]
pub fn format_number_by_style(value: i64, style: u32) -> String {
    if style & UNITY_DISPLAY_RANGE_INT == UNITY_DISPLAY_RANGE_INT {
        format!("{value}")
    } else if style & UNITY_DISPLAY_RANGE_UINT == UNITY_DISPLAY_RANGE_UINT {
        format!("{}", value as u64)
    } else {
        let nibbles = element_width(style) * 2;
        let mask = if nibbles >= 16 {
            u64::MAX
        } else {
            (1u64 << (nibbles * 4)) - 1
        };
        format!("0x{:0nibbles$X}", (value as u64) & mask)
    }
}

impl<O: UnityOutput> Unity<O> {
    /// Compare `num_elements` integers of `expected` and `actual`.
    ///
    /// `None` stands for a NULL array. With [`UNITY_ARRAY_TO_VAL`] the first
    /// expected element is compared against every actual element.
    #[allow(clippy::too_many_arguments)]
    pub fn assert_equal_int_array(
        &mut self,
        expected: Option<&[u8]>,
        actual: Option<&[u8]>,
        num_elements: u32,
        msg: Option<&str>,
        line: u32,
        style: u32,
        flags: u32,
    ) {
        if self.should_skip() {
            return;
        }

        if num_elements == 0 {
            self.out.fail_begin(line);
            self.out.print(UNITY_STR_POINTLESS);
            self.add_msg_if_specified(msg);
            self.fail_and_bail();
            return;
        }

        let (expected, actual) = match (expected, actual) {
            (None, None) => return,
            (Some(e), Some(a)) if std::ptr::eq(e, a) => return,
            (Some(e), Some(a)) => (e, a),
            (None, Some(_)) => {
                self.out.fail_begin(line);
                self.out.print(UNITY_STR_NULL_EXPECTED);
                self.add_msg_if_specified(msg);
                self.fail_and_bail();
                return;
            }
            (Some(_), None) => {
                self.out.fail_begin(line);
                self.out.print(UNITY_STR_NULL_ACTUAL);
                self.add_msg_if_specified(msg);
                self.fail_and_bail();
                return;
            }
        };

        let width = element_width(style);
        for index in 0..num_elements as usize {
            let expected_index = if flags == UNITY_ARRAY_TO_ARRAY {
                index
            } else {
                0
            };
            let (Some(mut expect_val), Some(mut actual_val)) = (
                read_element(expected, expected_index, width),
                read_element(actual, index, width),
            ) else {
                self.out.fail_begin(line);
                self.out.print(UNITY_STR_SHORT_ARRAY);
                self.add_msg_if_specified(msg);
                self.fail_and_bail();
                return;
            };

            if expect_val != actual_val {
                if style & UNITY_DISPLAY_RANGE_UINT != 0 && width < 8 {
                    // drop the sign extension picked up by the signed read
                    let mask = (1i64 << (8 * width)) - 1;
                    expect_val &= mask;
                    actual_val &= mask;
                }
                self.out.fail_begin(line);
                self.out.print(UNITY_STR_ELEMENT);
                self.out.print(&index.to_string());
                self.out.print(UNITY_STR_EXPECTED);
                self.out.print(&format_number_by_style(expect_val, style));
                self.out.print(UNITY_STR_WAS);
                self.out.print(&format_number_by_style(actual_val, style));
                self.add_msg_if_specified(msg);
                self.fail_and_bail();
                return;
            }
        }
    }
}
