//! Unity `UnityAssertEqualIntArray`.

use focalcheck_core::unity::array::{
    UNITY_DISPLAY_STYLE_HEX16, UNITY_DISPLAY_STYLE_INT8, UNITY_DISPLAY_STYLE_INT32,
    UNITY_DISPLAY_STYLE_INT64, UNITY_DISPLAY_STYLE_UINT16,
};
use focalcheck_core::unity::{UNITY_ARRAY_TO_ARRAY, UNITY_ARRAY_TO_VAL, Unity};

use super::UnityCapture;
use crate::check::CheckContext;
use crate::driver::{Scenario, Suite};
use crate::error::SetupError;
use crate::{expect_eq, expect_false, expect_true};

const LINE: u32 = 200;

fn unity() -> Unity<UnityCapture> {
    Unity::new(UnityCapture::default())
}

fn le_bytes_i16(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn le_bytes_i32(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn zero_elements_is_pointless(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let data = le_bytes_i32(&[1, 2]);
    u.assert_equal_int_array(
        Some(&data),
        Some(&data),
        0,
        Some("empty"),
        LINE,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_true!(ctx, u.state.current_test_failed);
    expect_eq!(ctx, u.state.test_failures, 1);
    expect_eq!(
        ctx,
        u.out.text.as_str(),
        " You Asked Me To Compare Nothing, Which Was Pointless. empty"
    );
    Ok(())
}

fn same_array_passes(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let data = le_bytes_i32(&[5, -6, 7]);
    u.assert_equal_int_array(
        Some(&data),
        Some(&data),
        3,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_ARRAY,
    );
    u.assert_equal_int_array(
        None,
        None,
        3,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_ARRAY,
    );
    let copy = data.clone();
    u.assert_equal_int_array(
        Some(&data),
        Some(&copy),
        3,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_false!(ctx, u.state.current_test_failed);
    expect_eq!(ctx, u.out.fail_lines.count(), 0);
    Ok(())
}

fn null_sides_fail(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let data = le_bytes_i32(&[1]);

    let mut u = unity();
    u.assert_equal_int_array(
        None,
        Some(&data),
        1,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_eq!(ctx, u.out.text.as_str(), " Expected pointer to be NULL");
    expect_eq!(ctx, u.state.test_failures, 1);

    let mut u = unity();
    u.assert_equal_int_array(
        Some(&data),
        None,
        1,
        None,
        LINE + 1,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_eq!(ctx, u.out.text.as_str(), " Actual pointer was NULL");
    expect_eq!(ctx, u.out.fail_lines.calls(), vec![LINE + 1]);
    Ok(())
}

fn int8_mismatch_reports_index(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let expected = [1u8, 2, 0xFE, 4];
    let actual = [1u8, 2, 3, 9];
    u.assert_equal_int_array(
        Some(&expected),
        Some(&actual),
        4,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_INT8,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_eq!(ctx, u.out.text.as_str(), " Element 2 Expected -2 Was 3");
    expect_eq!(ctx, u.state.test_failures, 1, "only the first mismatch is reported");
    Ok(())
}

fn uint16_masks_sign(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let expected = le_bytes_i16(&[10, -1]);
    let actual = le_bytes_i16(&[10, 1]);
    u.assert_equal_int_array(
        Some(&expected),
        Some(&actual),
        2,
        Some("u16"),
        LINE,
        UNITY_DISPLAY_STYLE_UINT16,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_eq!(ctx, u.out.text.as_str(), " Element 1 Expected 65535 Was 1 u16");

    let mut u = unity();
    u.assert_equal_int_array(
        Some(&expected),
        Some(&actual),
        2,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_HEX16,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_eq!(ctx, u.out.text.as_str(), " Element 1 Expected 0xFFFF Was 0x0001");
    Ok(())
}

fn int64_elements(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let expected: Vec<u8> = [i64::MIN, 0].iter().flat_map(|v| v.to_le_bytes()).collect();
    let actual: Vec<u8> = [i64::MIN, 1].iter().flat_map(|v| v.to_le_bytes()).collect();
    u.assert_equal_int_array(
        Some(&expected),
        Some(&actual),
        2,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_INT64,
        UNITY_ARRAY_TO_ARRAY,
    );
    expect_eq!(ctx, u.out.text.as_str(), " Element 1 Expected 0 Was 1");
    Ok(())
}

fn array_to_val(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let expected = le_bytes_i32(&[7]);
    let actual = le_bytes_i32(&[7, 7, 8]);
    u.assert_equal_int_array(
        Some(&expected),
        Some(&actual[..8]),
        2,
        None,
        LINE,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_VAL,
    );
    expect_false!(ctx, u.state.current_test_failed);

    u.assert_equal_int_array(
        Some(&expected),
        Some(&actual),
        3,
        None,
        LINE + 1,
        UNITY_DISPLAY_STYLE_INT32,
        UNITY_ARRAY_TO_VAL,
    );
    expect_eq!(ctx, u.out.text.as_str(), " Element 2 Expected 7 Was 8");
    Ok(())
}

pub fn suite() -> Suite {
    Suite {
        name: "unity_int_array",
        library: "unity",
        focal: "UnityAssertEqualIntArray",
        scenarios: vec![
            Scenario::new(
                "zero_elements_is_pointless",
                "comparing nothing fails",
                zero_elements_is_pointless,
            ),
            Scenario::new(
                "same_array_passes",
                "identical, both-null and equal arrays pass",
                same_array_passes,
            ),
            Scenario::new("null_sides_fail", "one missing side fails", null_sides_fail),
            Scenario::new(
                "int8_mismatch_reports_index",
                "first mismatching element is reported",
                int8_mismatch_reports_index,
            ),
            Scenario::new("uint16_masks_sign", "unsigned styles drop sign extension", uint16_masks_sign),
            Scenario::new("int64_elements", "8-byte elements compare whole", int64_elements),
            Scenario::new("array_to_val", "one expected value against all actuals", array_to_val),
        ],
    }
}
