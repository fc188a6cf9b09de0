//! Unity `UnityAssertFloatSpecial`.

use focalcheck_core::unity::{FloatTrait, Unity};

use super::UnityCapture;
use crate::check::CheckContext;
use crate::driver::{Scenario, Suite};
use crate::error::SetupError;
use crate::{expect_eq, expect_false, expect_true};

const LINE: u32 = 100;

fn unity() -> Unity<UnityCapture> {
    Unity::new(UnityCapture::default())
}

fn inf_has_inf_trait(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    u.assert_float_special(f32::INFINITY, None, LINE, FloatTrait::IsInf);
    expect_false!(ctx, u.state.current_test_failed);
    expect_eq!(ctx, u.state.test_failures, 0);
    expect_eq!(ctx, u.out.fail_lines.count(), 0);
    expect_eq!(ctx, u.out.text.as_str(), "");
    Ok(())
}

fn inf_fails_not_inf_once(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let before = u.state.test_failures;
    u.assert_float_special(f32::INFINITY, None, LINE, FloatTrait::IsNotInf);
    expect_true!(ctx, u.state.current_test_failed);
    expect_eq!(ctx, u.state.test_failures - before, 1, "exactly one failure per mismatch");
    expect_eq!(ctx, u.out.fail_lines.calls(), vec![LINE]);
    expect_eq!(ctx, u.out.text.as_str(), " Expected Not Infinity Was Inf");
    Ok(())
}

fn nan_traits(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    u.assert_float_special(f32::NAN, None, LINE, FloatTrait::IsNan);
    expect_false!(ctx, u.state.current_test_failed);

    u.assert_float_special(f32::NAN, Some("nan check"), LINE + 1, FloatTrait::IsNotNan);
    expect_true!(ctx, u.state.current_test_failed);
    expect_eq!(ctx, u.out.text.as_str(), " Expected Not NaN Was NaN nan check");

    u.begin_test();
    u.out.text.clear();
    u.assert_float_special(f32::NAN, None, LINE + 2, FloatTrait::IsDet);
    expect_eq!(ctx, u.out.text.as_str(), " Expected Determinate Was NaN");
    expect_eq!(ctx, u.state.test_failures, 2);
    Ok(())
}

fn finite_is_determinate(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    u.assert_float_special(1.5, None, LINE, FloatTrait::IsDet);
    u.assert_float_special(-0.0, None, LINE, FloatTrait::IsNotInf);
    u.assert_float_special(f32::MAX, None, LINE, FloatTrait::IsNotNegInf);
    expect_eq!(ctx, u.state.test_failures, 0);

    u.assert_float_special(1.5, None, LINE + 3, FloatTrait::IsNotDet);
    expect_eq!(ctx, u.out.text.as_str(), " Expected Not Determinate Was 1.5");
    expect_eq!(ctx, u.out.fail_lines.last(), Some(LINE + 3));
    Ok(())
}

fn finite_value_text(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    u.assert_float_special(1.1, None, LINE, FloatTrait::IsNan);
    expect_eq!(ctx, u.out.text.as_str(), " Expected NaN Was 1.1");

    let mut u = unity();
    u.assert_float_special(-3.75, Some("ratio"), LINE, FloatTrait::IsInf);
    expect_eq!(ctx, u.out.text.as_str(), " Expected Infinity Was -3.75 ratio");
    Ok(())
}

fn negative_infinity(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    u.assert_float_special(f32::NEG_INFINITY, None, LINE, FloatTrait::IsNegInf);
    u.assert_float_special(f32::NEG_INFINITY, None, LINE, FloatTrait::IsNotInf);
    expect_eq!(ctx, u.state.test_failures, 0);

    u.assert_float_special(f32::NEG_INFINITY, None, LINE, FloatTrait::IsInf);
    expect_eq!(ctx, u.out.text.as_str(), " Expected Infinity Was -Inf");
    Ok(())
}

fn invalid_trait(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    let style = FloatTrait::from_raw(9);
    expect_eq!(ctx, style, FloatTrait::Invalid);
    u.assert_float_special(0.0, None, LINE, style);
    expect_true!(ctx, u.state.current_test_failed);
    expect_true!(
        ctx,
        u.out.text.contains("Invalid Float Trait"),
        "output was {:?}",
        u.out.text
    );
    Ok(())
}

fn bails_after_failure(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut u = unity();
    u.assert_float_special(2.0, None, LINE, FloatTrait::IsNan);
    u.assert_float_special(3.0, None, LINE + 1, FloatTrait::IsNan);
    u.assert_float_special(4.0, None, LINE + 2, FloatTrait::IsInf);
    expect_eq!(ctx, u.state.test_failures, 1);
    expect_eq!(ctx, u.out.fail_lines.calls(), vec![LINE]);

    u.state.current_test_ignored = true;
    u.begin_test();
    u.assert_float_special(5.0, None, LINE + 3, FloatTrait::IsNan);
    expect_eq!(ctx, u.state.test_failures, 2, "a new test reports again");
    Ok(())
}

pub fn suite() -> Suite {
    Suite {
        name: "unity_float_special",
        library: "unity",
        focal: "UnityAssertFloatSpecial",
        scenarios: vec![
            Scenario::new("inf_has_inf_trait", "+inf satisfies IS_INF", inf_has_inf_trait),
            Scenario::new(
                "inf_fails_not_inf_once",
                "+inf against IS_NOT_INF fails exactly once",
                inf_fails_not_inf_once,
            ),
            Scenario::new("nan_traits", "NaN is NaN and never determinate", nan_traits),
            Scenario::new(
                "finite_is_determinate",
                "finite values are determinate and not infinite",
                finite_is_determinate,
            ),
            Scenario::new(
                "finite_value_text",
                "finite values print without widening noise",
                finite_value_text,
            ),
            Scenario::new("negative_infinity", "-inf is not +inf", negative_infinity),
            Scenario::new("invalid_trait", "out-of-range trait codes fail", invalid_trait),
            Scenario::new(
                "bails_after_failure",
                "asserts after a failure are skipped until the next test",
                bails_after_failure,
            ),
        ],
    }
}
