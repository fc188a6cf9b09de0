//! libpng `component_loc`: channel count and layout of a simplified-API
//! format.
//!
//! `loc` is indexed alpha, red, green, blue. Absent alpha is reported as
//! channel 4.

use focalcheck_core::png::format::{
    CHANNEL_ABSENT, ChannelMap, PNG_FORMAT_FLAG_AFIRST, PNG_FORMAT_FLAG_ALPHA,
    PNG_FORMAT_FLAG_BGR, PNG_FORMAT_FLAG_COLOR, PNG_FORMAT_FLAG_COLORMAP, PNG_FORMAT_FLAG_LINEAR,
    component_loc,
};

use crate::check::CheckContext;
use crate::driver::{Scenario, Suite};
use crate::error::SetupError;
use crate::expect_eq;

/// Run `component_loc` on a map pre-filled with junk so untouched slots show.
fn layout(format: u32) -> (u32, ChannelMap) {
    let mut loc: ChannelMap = [0xEE; 4];
    let channels = component_loc(&mut loc, format);
    (channels, loc)
}

fn rgb(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let (channels, loc) = layout(PNG_FORMAT_FLAG_COLOR);
    expect_eq!(ctx, channels, 3);
    expect_eq!(ctx, loc[2], 1, "green is the middle channel");
    expect_eq!(ctx, loc[0], CHANNEL_ABSENT, "no alpha");
    expect_eq!(ctx, loc, [4, 0, 1, 2]);
    Ok(())
}

fn gray(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let (channels, loc) = layout(0);
    expect_eq!(ctx, channels, 1);
    expect_eq!(ctx, loc, [CHANNEL_ABSENT, 0, 0, 0]);

    let (channels, loc) = layout(PNG_FORMAT_FLAG_ALPHA);
    expect_eq!(ctx, channels, 2);
    expect_eq!(ctx, loc, [1, 0, 0, 0]);

    let (channels, loc) = layout(PNG_FORMAT_FLAG_ALPHA | PNG_FORMAT_FLAG_AFIRST);
    expect_eq!(ctx, channels, 2);
    expect_eq!(ctx, loc, [0, 1, 1, 1]);
    Ok(())
}

fn rgba_and_argb(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let rgba = PNG_FORMAT_FLAG_COLOR | PNG_FORMAT_FLAG_ALPHA;
    expect_eq!(ctx, layout(rgba), (4, [3, 0, 1, 2]));
    expect_eq!(ctx, layout(rgba | PNG_FORMAT_FLAG_AFIRST), (4, [0, 1, 2, 3]));
    Ok(())
}

fn bgr_variants(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let bgr = PNG_FORMAT_FLAG_COLOR | PNG_FORMAT_FLAG_BGR;
    expect_eq!(ctx, layout(bgr), (3, [CHANNEL_ABSENT, 2, 1, 0]));
    expect_eq!(ctx, layout(bgr | PNG_FORMAT_FLAG_ALPHA), (4, [3, 2, 1, 0]));
    expect_eq!(
        ctx,
        layout(bgr | PNG_FORMAT_FLAG_ALPHA | PNG_FORMAT_FLAG_AFIRST),
        (4, [0, 3, 2, 1])
    );
    Ok(())
}

fn bgr_ignored_for_gray(ctx: &mut CheckContext) -> Result<(), SetupError> {
    expect_eq!(ctx, layout(PNG_FORMAT_FLAG_BGR), layout(0));
    expect_eq!(
        ctx,
        layout(PNG_FORMAT_FLAG_BGR | PNG_FORMAT_FLAG_ALPHA),
        layout(PNG_FORMAT_FLAG_ALPHA)
    );
    Ok(())
}

fn storage_flags_do_not_move_channels(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let base = PNG_FORMAT_FLAG_COLOR | PNG_FORMAT_FLAG_ALPHA | PNG_FORMAT_FLAG_AFIRST;
    for extra in [PNG_FORMAT_FLAG_LINEAR, PNG_FORMAT_FLAG_COLORMAP] {
        expect_eq!(ctx, layout(base | extra), layout(base), "extra flag {extra:#x}");
    }
    Ok(())
}

pub fn suite() -> Suite {
    Suite {
        name: "png_component_loc",
        library: "libpng",
        focal: "component_loc",
        scenarios: vec![
            Scenario::new("rgb", "three color channels, alpha absent", rgb),
            Scenario::new("gray", "gray with and without alpha", gray),
            Scenario::new("rgba_and_argb", "alpha last or first", rgba_and_argb),
            Scenario::new("bgr_variants", "BGR swaps red and blue", bgr_variants),
            Scenario::new(
                "bgr_ignored_for_gray",
                "BGR has no effect without color",
                bgr_ignored_for_gray,
            ),
            Scenario::new(
                "storage_flags_do_not_move_channels",
                "linear and colormap keep the layout",
                storage_flags_do_not_move_channels,
            ),
        ],
    }
}
