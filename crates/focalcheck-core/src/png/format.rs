//! Channel layout of `png_image` format codes.

pub const PNG_FORMAT_FLAG_ALPHA: u32 = 0x01;
pub const PNG_FORMAT_FLAG_COLOR: u32 = 0x02;
pub const PNG_FORMAT_FLAG_LINEAR: u32 = 0x04;
pub const PNG_FORMAT_FLAG_COLORMAP: u32 = 0x08;
pub const PNG_FORMAT_FLAG_BGR: u32 = 0x10;
pub const PNG_FORMAT_FLAG_AFIRST: u32 = 0x20;

/// Index used in a [`ChannelMap`] for a component the format does not have.
pub const CHANNEL_ABSENT: u8 = 4;

/// Position of alpha, red, green and blue (in that order) within a pixel.
///
/// Gray formats map all three color slots to the single gray channel.
pub type ChannelMap = [u8; 4];

/// Compute the channel map for `format` and return the channel count.
pub fn component_loc(loc: &mut ChannelMap, format: u32) -> u32 {
    let mut channels;

    if format & PNG_FORMAT_FLAG_COLOR != 0 {
        channels = 3;
        loc[2] = 1;
        if format & PNG_FORMAT_FLAG_BGR != 0 {
            loc[1] = 2;
            loc[3] = 0;
        } else {
            loc[1] = 0;
            loc[3] = 2;
        }
    } else {
        channels = 1;
        loc[1] = 0;
        loc[2] = 0;
        loc[3] = 0;
    }

    if format & PNG_FORMAT_FLAG_ALPHA != 0 {
        if format & PNG_FORMAT_FLAG_AFIRST != 0 {
            loc[0] = 0;
            loc[1] += 1;
            loc[2] += 1;
            loc[3] += 1;
        } else {
            // channels is at most 3 here
            loc[0] = channels as u8;
        }
        channels += 1;
    } else {
        loc[0] = CHANNEL_ABSENT;
    }

    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_without_alpha() {
        let mut loc = [9; 4];
        assert_eq!(component_loc(&mut loc, 0), 1);
        assert_eq!(loc, [CHANNEL_ABSENT, 0, 0, 0]);
    }

    #[test]
    fn argb_shifts_color_slots() {
        let mut loc = [0; 4];
        let format = PNG_FORMAT_FLAG_COLOR | PNG_FORMAT_FLAG_ALPHA | PNG_FORMAT_FLAG_AFIRST;
        assert_eq!(component_loc(&mut loc, format), 4);
        assert_eq!(loc, [0, 1, 2, 3]);
    }

    #[test]
    fn bgra_keeps_alpha_last() {
        let mut loc = [0; 4];
        let format = PNG_FORMAT_FLAG_COLOR | PNG_FORMAT_FLAG_ALPHA | PNG_FORMAT_FLAG_BGR;
        assert_eq!(component_loc(&mut loc, format), 4);
        assert_eq!(loc, [3, 2, 1, 0]);
    }

    #[test]
    fn linear_and_colormap_do_not_change_layout() {
        let mut plain = [0; 4];
        let mut flagged = [0; 4];
        let base = PNG_FORMAT_FLAG_COLOR;
        let n1 = component_loc(&mut plain, base);
        let n2 = component_loc(
            &mut flagged,
            base | PNG_FORMAT_FLAG_LINEAR | PNG_FORMAT_FLAG_COLORMAP,
        );
        assert_eq!(n1, n2);
        assert_eq!(plain, flagged);
    }
}
