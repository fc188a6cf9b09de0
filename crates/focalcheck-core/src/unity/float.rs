//! `UnityAssertFloatSpecial`.

use super::{UNITY_STR_EXPECTED, UNITY_STR_NOT, UNITY_STR_WAS, Unity, UnityOutput};

/// Special-value traits, numbered as in `unity_internals.h`.
///
/// The low bit tells whether the value should have the trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FloatTrait {
    IsNotInf = 0,
    IsInf = 1,
    IsNotNegInf = 2,
    IsNegInf = 3,
    IsNotNan = 4,
    IsNan = 5,
    IsNotDet = 6,
    IsDet = 7,
    Invalid = 8,
}

impl FloatTrait {
    /// Decode a raw trait code; anything out of range is `Invalid`.
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::IsNotInf,
            1 => Self::IsInf,
            2 => Self::IsNotNegInf,
            3 => Self::IsNegInf,
            4 => Self::IsNotNan,
            5 => Self::IsNan,
            6 => Self::IsNotDet,
            7 => Self::IsDet,
            _ => Self::Invalid,
        }
    }

    #[must_use]
    pub fn should_have_trait(self) -> bool {
        (self as u8) & 1 == 1
    }
}

const TRAIT_NAMES: [&str; 4] = ["Infinity", "Negative Infinity", "NaN", "Determinate"];
const INVALID_TRAIT_NAME: &str = "Invalid Float Trait";

/// Unity's rendering of a float in failure reports.
#[must_use]
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Inf" } else { "-Inf" }.to_string()
    } else {
        format!("{value}")
    }
}

impl<O: UnityOutput> Unity<O> {
    /// Fail the current test unless `actual` has (or lacks) `style`.
    pub fn assert_float_special(
        &mut self,
        actual: f32,
        msg: Option<&str>,
        line: u32,
        style: FloatTrait,
    ) {
        if self.should_skip() {
            return;
        }

        let should_be_trait = style.should_have_trait();
        let mut trait_name = TRAIT_NAMES
            .get((style as usize) >> 1)
            .copied()
            .unwrap_or(INVALID_TRAIT_NAME);

        let is_trait = match style {
            FloatTrait::IsInf | FloatTrait::IsNotInf => actual.is_infinite() && actual > 0.0,
            FloatTrait::IsNegInf | FloatTrait::IsNotNegInf => {
                actual.is_infinite() && actual < 0.0
            }
            FloatTrait::IsNan | FloatTrait::IsNotNan => actual.is_nan(),
            FloatTrait::IsDet | FloatTrait::IsNotDet => !actual.is_infinite() && !actual.is_nan(),
            FloatTrait::Invalid => {
                trait_name = INVALID_TRAIT_NAME;
                !should_be_trait
            }
        };

        if is_trait != should_be_trait {
            self.out.fail_begin(line);
            self.out.print(UNITY_STR_EXPECTED);
            if !should_be_trait {
                self.out.print(UNITY_STR_NOT);
            }
            self.out.print(trait_name);
            self.out.print(UNITY_STR_WAS);
            self.out.print(&format_float(actual));
            self.add_msg_if_specified(msg);
            self.fail_and_bail();
        }
    }
}
