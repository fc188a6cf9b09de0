//! Unity (ThrowTheSwitch) assertion internals.
//!
//! Unity reports through a character sink and marks the running test as
//! failed instead of returning a value. [`Unity`] keeps that shape: the
//! sink is the [`UnityOutput`] seam and the per-test flags live in
//! [`UnityState`].

pub mod array;
pub mod float;

pub use array::{UNITY_ARRAY_TO_ARRAY, UNITY_ARRAY_TO_VAL};
pub use float::FloatTrait;

pub const UNITY_STR_EXPECTED: &str = " Expected ";
pub const UNITY_STR_WAS: &str = " Was ";
pub const UNITY_STR_ELEMENT: &str = " Element ";
pub const UNITY_STR_NOT: &str = "Not ";
pub const UNITY_STR_POINTLESS: &str = " You Asked Me To Compare Nothing, Which Was Pointless.";
pub const UNITY_STR_NULL_EXPECTED: &str = " Expected pointer to be NULL";
pub const UNITY_STR_NULL_ACTUAL: &str = " Actual pointer was NULL";
pub const UNITY_STR_SHORT_ARRAY: &str = " Array shorter than element count";

/// Where Unity writes its failure report.
pub trait UnityOutput {
    /// Start of a failure report for the assertion at `line`.
    fn fail_begin(&mut self, line: u32);
    fn print(&mut self, text: &str);
}

/// Sink that keeps everything in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedOutput {
    pub text: String,
    pub fail_lines: Vec<u32>,
}

impl UnityOutput for BufferedOutput {
    fn fail_begin(&mut self, line: u32) {
        self.fail_lines.push(line);
    }

    fn print(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// Flags of the test currently running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnityState {
    pub current_test_failed: bool,
    pub current_test_ignored: bool,
    /// Number of tests that bailed with a failure.
    pub test_failures: u32,
}

/// Unity runtime bound to an output sink.
#[derive(Debug, Default)]
pub struct Unity<O> {
    pub out: O,
    pub state: UnityState,
}

impl<O: UnityOutput> Unity<O> {
    pub fn new(out: O) -> Self {
        Self {
            out,
            state: UnityState::default(),
        }
    }

    /// Clear the per-test flags before the next test.
    pub fn begin_test(&mut self) {
        self.state.current_test_failed = false;
        self.state.current_test_ignored = false;
    }

    /// `RETURN_IF_FAIL_OR_IGNORE`
    fn should_skip(&self) -> bool {
        self.state.current_test_failed || self.state.current_test_ignored
    }

    /// `UNITY_FAIL_AND_BAIL` without the long jump; callers return next.
    fn fail_and_bail(&mut self) {
        self.state.current_test_failed = true;
        self.state.test_failures += 1;
    }

    fn add_msg_if_specified(&mut self, msg: Option<&str>) {
        if let Some(msg) = msg {
            self.out.print(" ");
            self.out.print(msg);
        }
    }
}
