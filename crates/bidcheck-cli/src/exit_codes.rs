//! Unified exit codes. Part of the public contract for CI callers.

pub const SUCCESS: i32 = 0;
/// The run completed but persistence failed, or a requested record is absent.
pub const PARTIAL: i32 = 1;
/// Config/argument problem or a run-level error (run never started).
pub const CONFIG_ERROR: i32 = 2;
