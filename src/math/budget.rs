/// Time withheld for flushing, never less than this
pub const MIN_SAFETY_MARGIN_MS: u64 = 30;

/// Drawing window never shrinks below this, so every burst makes some progress
pub const MIN_USABLE_MS: u64 = 20;

/// Convert a server-announced slot length into the time we actually draw for
///
/// Keeps back half the slot (at least 30ms) for transport latency, but always
/// leaves at least 20ms of drawing time.
pub fn safe_duration(announced_ms: u64) -> u64 {
    let safety_margin = (announced_ms / 2).max(MIN_SAFETY_MARGIN_MS);
    announced_ms
        .saturating_sub(safety_margin)
        .max(MIN_USABLE_MS)
}
