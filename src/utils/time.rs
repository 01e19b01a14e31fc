use chrono::{DateTime, Local, NaiveTime};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Scheduling slack added to the pruner's wait so the sweep lands after the
/// close, not just before it.
pub const PRUNE_SLACK: Duration = Duration::from_millis(100);

/// Returns the current time in milliseconds since UNIX epoch
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// The default session close: 16:00 local civil time.
pub fn default_session_close() -> NaiveTime {
    NaiveTime::from_hms_opt(16, 0, 0).expect("16:00:00 is a valid time of day")
}

/// Next occurrence of `close` in local civil time, strictly after now.
pub fn next_session_close(close: NaiveTime) -> DateTime<Local> {
    let now = Local::now();
    let mut date = now.date_naive();

    if now.time() >= close {
        date = date.succ_opt().unwrap_or(date);
    }

    // A close falling inside a DST transition resolves to the later of the
    // candidate instants; a close skipped by the transition falls back to a
    // plain 24h delay.
    date.and_time(close)
        .and_local_timezone(Local)
        .latest()
        .unwrap_or_else(|| now + chrono::Duration::hours(24))
}

/// Wall-clock duration from now until the next session close, plus
/// [`PRUNE_SLACK`].
pub fn duration_until_session_close(close: NaiveTime) -> Duration {
    let next = next_session_close(close);
    let until = (next - Local::now()).to_std().unwrap_or(Duration::ZERO);
    until + PRUNE_SLACK
}
