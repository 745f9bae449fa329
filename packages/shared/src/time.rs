//! Time-related utilities with clock abstraction for testability.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use chrono::{DateTime, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Monotonic instant used for inactivity bookkeeping
    fn now(&self) -> Instant;

    /// Wall-clock time as fractional seconds since the Unix epoch
    fn unix_seconds(&self) -> f64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn unix_seconds(&self) -> f64 {
        get_unix_timestamp()
    }
}

/// Manually driven clock for tests.
///
/// Starts at a fixed origin and only moves when [`ManualClock::advance`] or
/// [`ManualClock::set_elapsed`] is called. Both the monotonic and the
/// wall-clock readings move together.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    origin_unix_seconds: f64,
    elapsed_millis: AtomicU64,
}

impl ManualClock {
    /// Create a new manual clock whose wall-clock reading starts at `origin_unix_seconds`
    pub fn new(origin_unix_seconds: f64) -> Self {
        Self {
            origin: Instant::now(),
            origin_unix_seconds,
            elapsed_millis: AtomicU64::new(0),
        }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        self.elapsed_millis
            .fetch_add(duration_to_millis(by), Ordering::SeqCst);
    }

    /// Place the clock exactly `elapsed` after its origin
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.elapsed_millis
            .store(duration_to_millis(elapsed), Ordering::SeqCst);
    }

    /// Time elapsed since the origin
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_millis.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn unix_seconds(&self) -> f64 {
        self.origin_unix_seconds + self.elapsed().as_secs_f64()
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Get current Unix timestamp as fractional seconds
pub fn get_unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Convert a Unix timestamp (fractional seconds) to UTC RFC 3339 format.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn timestamp_to_rfc3339(unix_seconds: f64) -> Option<String> {
    if !unix_seconds.is_finite() {
        return None;
    }
    let micros = (unix_seconds * 1_000_000.0).round() as i64;
    DateTime::<Utc>::from_timestamp_micros(micros)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_positive_unix_seconds() {
        // テスト項目: SystemClock が正の Unix 時刻を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.unix_seconds();

        // then (期待する結果):
        assert!(timestamp > 0.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        // テスト項目: SystemClock の Instant は単調増加する
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(10));
        let second = clock.now();

        // then (期待する結果):
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_stays_still_until_advanced() {
        // テスト項目: ManualClock は advance するまで進まない
        // given (前提条件):
        let clock = ManualClock::new(1_000.0);

        // when (操作):
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.now();

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(clock.unix_seconds(), 1_000.0);
    }

    #[test]
    fn test_manual_clock_advance_moves_both_readings() {
        // テスト項目: advance で monotonic と wall-clock の両方が進む
        // given (前提条件):
        let clock = ManualClock::new(1_000.0);
        let start = clock.now();

        // when (操作):
        clock.advance(Duration::from_secs(30));
        clock.advance(Duration::from_millis(500));

        // then (期待する結果):
        assert_eq!(clock.now() - start, Duration::from_millis(30_500));
        assert_eq!(clock.unix_seconds(), 1_030.5);
    }

    #[test]
    fn test_manual_clock_set_elapsed_is_absolute() {
        // テスト項目: set_elapsed は origin からの絶対位置を設定する
        // given (前提条件):
        let clock = ManualClock::default();
        clock.advance(Duration::from_secs(100));

        // when (操作):
        clock.set_elapsed(Duration::from_secs(30));

        // then (期待する結果):
        assert_eq!(clock.elapsed(), Duration::from_secs(30));
    }

    #[test]
    fn test_timestamp_to_rfc3339_format() {
        // テスト項目: タイムスタンプが正しく RFC 3339 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00.250 UTC
        let timestamp = 1_672_531_200.25;

        // when (操作):
        let result = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(result.as_deref(), Some("2023-01-01T00:00:00.250Z"));
    }

    #[test]
    fn test_timestamp_to_rfc3339_rejects_non_finite() {
        // テスト項目: NaN や無限大は変換できない
        // given (前提条件):

        // when (操作):
        let nan = timestamp_to_rfc3339(f64::NAN);
        let inf = timestamp_to_rfc3339(f64::INFINITY);

        // then (期待する結果):
        assert!(nan.is_none());
        assert!(inf.is_none());
    }
}
