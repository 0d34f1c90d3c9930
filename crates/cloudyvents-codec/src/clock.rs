use chrono::{DateTime, Duration, SubsecRound, Utc};
use cloudyvents_core::event::TIMESTAMP_PRECISION;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::trace;

type TimeSource = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Issues strictly increasing UTC timestamps.
///
/// Each call to [`next`](UniqueClock::next) returns an instant greater than
/// every instant this clock issued before, at the microsecond resolution of
/// the marker format. When the wall clock has not moved (or moved backwards)
/// since the previous call, the previous instant plus one microsecond is
/// issued instead.
///
/// Uniqueness holds per clock. Writers that share a log file must share a
/// clock; [`UniqueClock::global`] is the process-wide one.
pub struct UniqueClock {
    last: Mutex<Option<DateTime<Utc>>>,
    source: TimeSource,
}

impl UniqueClock {
    /// Creates a clock driven by the system's UTC time.
    pub fn new() -> Self {
        Self::with_source(Utc::now)
    }

    /// Creates a clock driven by a custom time source.
    pub fn with_source<F>(source: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            last: Mutex::new(None),
            source: Box::new(source),
        }
    }

    /// The process-wide clock, created on first use.
    pub fn global() -> Arc<UniqueClock> {
        static GLOBAL: OnceLock<Arc<UniqueClock>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(UniqueClock::new())).clone()
    }

    /// Returns the next unique instant.
    pub fn next(&self) -> DateTime<Utc> {
        let mut last = self.last.lock();
        let now = (self.source)().trunc_subsecs(TIMESTAMP_PRECISION);
        let issued = match *last {
            Some(prev) if now <= prev => {
                trace!(%prev, %now, "clock has not advanced; nudging forward");
                prev + Duration::microseconds(1)
            }
            _ => now,
        };
        *last = Some(issued);
        issued
    }

    /// The most recently issued instant, if any.
    pub fn last_issued(&self) -> Option<DateTime<Utc>> {
        *self.last.lock()
    }
}

impl Default for UniqueClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UniqueClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueClock")
            .field("last", &self.last_issued())
            .finish_non_exhaustive()
    }
}
