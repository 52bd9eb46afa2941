//! Elapsed-time counters ("we have been together for ...")

use serde::{Deserialize, Serialize};

/// A local calendar date and time to count from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalDateTime {
    pub year: u32,
    /// 1-12
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
}

impl LocalDateTime {
    /// Milliseconds since the epoch in the browser's local time zone
    #[cfg(target_arch = "wasm32")]
    pub fn to_millis(&self) -> f64 {
        js_sys::Date::new_with_year_month_day_hr_min_sec(
            self.year,
            self.month.saturating_sub(1) as i32,
            self.day as i32,
            self.hour as i32,
            self.minute as i32,
            self.second as i32,
        )
        .get_time()
    }
}

/// One counter on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTarget {
    /// Element id prefix: `{prefix}-days`, `{prefix}-hours`, ...
    pub prefix: String,
    pub since: LocalDateTime,
}

impl CountdownTarget {
    pub fn new(prefix: &str, since: LocalDateTime) -> Self {
        Self {
            prefix: prefix.to_string(),
            since,
        }
    }

    /// Element ids paired with their text, in days/hours/minutes/seconds order
    pub fn field_texts(&self, elapsed: &Elapsed) -> [(String, String); 4] {
        let texts = elapsed.texts();
        [
            (format!("{}-days", self.prefix), texts.days),
            (format!("{}-hours", self.prefix), texts.hours),
            (format!("{}-minutes", self.prefix), texts.minutes),
            (format!("{}-seconds", self.prefix), texts.seconds),
        ]
    }
}

/// Whole time units between two instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// Display strings for one counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTexts {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Elapsed {
    /// Time from `start_ms` to `now_ms`, or `None` if the start is still ahead
    pub fn since(start_ms: f64, now_ms: f64) -> Option<Self> {
        let diff = now_ms - start_ms;
        if diff.is_nan() || diff < 0.0 {
            return None;
        }
        let total = (diff / 1000.0).floor() as u64;
        Some(Self {
            days: total / 86_400,
            hours: ((total % 86_400) / 3600) as u8,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        })
    }

    pub fn texts(&self) -> CountdownTexts {
        CountdownTexts {
            days: group_thousands(self.days),
            hours: format!("{:02}", self.hours),
            minutes: format!("{:02}", self.minutes),
            seconds: format!("{:02}", self.seconds),
        }
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
