//! Grid model: which days and which time rows are selectable.
//!
//! [`compute_grid`] is pure and total. Out-of-range hours are clamped, an
//! empty or inverted window falls back to eight hours from the start, and the
//! last row is allowed to overhang the end of the window when the block size
//! does not divide it evenly.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Block sizes offered by the host's picker. The model accepts any positive value.
pub const BLOCK_SIZE_CHOICES: [u32; 6] = [5, 10, 15, 20, 30, 60];

/// Window length used when the end hour is not after the start hour.
pub const FALLBACK_WINDOW_HOURS: i32 = 8;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_start_hour")]
    pub start_hour: i32,
    #[serde(default = "default_end_hour")]
    pub end_hour: i32,
    #[serde(default = "default_block_size")]
    pub block_size_minutes: u32,
    #[serde(default)]
    pub include_saturday: bool,
    #[serde(default)]
    pub include_sunday: bool,
}

fn default_start_hour() -> i32 {
    8
}
fn default_end_hour() -> i32 {
    16
}
fn default_block_size() -> u32 {
    60
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            block_size_minutes: default_block_size(),
            include_saturday: false,
            include_sunday: false,
        }
    }
}

impl GridConfig {
    /// Clamped start hour and the end hour after the fallback is applied.
    ///
    /// The returned end is always greater than the start and may exceed 23.
    pub fn effective_hours(&self) -> (u32, u32) {
        let start = self.start_hour.clamp(0, 23);
        let end = self.end_hour.clamp(0, 23);
        let end = if end <= start {
            start + FALLBACK_WINDOW_HOURS
        } else {
            end
        };
        (start as u32, end as u32)
    }

    /// Block size with a zero value replaced by the default.
    pub fn effective_block_size(&self) -> u32 {
        if self.block_size_minutes == 0 {
            default_block_size()
        } else {
            self.block_size_minutes
        }
    }
}

/// Displayable days and row offsets derived from a [`GridConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    /// Weekday indices in Sunday-first order (0=Sun ... 6=Sat).
    pub days: Vec<u8>,
    /// Row start times in minutes since midnight, ascending.
    pub rows: Vec<u32>,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub block_size_minutes: u32,
}

impl GridModel {
    /// Whether the cell at `(day, time)` is rendered by this grid.
    pub fn contains(&self, day: u8, time: u32) -> bool {
        self.days.contains(&day) && self.rows.binary_search(&time).is_ok()
    }

    pub fn cell_count(&self) -> usize {
        self.days.len() * self.rows.len()
    }
}

pub fn compute_grid(config: &GridConfig) -> GridModel {
    let (start_hour, end_hour) = config.effective_hours();
    let block = config.effective_block_size();

    let start_minutes = start_hour * 60;
    let end_minutes = end_hour * 60;
    let total_minutes = end_minutes - start_minutes;
    let row_count = total_minutes.div_ceil(block);

    let rows = (0..row_count).map(|i| start_minutes + i * block).collect();

    let days = (0u8..7)
        .filter(|&day| match day {
            0 => config.include_sunday,
            6 => config.include_saturday,
            _ => true,
        })
        .collect();

    GridModel {
        days,
        rows,
        start_minutes,
        end_minutes,
        block_size_minutes: block,
    }
}

/// Weekday for a Sunday-first index, `None` past Saturday.
pub fn weekday(day: u8) -> Option<Weekday> {
    if day > 6 {
        return None;
    }
    Some((0..day).fold(Weekday::Sun, |d, _| d.succ()))
}

/// Abbreviated day header, e.g. `"Mon"`.
pub fn day_label(day: u8) -> String {
    weekday(day)
        .map(|w| w.to_string())
        .unwrap_or_else(|| format!("Day {day}"))
}

/// 12-hour row label: `"8 AM"` on the hour, `"8:30 AM"` otherwise.
///
/// Rows past midnight (from a window that overhangs the day) wrap around.
pub fn time_label(minutes: u32) -> String {
    let wrapped = minutes % MINUTES_PER_DAY;
    let Some(time) = NaiveTime::from_hms_opt(wrapped / 60, wrapped % 60, 0) else {
        return format!("{minutes}m");
    };
    if wrapped % 60 == 0 {
        time.format("%-I %p").to_string()
    } else {
        time.format("%-I:%M %p").to_string()
    }
}
