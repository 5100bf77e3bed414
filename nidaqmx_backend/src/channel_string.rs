//! Encoding and decoding of NI-DAQmx channel strings.
//!
//! The driver names sets of channels with a compact comma-and-range notation:
//! `"Dev1/ai0:3,Dev2/ai0"` stands for `Dev1/ai0`, `Dev1/ai1`, `Dev1/ai2`,
//! `Dev1/ai3` and `Dev2/ai0`. Every collection index and every multi-channel
//! verb in this crate goes through the two functions of this module:
//!
//! - [`unflatten_channel_string`] expands a channel string into one name per channel.
//! - [`flatten_channel_string`] folds a list of names back into the compact form.
//!
//! ## Ranges
//!
//! A range `base<a>:<b>` expands to every index between `a` and `b` inclusive.
//! When `a > b` the names are produced in descending order, and that order is kept
//! when flattening again. The part after the colon may repeat the base
//! (`Dev1/ai0:Dev1/ai3`), in which case it must match the base before the colon,
//! ignoring ASCII case.
//!
//! Leading zeros on the first index fix the width of every index in the range,
//! so `EV01:02` expands to `EV01`, `EV02`.
//!
//! ## Example
//!
//! ```
//! use nidaqmx_backend::channel_string::*;
//!
//! let names = unflatten_channel_string("Dev1/ai3:1").unwrap();
//! assert_eq!(names, vec!["Dev1/ai3", "Dev1/ai2", "Dev1/ai1"]);
//! assert_eq!(flatten_channel_string(&names).unwrap(), "Dev1/ai3:1");
//! ```

use crate::error::{DaqError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Ranges describing this many channels or more are rejected.
pub const MAX_RANGE_LEN: u64 = 15000;

static RANGE_BOUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)([0-9]+)$").expect("static regex"));
static INDEXED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*[^0-9])?([0-9]+)$").expect("static regex"));

/// Splits a numeric suffix into its value and the zero-padded width it implies.
fn parse_index(digits: &str) -> Option<(u64, usize)> {
    let value = digits.parse::<u64>().ok()?;
    Some((value, pad_width(digits)))
}

fn pad_width(digits: &str) -> usize {
    if digits.len() > 1 && digits.starts_with('0') {
        digits.len()
    } else {
        0
    }
}

fn render_index(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

fn invalid_range(fragment: &str) -> DaqError {
    DaqError::invalid_argument(format!(
        "invalid range syntax in channel string fragment '{fragment}'"
    ))
}

/// Expands a channel string into one name per channel, in the order written.
///
/// # Errors
///
/// Returns [`DaqError::InvalidArgument`] with "invalid range syntax" when either
/// bound of a range lacks a numeric suffix, when the base after the colon does not
/// match the base before it, or when a range describes [`MAX_RANGE_LEN`] or more
/// channels.
pub fn unflatten_channel_string(channel_names: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for fragment in channel_names.split(',') {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        let Some((before, after)) = fragment.split_once(':') else {
            names.push(fragment.to_string());
            continue;
        };
        let (Some(m_before), Some(m_after)) = (
            RANGE_BOUND.captures(before.trim()),
            RANGE_BOUND.captures(after.trim()),
        ) else {
            return Err(invalid_range(fragment));
        };

        let base = &m_before[1];
        let after_base = &m_after[1];
        if !after_base.is_empty() && !after_base.eq_ignore_ascii_case(base) {
            return Err(invalid_range(fragment));
        }

        let (Some((first, width)), Some((last, _))) =
            (parse_index(&m_before[2]), parse_index(&m_after[2]))
        else {
            return Err(invalid_range(fragment));
        };
        let (low, high) = (first.min(last), first.max(last));
        if high - low >= MAX_RANGE_LEN - 1 {
            return Err(invalid_range(fragment));
        }

        let expand = |index: u64| format!("{base}{}", render_index(index, width));
        if last < first {
            names.extend((low..=high).rev().map(expand));
        } else {
            names.extend((low..=high).map(expand));
        }
    }
    Ok(names)
}

/// A run of consecutive indices under one base name.
struct Run {
    base: String,
    digits: Option<String>,
    start: u64,
    end: u64,
    width: usize,
}

impl Run {
    fn new(base: &str, digits: Option<&str>) -> Self {
        match digits.and_then(|d| Some((d, parse_index(d)?))) {
            Some((digits, (start, width))) => Self {
                base: base.to_string(),
                digits: Some(digits.to_string()),
                start,
                end: start,
                width,
            },
            // No usable index: the whole name stands alone.
            None => Self {
                base: format!("{base}{}", digits.unwrap_or_default()),
                digits: None,
                start: 0,
                end: 0,
                width: 0,
            },
        }
    }

    /// Extends the run with `index` if it continues it in the established direction.
    fn try_extend(&mut self, base: &str, digits: &str) -> bool {
        if self.digits.is_none() || self.base != base {
            return false;
        }
        let Ok(index) = digits.parse::<u64>() else {
            return false;
        };
        if render_index(index, self.width) != digits {
            return false;
        }
        let ascending = self.end >= self.start;
        let descending = self.end <= self.start;
        let continues = (ascending && Some(index) == self.end.checked_add(1))
            || (descending && Some(index) == self.end.checked_sub(1));
        if continues {
            self.end = index;
        }
        continues
    }

    fn emit(&self) -> String {
        match &self.digits {
            None => self.base.clone(),
            Some(digits) if self.start == self.end => format!("{}{digits}", self.base),
            Some(digits) => format!(
                "{}{digits}:{}",
                self.base,
                render_index(self.end, self.width)
            ),
        }
    }
}

/// Folds channel names into the compact channel-string form.
///
/// Every input is first expanded with [`unflatten_channel_string`], so inputs may
/// themselves be channel strings. Adjacent names sharing a base and continuing a
/// numeric run are collapsed into `base<a>:<b>`. Order is preserved and duplicates
/// are kept.
///
/// # Errors
///
/// Propagates the range errors of [`unflatten_channel_string`].
pub fn flatten_channel_string<S: AsRef<str>>(channel_names: &[S]) -> Result<String> {
    let mut expanded = Vec::new();
    for name in channel_names {
        expanded.extend(unflatten_channel_string(name.as_ref())?);
    }

    let mut emitted: Vec<String> = Vec::new();
    let mut current: Option<Run> = None;
    for name in &expanded {
        let (base, digits) = match INDEXED_NAME.captures(name) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()).to_string(),
                caps.get(2).map(|m| m.as_str().to_string()),
            ),
            None => (name.clone(), None),
        };

        if let (Some(run), Some(digits)) = (current.as_mut(), digits.as_deref()) {
            if run.try_extend(&base, digits) {
                continue;
            }
        }
        if let Some(run) = current.take() {
            emitted.push(run.emit());
        }
        current = Some(Run::new(&base, digits.as_deref()));
    }
    if let Some(run) = current {
        emitted.push(run.emit());
    }

    Ok(emitted
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(","))
}

/// Names `count` virtual channels after a single user-assigned name.
///
/// A name ending in digits continues from that index at the same width
/// (`myChan09` over four channels is `myChan09:12`); any other name is numbered
/// from zero. Empty names and names that are already lists pass through.
///
/// # Errors
///
/// Returns [`DaqError::InvalidArgument`] when the numbered range would run past
/// the largest index.
pub(crate) fn numbered_range(name: &str, count: usize) -> Result<String> {
    if count <= 1 || name.is_empty() || name.contains([',', ':']) {
        return Ok(name.to_string());
    }
    let last = count as u64 - 1;
    let first = INDEXED_NAME
        .captures(name)
        .and_then(|caps| parse_index(&caps[2]));
    match first {
        Some((first, width)) => {
            let end = first.checked_add(last).ok_or_else(|| {
                DaqError::invalid_argument(format!(
                    "cannot number {count} channels starting from '{name}'"
                ))
            })?;
            Ok(format!("{name}:{}", render_index(end, width)))
        }
        None => Ok(format!("{name}0:{last}")),
    }
}
