//! Buffer handling for driver calls that fill caller-owned memory.
//!
//! String and array getters follow one convention: called with a zero-sized
//! buffer they return the size they need, called with a buffer of that size
//! they fill it and return 0. The value can grow between the two calls (a
//! device appears, a channel is added), so the fill call is re-probed until it
//! fits or the retry budget runs out.

use libc::c_char;
use nidaqmx_backend::error::codes;
use nidaqmx_backend::{DaqError, Result};
use std::ffi::CString;
use tracing::{trace, warn};

/// Run a two-pass sized read.
///
/// `call` receives the buffer to fill; an empty slice is the sizing probe.
/// Returns the filled buffer, or the failing status code.
pub fn read_two_pass<T: Copy + Default>(
    max_retries: u32,
    mut call: impl FnMut(&mut [T]) -> i32,
) -> std::result::Result<Vec<T>, i32> {
    for attempt in 1..=max_retries.max(1) {
        let size = call(&mut []);
        if size < 0 {
            return Err(size);
        }
        if size == 0 {
            return Ok(Vec::new());
        }
        let mut buffer = vec![T::default(); size as usize];
        match call(&mut buffer) {
            0 => return Ok(buffer),
            codes::BUFFER_TOO_SMALL_FOR_STRING
            | codes::WRITE_BUFFER_TOO_SMALL
            | codes::STRING_TRUNCATED_TO_FIT_BUFFER => {
                trace!("value outgrew its {size}-element buffer, re-probing (attempt {attempt})");
            }
            status if status > 0 && status as usize > buffer.len() => {
                trace!("value needs {status} elements after probing {size}, re-probing");
            }
            status if status > 0 => {
                warn!("DAQmx warning {status} while filling a {size}-element buffer");
                return Ok(buffer);
            }
            status => return Err(status),
        }
    }
    Err(codes::BUFFER_TOO_SMALL_FOR_STRING)
}

/// Decode a NUL-terminated driver string, dropping everything after the NUL.
pub fn decode_c_string(buffer: &[c_char]) -> String {
    let bytes: Vec<u8> = buffer
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Convert a Rust string for the driver. Interior NULs are a caller mistake.
pub fn c_string(value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| {
        DaqError::invalid_argument(format!("'{}' contains a NUL byte", value.escape_debug()))
    })
}
