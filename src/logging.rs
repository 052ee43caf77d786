//! Status log ring for RustPwmSynth.
//!
//! The tick path formats a line into a stack buffer and pushes it here;
//! the outer loop drains between ticks and does the blocking output.
//!
//! ```text
//! engine / controller ── rt_info!() ──▶ LogStream<N> ──▶ drain_log() ──▶ UART / stdout
//! ```
//!
//! A push never waits. When the ring is full the line is dropped and
//! counted; `uart_logger::report_dropped` reports the count later.

use core::cell::UnsafeCell;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Longest status line, in bytes. Longer lines are cut.
pub const MAX_MSG_LEN: usize = 120;

/// Default ring capacity, in lines.
pub const LOG_BUFFER_SIZE: usize = 64;

/// Severity of a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Something failed but the synth keeps running
    Warn,
    /// State transitions and periodic reports
    Info,
}

impl LogLevel {
    /// Tag printed in front of the message.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
        }
    }
}

/// One queued status line.
#[derive(Clone, Copy)]
pub struct LogEntry {
    pub timestamp_us: u64,
    pub level: LogLevel,
    /// Used bytes of `msg`
    pub len: u8,
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const BLANK: LogEntry = LogEntry {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text; a line cut inside a UTF-8 sequence reads as a placeholder.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Single-producer single-consumer ring of status lines.
///
/// `N` must be a power of two. Counters run freely and are masked on
/// access, so `head - tail` is the fill level.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: UnsafeCell<[LogEntry; N]>,
    /// Next slot the producer fills
    head: AtomicU32,
    /// Next slot the consumer reads
    tail: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: one producer and one consumer. The producer only writes slots
// outside [tail, head) and publishes them with a Release store of `head`;
// the consumer only reads slots inside it and frees them with a Release
// store of `tail`.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: u32 = (N as u32).wrapping_sub(1);

    /// Empty ring.
    pub const fn new() -> Self {
        const { assert!(N.is_power_of_two(), "LogStream capacity must be a power of two") };

        Self {
            slots: UnsafeCell::new([LogEntry::BLANK; N]),
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue a line. Returns `false` (and counts a drop) if the ring is full.
    #[inline]
    pub fn push(&self, timestamp_us: u64, level: LogLevel, msg: &[u8]) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);

        if head.wrapping_sub(tail) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let len = msg.len().min(MAX_MSG_LEN);
        // SAFETY: slot `head` is outside [tail, head); the consumer won't read
        // it until the store below publishes it.
        let slot = unsafe { &mut (*self.slots.get())[(head & Self::MASK) as usize] };
        slot.timestamp_us = timestamp_us;
        slot.level = level;
        slot.len = len as u8;
        slot.msg[..len].copy_from_slice(&msg[..len]);

        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Take the oldest queued line, if any.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if tail == head {
            return None;
        }

        // SAFETY: slot `tail` was published by the producer's Release store.
        let entry = unsafe { (*self.slots.get())[(tail & Self::MASK) as usize] };
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Lines dropped since the last `reset_dropped`.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Lines waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let tail = self.tail.load(Ordering::Relaxed);
        self.head.load(Ordering::Acquire).wrapping_sub(tail)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `args` into `buf`, cutting at the end. Returns bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = fmt::write(&mut writer, args);
    writer.pos
}

/// Truncating `fmt::Write` into a byte slice.
pub(crate) struct BufWriter<'a> {
    pub(crate) buf: &'a mut [u8],
    pub(crate) pos: usize,
}

impl fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.pos;
        let n = s.len().min(room);
        self.buf[self.pos..self.pos + n].copy_from_slice(&s.as_bytes()[..n]);
        self.pos += n;
        Ok(())
    }
}

/// Format and queue a status line without blocking.
///
/// ```ignore
/// rt_log!(LogLevel::Info, STATUS_LOG, now_us, "[REC] {}/{} samples", n, cap);
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut line = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut line, format_args!($($arg)*));
        $stream.push($timestamp, $level, &line[..len]);
    }};
}

/// `rt_log!` at `Info`.
#[macro_export]
macro_rules! rt_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

/// `rt_log!` at `Warn`.
#[macro_export]
macro_rules! rt_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}
