//! Status log output.
//!
//! Drains a [`LogStream`] between ticks and writes one line per entry:
//!
//! ```text
//! [    125000] INFO: Recording started
//! ```
//!
//! The byte sink is a closure, so the same drain feeds the UART on the
//! board and stdout in the host simulation.

use crate::logging::{BufWriter, LogEntry, LogStream};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// Formatted line buffer size.
pub const LINE_BUF_SIZE: usize = 160;

/// UART configuration for logging.
pub struct UartLoggerConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 21, // UART1 TX, routed through the GPIO matrix
        }
    }
}

/// Format log entry to bytes.
///
/// Format: `[timestamp_us] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    use core::fmt::Write;

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = writeln!(
        writer,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );
    writer.pos
}

/// Drain every pending entry into `write`.
///
/// Returns the number of entries written.
pub fn drain_log<const N: usize>(stream: &LogStream<N>, mut write: impl FnMut(&[u8])) -> usize {
    let mut line = [0u8; LINE_BUF_SIZE];
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut line);
        write(&line[..len]);
        count += 1;
    }

    count
}

/// Report and reset the dropped-message counter, if non-zero.
///
/// Returns `true` if a report was written.
pub fn report_dropped<const N: usize>(stream: &LogStream<N>, mut write: impl FnMut(&[u8])) -> bool {
    use core::fmt::Write;

    let dropped = stream.dropped();
    if dropped == 0 {
        return false;
    }

    let mut msg = [0u8; 64];
    let mut writer = BufWriter { buf: &mut msg, pos: 0 };
    let _ = writeln!(writer, "[WARN] Dropped: {} status messages", dropped);
    let len = writer.pos;
    write(&msg[..len]);

    stream.reset_dropped();
    true
}

/// Initialize UART TX-only for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// Drain the stream to UART. Write errors drop the line.
#[cfg(target_os = "espidf")]
pub fn drain_to_uart<const N: usize>(uart: &mut UartTxDriver<'_>, stream: &LogStream<N>) -> usize {
    drain_log(stream, |line| {
        let _ = uart.write(line);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::rt_info;

    #[test]
    fn test_format_log_entry() {
        let mut entry = LogEntry {
            timestamp_us: 1234567,
            level: LogLevel::Info,
            len: 17,
            ..Default::default()
        };
        entry.msg[..17].copy_from_slice(b"Recording started");

        let mut buf = [0u8; LINE_BUF_SIZE];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert_eq!(formatted, "[   1234567] INFO: Recording started\n");
    }

    #[test]
    fn test_format_truncated_message() {
        let mut entry = LogEntry {
            timestamp_us: 999,
            level: LogLevel::Warn,
            len: 5,
            ..Default::default()
        };
        entry.msg[..10].copy_from_slice(b"TEST12345X"); // Only first 5 used

        let mut buf = [0u8; LINE_BUF_SIZE];
        let len = format_log_entry(&entry, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("WARN"));
        assert!(formatted.contains("TEST1"));
        assert!(!formatted.contains('X'));
    }

    #[test]
    fn test_drain_log_writes_all_lines() {
        let stream: LogStream<8> = LogStream::new();
        rt_info!(stream, 1, "Playback started");
        rt_info!(stream, 2, "[PLAY] {}/{} samples", 1000, 16000);

        let mut out = Vec::new();
        let count = drain_log(&stream, |line| out.extend_from_slice(line));

        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("INFO: Playback started\n"));
        assert!(text.contains("INFO: [PLAY] 1000/16000 samples\n"));
        assert!(!stream.has_entries());
    }

    #[test]
    fn test_report_dropped_resets_counter() {
        let stream: LogStream<2> = LogStream::new();
        for t in 0..5 {
            rt_info!(stream, t, "tick {}", t);
        }
        assert_eq!(stream.dropped(), 3);

        let mut out = Vec::new();
        assert!(report_dropped(&stream, |line| out.extend_from_slice(line)));
        assert_eq!(out, b"[WARN] Dropped: 3 status messages\n");
        assert_eq!(stream.dropped(), 0);
        assert!(!report_dropped(&stream, |_| {}));
    }
}
