//! Linear record/playback buffer
//!
//! Fixed-capacity store of 8-bit samples with independent write and read
//! cursors. Each cursor runs 0 → N once; reaching N is the completion
//! signal. The storage is never cleared, so a short recording leaves the
//! tail of the previous one in place.

/// Result of writing one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteResult {
    /// More room left
    Continuing,
    /// Cursor reached capacity (recording complete)
    Full,
}

/// Result of reading one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadResult {
    /// More samples left
    Continuing,
    /// Cursor reached capacity (playback complete)
    Exhausted,
}

/// Sample buffer with static size
pub struct SampleBuffer<const N: usize> {
    buffer: [u8; N],
    write_idx: usize,
    read_idx: usize,
}

impl<const N: usize> SampleBuffer<N> {
    /// Create new zeroed buffer
    pub const fn new() -> Self {
        const { assert!(N > 0, "Buffer capacity must be non-zero") };

        Self {
            buffer: [0u8; N],
            write_idx: 0,
            read_idx: 0,
        }
    }

    /// Capacity in samples
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Rewind the write cursor. Old contents stay until overwritten.
    #[inline]
    pub fn rewind_write(&mut self) {
        self.write_idx = 0;
    }

    /// Rewind the read cursor.
    #[inline]
    pub fn rewind_read(&mut self) {
        self.read_idx = 0;
    }

    /// Store one sample at the write cursor.
    ///
    /// A write with the cursor already at capacity stores nothing and
    /// reports `Full` again.
    #[inline]
    pub fn push(&mut self, sample: u8) -> WriteResult {
        if self.write_idx < N {
            self.buffer[self.write_idx] = sample;
            self.write_idx += 1;
        }

        if self.write_idx >= N {
            WriteResult::Full
        } else {
            WriteResult::Continuing
        }
    }

    /// Read the sample at the read cursor.
    ///
    /// With the cursor already at capacity, the last slot is repeated and
    /// `Exhausted` reported again.
    #[inline]
    pub fn pop(&mut self) -> (u8, ReadResult) {
        let sample = self.buffer[self.read_idx.min(N - 1)];
        if self.read_idx < N {
            self.read_idx += 1;
        }

        if self.read_idx >= N {
            (sample, ReadResult::Exhausted)
        } else {
            (sample, ReadResult::Continuing)
        }
    }

    /// Samples written since the last rewind
    #[inline]
    pub fn written(&self) -> usize {
        self.write_idx
    }

    /// Samples read since the last rewind
    #[inline]
    pub fn played(&self) -> usize {
        self.read_idx
    }

    /// Raw contents (including stale tail data)
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_reports_full_on_last_slot() {
        let mut buf: SampleBuffer<4> = SampleBuffer::new();
        assert_eq!(buf.push(1), WriteResult::Continuing);
        assert_eq!(buf.push(2), WriteResult::Continuing);
        assert_eq!(buf.push(3), WriteResult::Continuing);
        assert_eq!(buf.push(4), WriteResult::Full);
        assert_eq!(buf.written(), 4);
    }

    #[test]
    fn test_write_past_capacity_is_ignored() {
        let mut buf: SampleBuffer<2> = SampleBuffer::new();
        buf.push(1);
        buf.push(2);
        assert_eq!(buf.push(3), WriteResult::Full);
        assert_eq!(buf.written(), 2);
        assert_eq!(buf.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_read_past_capacity_is_clamped() {
        let mut buf: SampleBuffer<2> = SampleBuffer::new();
        buf.push(7);
        buf.push(9);
        assert_eq!(buf.pop(), (7, ReadResult::Continuing));
        assert_eq!(buf.pop(), (9, ReadResult::Exhausted));
        assert_eq!(buf.pop(), (9, ReadResult::Exhausted));
        assert_eq!(buf.played(), 2);
    }

    #[test]
    fn test_rewind_keeps_stale_tail() {
        let mut buf: SampleBuffer<4> = SampleBuffer::new();
        for s in [10, 20, 30, 40] {
            buf.push(s);
        }
        buf.rewind_write();
        buf.push(99);
        assert_eq!(buf.as_slice(), &[99, 20, 30, 40]);
    }
}
