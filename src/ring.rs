//! Ring buffer manager for the sinc engine: owns the buffer array and
//! implements `prepare_data` (§4.3), the routine that loads fresh input into
//! the ring, wraps it when the tail runs out of room, and injects the
//! trailing zero padding once `end_of_input` has been seen.

use crate::error::{SrcError, SrcResult};
use crate::trace;

/// Sentinel value written into the buffer's unused guard slots so an
/// out-of-bounds write (a bug) is loud rather than silent.
const SENTINEL: f32 = 170.0;

/// Owns the sinc engine's ring buffer and read/write cursors.
pub struct RingBuffer {
    channels: usize,
    /// Usable capacity in samples (a multiple of `channels`).
    b_len: usize,
    /// Backing storage: `b_len` usable samples plus `channels` sentinel
    /// guard samples at the tail.
    buffer: Vec<f32>,
    /// Read cursor.
    pub b_current: usize,
    /// One-past-last valid sample (may conceptually wrap below `b_current`;
    /// this implementation always keeps `b_end >= b_current` by wrapping
    /// explicitly in `prepare_data` rather than via modular arithmetic, which
    /// keeps the kernel's linear scans simple).
    pub b_end: usize,
    /// `None` while more input may arrive; `Some(index)` once end-of-input
    /// has been seen, marking where real data ends and zero padding begins.
    pub b_real_end: Option<usize>,
}

impl Clone for RingBuffer {
    fn clone(&self) -> Self {
        RingBuffer {
            channels: self.channels,
            b_len: self.b_len,
            buffer: self.buffer.clone(),
            b_current: self.b_current,
            b_end: self.b_end,
            b_real_end: self.b_real_end,
        }
    }
}

impl RingBuffer {
    pub fn new(channels: usize, b_len: usize) -> Self {
        let mut buffer = vec![0.0f32; b_len + channels];
        for slot in buffer[b_len..].iter_mut() {
            *slot = SENTINEL;
        }
        RingBuffer {
            channels,
            b_len,
            buffer,
            b_current: 0,
            b_end: 0,
            b_real_end: None,
        }
    }

    pub fn reset(&mut self) {
        for slot in self.buffer[..self.b_len].iter_mut() {
            *slot = 0.0;
        }
        self.b_current = 0;
        self.b_end = 0;
        self.b_real_end = None;
    }

    #[inline]
    pub fn sample(&self, index: usize) -> f32 {
        match self.b_real_end {
            Some(real_end) if index >= real_end => 0.0,
            _ => self.buffer[index],
        }
    }

    pub fn len(&self) -> usize {
        self.b_len
    }

    /// Samples currently available for reading between `b_current` and
    /// `b_end`.
    pub fn available(&self) -> usize {
        self.b_end.saturating_sub(self.b_current)
    }

    /// Ensure at least `2 * half_filter_chan_len` samples are available
    /// ahead of `b_current`, per §4.3. `half_filter_chan_len` is already
    /// scaled by `channels`.
    pub fn prepare_data(
        &mut self,
        data_in: &[f32],
        input_frames_available: usize,
        input_frames_used: &mut usize,
        end_of_input: bool,
        half_filter_chan_len: usize,
    ) -> SrcResult<()> {
        if self.b_real_end.is_some() {
            return Ok(());
        }

        if self.b_current == 0 && self.b_end == 0 {
            self.b_current = half_filter_chan_len;
            self.b_end = half_filter_chan_len;
        } else if self.b_end + half_filter_chan_len + self.channels >= self.b_len {
            // Wrap: slide the still-valid lookback window down to the start.
            let keep_from = self.b_current.saturating_sub(half_filter_chan_len);
            let keep_len = self.b_end - keep_from;
            if keep_len > self.b_len {
                return Err(SrcError::SincPrepareDataBadLen);
            }
            trace!("ring buffer wrap: keeping {keep_len} samples from offset {keep_from}");
            self.buffer.copy_within(keep_from..self.b_end, 0);
            self.b_current -= keep_from;
            self.b_end = keep_len;
        }

        let available_space = self.b_len.saturating_sub(self.b_end);
        let available_input_samples = input_frames_available * self.channels;
        let mut copy_len = available_input_samples.min(available_space);
        copy_len -= copy_len % self.channels;
        if self.b_end + copy_len > self.b_len {
            return Err(SrcError::SincPrepareDataBadLen);
        }
        if copy_len > 0 {
            self.buffer[self.b_end..self.b_end + copy_len]
                .copy_from_slice(&data_in[..copy_len]);
        }
        self.b_end += copy_len;
        *input_frames_used += copy_len / self.channels;

        if end_of_input
            && *input_frames_used >= input_frames_available
            && self.available() < 2 * half_filter_chan_len
        {
            let pad_tail_room = self.b_len.saturating_sub(self.b_end);
            if pad_tail_room < half_filter_chan_len + 5 * self.channels {
                let keep_from = self.b_current.saturating_sub(half_filter_chan_len);
                let keep_len = self.b_end - keep_from;
                self.buffer.copy_within(keep_from..self.b_end, 0);
                self.b_current -= keep_from;
                self.b_end = keep_len;
            }
            self.b_real_end = Some(self.b_end);
            let pad = (half_filter_chan_len + 5 * self.channels).min(self.b_len - self.b_end);
            for slot in self.buffer[self.b_end..self.b_end + pad].iter_mut() {
                *slot = 0.0;
            }
            self.b_end += pad;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_fill_leaves_lookback_zeroed() {
        let mut ring = RingBuffer::new(1, 4096);
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let mut used = 0;
        ring.prepare_data(&data, 4, &mut used, false, 8).unwrap();
        assert_eq!(ring.b_current, 8);
        assert_eq!(used, 4);
        assert_eq!(ring.sample(0), 0.0);
        assert_eq!(ring.sample(8), 1.0);
    }

    #[test]
    fn end_of_input_pads_with_zero_and_sets_real_end() {
        let mut ring = RingBuffer::new(1, 4096);
        let data = [1.0f32, 2.0];
        let mut used = 0;
        ring.prepare_data(&data, 2, &mut used, true, 8).unwrap();
        assert!(ring.b_real_end.is_some());
        let real_end = ring.b_real_end.unwrap();
        assert_eq!(ring.sample(real_end), 0.0);
        assert_eq!(ring.sample(real_end + 1), 0.0);
    }

    #[test]
    fn wraps_when_tail_runs_out_of_room() {
        let mut ring = RingBuffer::new(1, 32);
        let mut used = 0;
        // Fill close to the tail first.
        let chunk = vec![1.0f32; 16];
        ring.prepare_data(&chunk, 16, &mut used, false, 4).unwrap();
        let before_end = ring.b_end;
        ring.b_current = before_end; // pretend we've consumed everything
        let chunk2 = vec![2.0f32; 16];
        let mut used2 = 0;
        ring.prepare_data(&chunk2, 16, &mut used2, false, 4).unwrap();
        assert!(ring.b_end <= ring.len());
    }
}
