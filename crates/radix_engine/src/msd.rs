use std::ops::Range;

use crate::digits::{digit_at, RADIX};

/// Pending sub-range of the working sequence. `remaining` digits are still to
/// be examined; the next one is at position `remaining - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    start: usize,
    end: usize,
    remaining: u32,
}

impl Frame {
    fn is_leaf(&self) -> bool {
        self.remaining == 0 || self.end - self.start <= 1
    }
}

/// Depth-first, ascending-bucket walk of the MSD recursion tree, kept as an
/// explicit stack so it can stop after every resolved leaf bucket.
#[derive(Debug, Clone)]
pub(crate) struct MsdCursor {
    stack: Vec<Frame>,
    resolved: usize,
}

impl MsdCursor {
    pub(crate) fn new(len: usize, digits: u32) -> Self {
        let stack = if len == 0 {
            Vec::new()
        } else {
            vec![Frame {
                start: 0,
                end: len,
                remaining: digits,
            }]
        };
        Self { stack, resolved: 0 }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn pending_frames(&self) -> usize {
        self.stack.len()
    }

    /// Length of the sorted prefix produced so far.
    pub(crate) fn resolved(&self) -> usize {
        self.resolved
    }

    /// Splits frames until the next leaf bucket is reached and returns its range.
    pub(crate) fn advance(&mut self, sequence: &mut [u64]) -> Option<Range<usize>> {
        while let Some(frame) = self.stack.pop() {
            if frame.is_leaf() {
                self.resolved = frame.end;
                return Some(frame.start..frame.end);
            }
            self.split(frame, sequence);
        }
        None
    }

    fn split(&mut self, frame: Frame, sequence: &mut [u64]) {
        let exp = frame.remaining - 1;
        let mut buckets: [Vec<u64>; RADIX as usize] = Default::default();
        for &number in &sequence[frame.start..frame.end] {
            buckets[digit_at(number, exp) as usize].push(number);
        }

        let mut children = Vec::with_capacity(buckets.len());
        let mut offset = frame.start;
        for bucket in buckets.iter().filter(|bucket| !bucket.is_empty()) {
            let end = offset + bucket.len();
            sequence[offset..end].copy_from_slice(bucket);
            children.push(Frame {
                start: offset,
                end,
                remaining: exp,
            });
            offset = end;
        }
        // Smallest bucket must be popped first.
        self.stack.extend(children.into_iter().rev());
    }
}
