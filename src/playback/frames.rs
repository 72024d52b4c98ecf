//! Lazily computed, memoized sequence of automaton snapshots.

use tracing::debug;
use crate::cellular::Automaton;

/// A fixed number of frames, where frame `i` is the automaton after `i` steps.
///
/// Frame 0 is the seed and always exists. Later frames are computed the first
/// time they are requested and kept for the lifetime of the sequence, so the
/// computed frames always form a prefix `0..n` of the sequence.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    /// Computed prefix; `frames.len()` is the number of populated entries.
    frames: Vec<Automaton>,
    num_frames: usize,
    cursor: usize,
    /// Number of rule-engine steps performed so far.
    steps_computed: usize,
}

impl FrameSequence {
    /// Create a sequence of `num_frames` frames starting from `seed`.
    ///
    /// A budget of zero is treated as one frame, since the seed always exists.
    pub fn new(seed: Automaton, num_frames: usize) -> Self {
        let num_frames = num_frames.max(1);
        let mut frames = Vec::with_capacity(num_frames.min(1024));
        frames.push(seed);
        Self {
            frames,
            num_frames,
            cursor: 0,
            steps_computed: 0,
        }
    }

    /// Total number of frames in the sequence.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Index of the last frame.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.num_frames - 1
    }

    /// Current frame index.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of frames computed so far, seed included.
    #[inline]
    pub fn computed_len(&self) -> usize {
        self.frames.len()
    }

    /// Number of times the rule engine has been stepped.
    #[inline]
    pub fn steps_computed(&self) -> usize {
        self.steps_computed
    }

    /// Frame `i` if it has already been computed.
    pub fn cached(&self, i: usize) -> Option<&Automaton> {
        self.frames.get(i)
    }

    /// Frame `i`, computing every missing frame up to it first.
    ///
    /// Returns `None` when `i` is past the end of the sequence. Frames are
    /// filled by walking forward from the last computed one, so each frame is
    /// computed at most once and the call depth stays constant.
    pub fn get_frame(&mut self, i: usize) -> Option<&Automaton> {
        if i >= self.num_frames {
            return None;
        }
        while self.frames.len() <= i {
            let next = match self.frames.last() {
                Some(previous) => previous.next(),
                None => unreachable!("the seed frame is never removed"),
            };
            self.frames.push(next);
            self.steps_computed += 1;
            debug!(frame = self.frames.len() - 1, "computed frame");
        }
        self.frames.get(i)
    }

    /// The frame under the cursor.
    pub fn current(&mut self) -> &Automaton {
        let cursor = self.cursor;
        match self.get_frame(cursor) {
            Some(frame) => frame,
            None => unreachable!("cursor {} is kept inside the sequence", cursor),
        }
    }

    /// Move the cursor one frame forward; no-op on the last frame.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.num_frames {
            self.cursor += 1;
        }
    }

    /// Move the cursor one frame back; no-op on frame 0.
    pub fn retreat(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move the cursor to frame `i`; out-of-range indices are ignored.
    pub fn seek(&mut self, i: usize) {
        if i < self.num_frames {
            self.cursor = i;
        }
    }

    #[inline]
    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.cursor == self.last_index()
    }
}
