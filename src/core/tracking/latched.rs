//=========================================================================
// Latched Value
//=========================================================================
//
// Three-phase value for edge detection over a continuously written input.
//
// ```text
//   device callback ──set()──► input
//                                │
//   once per frame ──shift()──►  previous ← current ← input
//                                │
//   queries ─────────────────►  current / previous (stable all frame)
// ```
//
// `input` may be overwritten any number of times between shifts; only its
// value at the shift is committed. If nothing is written, the input keeps
// its last value and the committed phases settle on it.
//
//=========================================================================

//=== Latched =============================================================

/// Input / current / previous triple with edge queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latched<T: Copy + PartialEq> {
    input: T,
    current: T,
    previous: T,
}

impl<T: Copy + PartialEq> Latched<T> {
    /// Creates a latch with every phase set to `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            input: initial,
            current: initial,
            previous: initial,
        }
    }

    /// Writes the input phase. Not visible until the next shift.
    pub fn set(&mut self, value: T) {
        self.input = value;
    }

    /// Commits one frame: previous ← current, then current ← input.
    pub fn shift(&mut self) {
        self.previous = self.current;
        self.current = self.input;
    }

    /// Forces every phase to `value` without producing an edge.
    pub fn reset(&mut self, value: T) {
        *self = Self::new(value);
    }

    #[cfg(test)]
    pub fn input(&self) -> T {
        self.input
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn previous(&self) -> T {
        self.previous
    }

    /// Returns `true` if the committed value differs from the last frame.
    pub fn changed(&self) -> bool {
        self.current != self.previous
    }

    /// Returns `true` on the first frame the committed value equals `value`.
    pub fn entered(&self, value: T) -> bool {
        self.current == value && self.previous != value
    }
}

impl<T: Copy + PartialEq + Default> Default for Latched<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that a write is invisible until the shift commits it.
    #[test]
    fn set_is_committed_by_shift() {
        let mut latch = Latched::new(0);

        latch.set(5);
        assert_eq!(latch.current(), 0);
        assert_eq!(latch.input(), 5);

        latch.shift();
        assert_eq!((latch.previous(), latch.current()), (0, 5));
        assert!(latch.changed());
    }

    /// Tests that only the value present at the shift is committed.
    #[test]
    fn last_write_before_shift_wins() {
        let mut latch = Latched::new('a');

        latch.set('b');
        latch.set('c');
        latch.shift();

        assert_eq!(latch.current(), 'c');
        assert_eq!(latch.previous(), 'a');
    }

    /// Tests that entered fires once, then settles when input persists.
    #[test]
    fn entered_fires_once_while_input_persists() {
        let mut latch = Latched::new(false);
        latch.set(true);

        let edges: Vec<bool> = (0..3)
            .map(|_| {
                latch.shift();
                latch.entered(true)
            })
            .collect();

        assert_eq!(edges, vec![true, false, false]);
        assert!(!latch.changed());
    }

    /// Tests that reset leaves no edge behind.
    #[test]
    fn reset_clears_edges() {
        let mut latch = Latched::new(1);
        latch.set(2);
        latch.shift();

        latch.reset(0);

        assert!(!latch.changed());
        assert_eq!(latch.input(), 0);
    }
}
