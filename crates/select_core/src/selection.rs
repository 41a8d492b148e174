//! Selection endpoints and the gesture-driven state machine.

/// One selection endpoint in `(character, line)` space.
///
/// `character` is a codepoint index into the line's logical text, not a
/// byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub character: usize,
    pub line: usize,
}

impl Position {
    /// Start of the first line.
    pub const ORIGIN: Self = Self {
        character: 0,
        line: 0,
    };

    #[inline]
    pub const fn new(character: usize, line: usize) -> Self {
        Self { character, line }
    }

    /// Lexicographic sort key: line first, then character.
    #[inline]
    fn key(self) -> (usize, usize) {
        (self.line, self.character)
    }
}

/// An ordered selection range.
///
/// Invariant: `(start.line, start.character) <= (end.line, end.character)`
/// lexicographically. Produced only by [`SelectionState::current`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// `true` when the range covers zero characters.
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Raw anchor/cursor endpoint pair driven by gestures.
///
/// The states of the machine are implicit in which endpoints are set:
/// *Unset* (neither), *Anchored* (anchor only), *Ranged* (both). Raw
/// endpoints preserve gesture history — dragging upwards leaves the
/// anchor below the cursor — and are re-ordered only when read through
/// [`current`](Self::current).
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionState {
    anchor: Option<Position>,
    cursor: Option<Position>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unset/Ranged → Anchored: place the anchor, clear the cursor.
    pub fn set_anchor(&mut self, pos: Position) {
        self.anchor = Some(pos);
        self.cursor = None;
    }

    /// Anchored/Ranged → Ranged: move the cursor endpoint.
    ///
    /// A no-op from Unset; the gesture dispatcher is responsible for
    /// anchoring first (shift-click auto-anchors at the origin).
    pub fn extend_to(&mut self, pos: Position) {
        if self.anchor.is_none() {
            return;
        }
        self.cursor = Some(pos);
    }

    /// Directly produce a Ranged selection, bypassing anchor/cursor
    /// gesture semantics (word, line, and select-all gestures).
    pub fn select_range(&mut self, a: Position, b: Position) {
        self.anchor = Some(a);
        self.cursor = Some(b);
    }

    /// → Unset.
    pub fn clear(&mut self) {
        self.anchor = None;
        self.cursor = None;
    }

    /// `true` once an anchor has been placed.
    #[inline]
    pub fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// `true` unless both endpoints are set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() || self.cursor.is_none()
    }

    /// Read-time normalization: order the endpoints by (line, then
    /// character) and return the selection, or `None` unless both
    /// endpoints are set. A pure projection, not a state transition.
    pub fn current(&self) -> Option<Selection> {
        let (a, b) = (self.anchor?, self.cursor?);
        let (start, end) = if a.key() <= b.key() { (a, b) } else { (b, a) };
        Some(Selection { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_then_anchored_then_ranged() {
        let mut state = SelectionState::new();
        assert!(state.current().is_none());

        state.set_anchor(Position::new(2, 1));
        assert!(state.current().is_none()); // Anchored is not a selection

        state.extend_to(Position::new(5, 1));
        let sel = state.current().unwrap();
        assert_eq!(sel.start, Position::new(2, 1));
        assert_eq!(sel.end, Position::new(5, 1));
    }

    #[test]
    fn extend_without_anchor_is_noop() {
        let mut state = SelectionState::new();
        state.extend_to(Position::new(3, 0));
        assert!(state.current().is_none());
    }

    #[test]
    fn current_orders_backwards_drag() {
        let mut state = SelectionState::new();
        state.set_anchor(Position::new(4, 2));
        state.extend_to(Position::new(1, 0));

        let sel = state.current().unwrap();
        assert_eq!(sel.start, Position::new(1, 0));
        assert_eq!(sel.end, Position::new(4, 2));
    }

    #[test]
    fn current_orders_by_character_within_line() {
        let mut state = SelectionState::new();
        state.set_anchor(Position::new(7, 3));
        state.extend_to(Position::new(2, 3));

        let sel = state.current().unwrap();
        assert_eq!(sel.start, Position::new(2, 3));
        assert_eq!(sel.end, Position::new(7, 3));
    }

    #[test]
    fn set_anchor_clears_previous_range() {
        let mut state = SelectionState::new();
        state.select_range(Position::new(0, 0), Position::new(3, 0));
        assert!(state.current().is_some());

        state.set_anchor(Position::new(1, 1));
        assert!(state.current().is_none());
    }

    #[test]
    fn clear_resets_to_unset() {
        let mut state = SelectionState::new();
        state.select_range(Position::new(0, 0), Position::new(3, 0));
        state.clear();
        assert!(state.is_empty());
        assert!(state.current().is_none());
        assert!(!state.has_anchor());
    }
}
