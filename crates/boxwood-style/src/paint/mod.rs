//! Paint records handed to the rendering collaborator.
//!
//! Layout ends with committed rectangles. Painting walks the tree in order
//! and, for every element that is visible, produces a [`PaintInfo`]: the
//! rectangle to fill, the element, and the interaction state a widget's
//! paint callback needs to pick its look.
//!
//! ```text
//! Style → Layout → Paint → Render
//!                    ↓
//!               PaintInfo*
//! ```

mod painter;

pub use painter::Painter;

use bitflags::bitflags;
use boxwood_dom::{ElementFlags, NodeId};

use crate::layout::Rect;

bitflags! {
    /// Interaction state of a painted element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PaintState: u8 {
        /// The pointer is over the element.
        const HOVER = 1 << 0;
        /// A mouse button is held on the element.
        const DOWN = 1 << 1;
        /// The element does not accept input.
        const DISABLED = 1 << 2;
        /// The element is checked or selected.
        const CHECKED = 1 << 3;
    }
}

impl PaintState {
    /// Derive the paint state from element flags.
    #[must_use]
    pub fn from_flags(flags: ElementFlags) -> Self {
        let mut state = Self::empty();
        state.set(Self::HOVER, flags.contains(ElementFlags::HOVERED));
        state.set(Self::DOWN, flags.intersects(ElementFlags::PRESSED_ANY));
        state.set(Self::DISABLED, flags.contains(ElementFlags::DISABLED));
        state.set(Self::CHECKED, flags.contains(ElementFlags::CHECKED));
        state
    }
}

/// One element to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintInfo {
    /// The element's border box.
    pub rect: Rect,
    /// The element.
    pub node: NodeId,
    /// Its interaction state.
    pub state: PaintState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_flags() {
        let state = PaintState::from_flags(ElementFlags::HOVERED | ElementFlags::PRESSED_RIGHT);
        assert_eq!(state, PaintState::HOVER | PaintState::DOWN);
        assert_eq!(PaintState::from_flags(ElementFlags::CLICKED_LEFT), PaintState::empty());
        assert_eq!(
            PaintState::from_flags(ElementFlags::DISABLED | ElementFlags::CHECKED),
            PaintState::DISABLED | PaintState::CHECKED
        );
    }
}
