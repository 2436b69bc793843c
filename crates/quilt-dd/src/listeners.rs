//! Native listener attachment flags.

use bitflags::bitflags;

bitflags! {
    /// Native enter/leave listeners attached to an element.
    ///
    /// A native event is only delivered to an element that has the matching listener
    /// attached, the same way `addEventListener` gates delivery in a browser.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Listeners: u8 {
        const NONE          = 0b0000;
        const MOUSE_ENTER   = 0b0001;
        const MOUSE_LEAVE   = 0b0010;
        const POINTER_ENTER = 0b0100;
        const POINTER_LEAVE = 0b1000;

        const MOUSE   = Self::MOUSE_ENTER.bits() | Self::MOUSE_LEAVE.bits();
        const POINTER = Self::POINTER_ENTER.bits() | Self::POINTER_LEAVE.bits();
    }
}

impl Listeners {
    /// Returns true if any enter listener is attached.
    #[inline]
    pub fn has_enter(&self) -> bool {
        self.intersects(Self::MOUSE_ENTER | Self::POINTER_ENTER)
    }

    /// Returns true if any leave listener is attached.
    #[inline]
    pub fn has_leave(&self) -> bool {
        self.intersects(Self::MOUSE_LEAVE | Self::POINTER_LEAVE)
    }
}
