bitflags::bitflags! {
    /// Which passes must rerun for a node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Dirty: u8 {
        /// Measured size is stale.
        const MEASURE = 1 << 0;
        /// Resolved rect is stale.
        const LAYOUT = 1 << 1;
        /// Vertex data is stale.
        const PAINT = 1 << 2;
    }
}

impl Dirty {
    /// Bit a parent receives when `self` is raised on one of its children.
    ///
    /// Size changes bubble as MEASURE, reflow as LAYOUT, anything weaker as PAINT.
    pub fn escalation(self) -> Self {
        if self.contains(Self::MEASURE) {
            Self::MEASURE
        } else if self.contains(Self::LAYOUT) {
            Self::LAYOUT
        } else {
            Self::PAINT
        }
    }
}

impl Default for Dirty {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dirty.rs"]
mod tests;
