/// Pivot/bound selection over byte boundaries.
///
/// The pivot is the fixed anchor, the bound is the moving end. The selected
/// bytes are the half-open range `[begin, end)`; a selection whose ends
/// coincide is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pivot: u64,
    bound: u64,
}

impl Selection {
    pub fn new(pivot: u64, bound: u64) -> Self {
        Self { pivot, bound }
    }

    pub fn pivot(&self) -> u64 {
        self.pivot
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    pub fn begin(&self) -> u64 {
        self.pivot.min(self.bound)
    }

    pub fn end(&self) -> u64 {
        self.pivot.max(self.bound)
    }

    pub fn is_valid(&self) -> bool {
        self.begin() != self.end()
    }

    pub fn len(&self) -> u64 {
        self.end() - self.begin()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    pub fn in_range(&self, v: u64) -> bool {
        v >= self.begin() && v < self.end()
    }

    /// Collapse to an empty selection at `v`.
    pub fn set_pivot(&mut self, v: u64) {
        self.pivot = v;
        self.bound = v;
    }

    /// Move the bound only.
    pub fn extend(&mut self, v: u64) {
        self.bound = v;
    }

    pub fn selected_range(&self) -> Option<(u64, u64)> {
        self.is_valid().then(|| (self.begin(), self.end()))
    }
}
