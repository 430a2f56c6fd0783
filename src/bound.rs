/// Upper limit of a repetition or of a digit count
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Bound {
    Finite(usize),
    Unbounded,
}

impl Bound {
    /// Whether one more item may follow `count` items already taken
    pub fn allows_more(&self, count: usize) -> bool {
        match self {
            Bound::Finite(max) => count < *max,
            Bound::Unbounded => true,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

impl From<usize> for Bound {
    fn from(max: usize) -> Self {
        Bound::Finite(max)
    }
}

impl From<Option<usize>> for Bound {
    fn from(max: Option<usize>) -> Self {
        max.map_or(Bound::Unbounded, Bound::Finite)
    }
}
