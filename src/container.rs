/// The payload of a [`pair`](crate::sequence::pair) or
/// [`separated_pair`](crate::sequence::separated_pair).
///
/// Holds the value produced by the first parser in `left` and the value
/// produced by the second parser in `right`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairContainer<L, R> {
    /// Value of the first parser.
    pub left: L,
    /// Value of the second parser.
    pub right: R,
}

impl<L, R> PairContainer<L, R> {
    /// Creates a new [`PairContainer`].
    pub const fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> From<(L, R)> for PairContainer<L, R> {
    fn from((left, right): (L, R)) -> Self {
        Self { left, right }
    }
}

impl<L, R> From<PairContainer<L, R>> for (L, R) {
    fn from(pair: PairContainer<L, R>) -> Self {
        (pair.left, pair.right)
    }
}
