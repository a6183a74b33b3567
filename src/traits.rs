use crate::Vector;

/// Implements collect to `Vector`.
pub trait VectorIterator: Iterator {
    /// Collects into a `Vector` sized to the lower bound of `size_hint`, growing by
    /// doubling past it.
    fn collect_vector(self) -> Vector<Self::Item>;

    /// Collects the `Ok` values, stopping at the first `Err` and returning it. Values
    /// collected before the error are dropped.
    fn collect_result_vector<I, E>(self) -> Result<Vector<I>, E>
        where
            Self: Iterator<Item=Result<I, E>>;
}

impl<Q: Iterator> VectorIterator for Q {
    fn collect_vector(self) -> Vector<Self::Item> {
        let (lower, _) = self.size_hint();
        let mut vector = Vector::with_capacity(lower);
        for item in self {
            vector.push_back(item);
        }
        vector
    }

    fn collect_result_vector<I, E>(self) -> Result<Vector<I>, E>
        where
            Self: Iterator<Item=Result<I, E>>
    {
        let (lower, _) = self.size_hint();
        let mut vector = Vector::with_capacity(lower);
        for mi in self {
            let i = mi?;
            vector.push_back(i);
        }
        Ok(vector)
    }
}
