use crate::Result;

/// Aggregate shares in an MPC protocol
pub trait Aggregate<S>: Sized {
    /// Aggregate shares in an MPC protocol.
    fn from_shares<T>(iter: T) -> Result<Self>
    where
        T: IntoIterator<Item = S>;
}

impl<S, A> Aggregate<Result<S>> for A
where
    A: Aggregate<S>,
{
    fn from_shares<T>(iter: T) -> Result<Self>
    where
        T: IntoIterator<Item = Result<S>>,
    {
        A::from_shares(iter.into_iter().collect::<Result<Vec<_>>>()?)
    }
}

/// Perform aggregation directly on an iterator of shares.
///
/// The `aggregate` method is analogous to [`Iterator::collect`], with an
/// [`Aggregate`] bound instead of [`FromIterator`].
pub trait AggregateIter {
    /// The type of share being aggregated.
    type Share;

    /// Aggregate shares in an MPC protocol.
    fn aggregate<A>(self) -> Result<A>
    where
        A: Aggregate<Self::Share>;
}

impl<I: Iterator<Item = S>, S> AggregateIter for I {
    type Share = S;

    fn aggregate<A>(self) -> Result<A>
    where
        A: Aggregate<Self::Share>,
    {
        Aggregate::from_shares(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Aggregate, AggregateIter};
    use crate::{Error, Result};

    #[derive(Debug, PartialEq, Eq)]
    struct Product(u64);

    impl Aggregate<u64> for Product {
        fn from_shares<T>(iter: T) -> Result<Self>
        where
            T: IntoIterator<Item = u64>,
        {
            Ok(Product(iter.into_iter().product()))
        }
    }

    #[test]
    fn aggregate_iter_collects_shares() -> Result<()> {
        let product = vec![2u64, 3, 7].into_iter().aggregate::<Product>()?;
        assert_eq!(product, Product(42));
        Ok(())
    }

    #[test]
    fn aggregate_result_short_circuits() {
        let product = <Product as Aggregate<Result<u64>>>::from_shares(vec![
            Ok(2u64),
            Err(Error::SerializationError),
            Ok(3),
        ]);
        assert_eq!(product, Err(Error::SerializationError));
    }
}
