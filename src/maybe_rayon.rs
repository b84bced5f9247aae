//! Runs independent per-day work on rayon's thread pool when the `parallel`
//! feature is enabled, and on the calling thread otherwise.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies `f` to every item, returning the results in input order.
pub(crate) fn map_in_order<T, R, F>(items: Vec<T>, f: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        items.into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.into_iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_in_order_keeps_order() {
        let items: Vec<u64> = (0..5000).collect();
        let squares = map_in_order(items, |i| i * i);
        assert_eq!(squares.len(), 5000);
        assert!(squares.iter().enumerate().all(|(i, &v)| v == (i * i) as u64));
    }

    #[test]
    fn test_map_in_order_empty() {
        let out: Vec<u8> = map_in_order(Vec::<u8>::new(), |x| x);
        assert!(out.is_empty());
    }
}
