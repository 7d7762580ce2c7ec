use std::cmp::Ordering;

/// Extracts the ordering key from a stored value.
pub trait KeyOf<V> {
    type Key: ?Sized;

    fn key(value: &V) -> &Self::Key;
}

/// Set-like trees: the value is its own key.
pub struct Identity;

impl<V> KeyOf<V> for Identity {
    type Key = V;

    fn key(value: &V) -> &V {
        value
    }
}

/// Map-like trees: values are `(key, mapped)` pairs ordered by the key.
pub struct First;

impl<K, T> KeyOf<(K, T)> for First {
    type Key = K;

    fn key(value: &(K, T)) -> &K {
        &value.0
    }
}

/// Three-way key comparison. Must be a strict weak order; a comparator that is
/// not gives unspecified (but memory-safe) orderings.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Ascending order by `Ord`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Descending order by `Ord`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Comparator backed by a closure.
#[derive(Clone, Copy, Debug)]
pub struct ByFn<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for ByFn<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}
