use crate::raw::RawBuffer;
use crate::Vector;
use std::fmt;
use std::iter::{FromIterator, FusedIterator, Rev};
use std::ptr;
use std::slice;

impl<T> Vector<T> {
    /// Front-to-back view of the live values.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Back-to-front view of the live values.
    #[inline]
    pub fn iter_rev(&self) -> Rev<slice::Iter<'_, T>> {
        self.iter().rev()
    }

    #[inline]
    pub fn iter_rev_mut(&mut self) -> Rev<slice::IterMut<'_, T>> {
        self.iter_mut().rev()
    }
}

/// Owning iterator over the values of a `Vector`.
///
/// Values not consumed are dropped together with the iterator, which then frees
/// the buffer.
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    // live values are `[front, back)`
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// Values not yet yielded, in order.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` are live.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        // SAFETY: `index` was live and is no longer counted.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(index)) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: `back` was live and is no longer counted.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.back)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.back - self.front;
        trace!("drop {} unconsumed values", remaining);
        // SAFETY: `[front, back)` are live; the buffer is freed by `RawBuffer`.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.buf.as_ptr().add(self.front), remaining);
            self.front = self.back;
            ptr::drop_in_place(rest);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (buf, len) = self.into_raw_parts();
        IntoIter {
            buf,
            front: 0,
            back: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for Vector<T> {
    /// Starts from the iterator's lower size bound, then grows like `push_back`.
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Vector<T> {
        let items = items.into_iter();
        let (lower, _) = items.size_hint();
        let mut vector = Vector::with_capacity(lower);
        vector.extend(items);
        vector
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, items: I) {
        for item in items {
            self.push_back(*item);
        }
    }
}

#[cfg(test)]
mod iter_tests {
    use crate::dropflag::DropCounter;
    use crate::{vector, Vector};

    #[test]
    fn forward_and_reverse_views() {
        let v = vector![1, 2, 3];
        assert_eq!(vec![1, 2, 3], v.iter().copied().collect::<Vec<_>>());
        assert_eq!(vec![3, 2, 1], v.iter_rev().copied().collect::<Vec<_>>());
    }

    #[test]
    fn views_restart_from_their_end() {
        let v = vector!['a', 'b'];
        let mut first = v.iter();
        first.next();
        assert_eq!(Some(&'a'), v.iter().next());
        assert_eq!(Some(&'b'), v.iter_rev().next());
    }

    #[test]
    fn mutable_views() {
        let mut v = vector![1, 2, 3];
        for x in v.iter_mut() {
            *x *= 10;
        }
        let mut step = 0;
        for x in v.iter_rev_mut() {
            step += 1;
            *x += step;
        }
        assert_eq!(&[13, 22, 31], v.as_slice());
    }

    #[test]
    fn empty_views_yield_nothing() {
        let mut v = Vector::<u8>::with_capacity(4);
        assert_eq!(None, v.iter().next());
        assert_eq!(None, v.iter_rev().next());
        assert_eq!(None, v.iter_mut().next());
        assert_eq!(None, v.into_iter().next());
    }

    #[test]
    fn for_loops_over_references() {
        let mut v = vector![10, 20, 30];
        let mut sum = 0;
        for &x in &v {
            sum += x;
        }
        assert_eq!(60, sum);
        for x in &mut v {
            *x += 1;
        }
        assert_eq!(11, v[0]);
    }

    #[test]
    fn into_iter_from_both_ends() {
        let v = vector![String::from("a"), String::from("b"), String::from("c")];
        let mut items = v.into_iter();
        assert_eq!(3, items.len());
        assert_eq!(Some(String::from("c")), items.next_back());
        assert_eq!(Some(String::from("a")), items.next());
        assert_eq!(&["b"], items.as_slice());
        assert_eq!(Some(String::from("b")), items.next());
        assert_eq!(None, items.next());
        assert_eq!(None, items.next_back());
    }

    #[test]
    fn into_iter_drops_unconsumed_values() {
        let counter = DropCounter::new();
        let v: Vector<_> = (0..5).map(|i| counter.track(i)).collect();
        let mut items = v.into_iter();
        let first = items.next();
        assert_eq!(0, counter.dropped());
        std::mem::drop(items);
        assert_eq!(4, counter.dropped());
        std::mem::drop(first);
        assert_eq!(5, counter.dropped());
    }

    #[test]
    fn collect_presizes_from_hint() {
        let v: Vector<u32> = (0..7).collect();
        assert_eq!(7, v.capacity());
        let filtered: Vector<u32> = (0..7).filter(|x| x % 2 == 0).collect();
        assert_eq!(&[0, 2, 4, 6], filtered.as_slice());
        assert_eq!(4, filtered.capacity());
    }

    #[test]
    fn extend_by_value_and_reference() {
        let mut v = vector![1];
        v.extend(vec![2, 3]);
        v.extend(&[4, 5]);
        assert_eq!(&[1, 2, 3, 4, 5], v.as_slice());
        assert_eq!(8, v.capacity());
    }
}
