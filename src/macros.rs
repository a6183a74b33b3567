/// Builds a `Vector` from a literal list, like `vec!`.
///
/// `vector![a, b, c]` holds the listed values in exactly as many slots;
/// `vector![x; n]` holds `n` clones of `x`.
#[macro_export]
macro_rules! vector {
    () => (
        $crate::Vector::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::Vector::from_elem($n, $elem)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::Vector::from([$($x),+])
    );
}

#[cfg(test)]
mod macros_tests {
    use crate::{vector, Vector};

    #[test]
    fn empty_list() {
        let v: Vector<u8> = vector![];
        assert_eq!(0, v.capacity());
    }

    #[test]
    fn listed_values() {
        let v = vector![3, 1, 4, 1, 5,];
        assert_eq!(&[3, 1, 4, 1, 5], v.as_slice());
        assert_eq!(5, v.capacity());
    }

    #[test]
    fn repeated_value() {
        let v = vector![String::from("ab"); 3];
        assert_eq!(&["ab", "ab", "ab"], v.as_slice());
    }
}
