mod macros;

/// Returns the version string reported by the binary and the http client.
pub fn inquiry_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use inquiry_utils::Apply;
    /// fn add_option(a: i32, b: Option<i32>) -> i32 {
    ///     a.apply_map(b, |slf, arg| slf + arg)
    /// }
    /// assert_eq!(add_option(1, None), 1);
    /// assert_eq!(add_option(1, Some(2)), 3);
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_map() {
        assert_eq!(1.apply_map(Some(2), |x, y| x + y), 3);
        assert_eq!(1.apply_map(None::<i32>, |x, y| x + y), 1);
    }

    #[test]
    fn assert_matches_pass() {
        let result: Result<u8, &str> = Ok(4);
        crate::assert_matches!(result, Ok(4));
        crate::assert_matches!(result, Ok(x) if *x > 3);
    }

    #[test]
    #[should_panic(expected = "did not match pattern")]
    fn assert_matches_fail() {
        let result: Result<u8, &str> = Err("nope");
        crate::assert_matches!(result, Ok(_));
    }
}
