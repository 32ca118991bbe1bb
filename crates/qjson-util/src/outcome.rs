//! A move-only result-or-error container, modeled after `std::expected<T, E>`
//! in the original implementation this crate's logic is derived from.
//!
//! `std::result::Result` already has this shape, but the original design
//! calls out borrowing accessors and a consuming extractor as first-class
//! operations distinct from pattern matching, so `Outcome` wraps `Result`
//! and exposes that vocabulary directly rather than asking every call site
//! to `match` or reach for the `?` operator.

/// Holds exactly one of a value of type `T` or an error of type `E`.
///
/// `Outcome` does not implement `Copy` or `Clone` on purpose: every fallible
/// core operation returns one, and surrounding code must consume it (check
/// it, extract from it, or convert it) rather than silently duplicate or
/// drop it.
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome<T, E> {
    inner: Result<T, E>,
}

impl<T, E> Outcome<T, E> {
    /// Build an outcome holding a value.
    pub fn from_value(value: T) -> Self {
        Self { inner: Ok(value) }
    }

    /// Build an outcome holding an error.
    pub fn from_error(error: E) -> Self {
        Self { inner: Err(error) }
    }

    pub fn has_value(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn has_error(&self) -> bool {
        self.inner.is_err()
    }

    /// Borrow the held value.
    ///
    /// # Panics
    /// Panics if this outcome holds an error.
    pub fn value(&self) -> &T {
        match &self.inner {
            Ok(value) => value,
            Err(_) => panic!("Outcome::value called on an error outcome"),
        }
    }

    /// Borrow the held error.
    ///
    /// # Panics
    /// Panics if this outcome holds a value.
    pub fn error(&self) -> &E {
        self.inner.as_ref().err().expect("Outcome::error called on a value outcome")
    }

    /// Consume the outcome and take ownership of the value.
    ///
    /// # Panics
    /// Panics if this outcome holds an error.
    pub fn consume_value(self) -> T {
        match self.inner {
            Ok(value) => value,
            Err(_) => panic!("Outcome::consume_value called on an error outcome"),
        }
    }

    /// Consume the outcome and take ownership of the error.
    ///
    /// # Panics
    /// Panics if this outcome holds a value.
    pub fn consume_error(self) -> E {
        self.inner.err().expect("Outcome::consume_error called on a value outcome")
    }

    /// Consume the outcome, returning the value or a supplied default.
    pub fn value_or(self, default: T) -> T {
        self.inner.unwrap_or(default)
    }

    /// Convert into a plain `Result`, for interop with `?`-using call sites.
    pub fn into_result(self) -> Result<T, E> {
        self.inner
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(inner: Result<T, E>) -> Self {
        Self { inner }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_outcome_reports_has_value() {
        let o: Outcome<i32, &str> = Outcome::from_value(42);
        assert!(o.has_value());
        assert!(!o.has_error());
        assert_eq!(*o.value(), 42);
    }

    #[test]
    fn error_outcome_reports_has_error() {
        let o: Outcome<i32, &str> = Outcome::from_error("bad");
        assert!(o.has_error());
        assert!(!o.has_value());
        assert_eq!(*o.error(), "bad");
    }

    #[test]
    fn consume_value_takes_ownership() {
        let o: Outcome<String, &str> = Outcome::from_value("hi".to_string());
        assert_eq!(o.consume_value(), "hi");
    }

    #[test]
    fn value_or_falls_back_on_error() {
        let o: Outcome<i32, &str> = Outcome::from_error("bad");
        assert_eq!(o.value_or(7), 7);
    }

    #[test]
    #[should_panic(expected = "error outcome")]
    fn value_panics_on_error_outcome() {
        let o: Outcome<i32, &str> = Outcome::from_error("bad");
        o.value();
    }

    #[test]
    fn structural_equality() {
        let a: Outcome<i32, &str> = Outcome::from_value(1);
        let b: Outcome<i32, &str> = Outcome::from_value(1);
        assert_eq!(a, b);
    }
}
