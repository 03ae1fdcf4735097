// src/engine/outcome.rs
use serde::{Deserialize, Serialize};

/// What a combinator resolves to: the error-first pair `(error, value)`.
///
/// `value` is `None` when the input was empty or, for `serial`, when a
/// task failed. `parallel` and `map` keep their slots even when `error`
/// is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome<V, E> {
    pub error: Option<E>,
    pub value: Option<V>,
}

impl<V, E> Outcome<V, E> {
    /// Outcome of a combinator given nothing to run
    pub fn empty() -> Self {
        Self {
            error: None,
            value: None,
        }
    }

    pub fn success(value: V) -> Self {
        Self {
            error: None,
            value: Some(value),
        }
    }

    pub fn failure(error: E) -> Self {
        Self {
            error: Some(error),
            value: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Split into the `(error, value)` pair
    pub fn into_parts(self) -> (Option<E>, Option<V>) {
        (self.error, self.value)
    }

    /// Convert into a `Result`, dropping any partial value when an error is set
    pub fn into_result(self) -> Result<Option<V>, E> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }

    /// Transform the value, keeping the error as is
    pub fn map_value<U>(self, f: impl FnOnce(V) -> U) -> Outcome<U, E> {
        Outcome {
            error: self.error,
            value: self.value.map(f),
        }
    }
}

impl<V, E> Default for Outcome<V, E> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        let ok: Outcome<u8, &str> = Outcome::success(1);
        assert_eq!(ok.into_result(), Ok(Some(1)));

        let partial = Outcome {
            error: Some("error"),
            value: Some(vec![Some(1), None]),
        };
        assert_eq!(partial.into_result(), Err("error"));

        let empty: Outcome<u8, &str> = Outcome::default();
        assert_eq!(empty.into_result(), Ok(None));
    }

    #[test]
    fn test_map_value_keeps_error() {
        let partial: Outcome<Vec<Option<u8>>, &str> = Outcome {
            error: Some("error"),
            value: Some(vec![Some(1), None]),
        };
        let mapped = partial.map_value(|slots| slots.into_iter().flatten().count());
        assert_eq!(mapped.into_parts(), (Some("error"), Some(1)));

        let empty: Outcome<u8, &str> = Outcome::empty();
        assert_eq!(empty.map_value(|v| v + 1), Outcome::empty());
    }

    #[test]
    fn test_serializes_like_callback_arguments() {
        let outcome: Outcome<Vec<Option<String>>, String> = Outcome {
            error: Some("error".to_string()),
            value: Some(vec![Some("test1".to_string()), None]),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({"error": "error", "value": ["test1", null]}));
    }
}
