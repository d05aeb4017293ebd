//! Secret string with closure-scoped access and memory zeroization.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string whose contents are zeroed on drop and never printed.
///
/// The value can only be read inside a closure passed to
/// [`expose`](SecretString::expose), which keeps accidental copies out of
/// logs, `Debug` output, and error messages.
///
/// ```
/// use purgeflow_credential::SecretString;
///
/// let secret = SecretString::new("session-token");
/// assert_eq!(secret.expose(str::len), 13);
/// assert_eq!(format!("{secret:?}"), "[REDACTED]");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    /// Wrap a string value.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Run `f` against the secret value. The borrow cannot escape the
    /// closure, so the secret stays confined to the call site.
    pub fn expose<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        f(&self.inner)
    }

    /// Whether the secret is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
