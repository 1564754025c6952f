//! Strongly Typed Identifiers
//!
//! Newtype wrappers for the two key strings of the data model: user
//! logins and canonical group identifiers. The newtype pattern prevents
//! a login from being passed where a group id is expected.
//!
//! # Example
//!
//! ```
//! use rostersync_core::{GroupId, Login};
//!
//! let login = Login::new("jdoe");
//! let group = GroupId::new("finance");
//!
//! fn requires_login(login: &Login) -> String {
//!     login.to_string()
//! }
//!
//! let result = requires_login(&login);
//! // requires_login(&group); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Macro to define a strongly-typed string key
macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a key from an existing string.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Checks whether the key is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_key!(
    /// The unique login of a user, as carried by the roster export and
    /// used as the primary key in the directory.
    ///
    /// # Example
    ///
    /// ```
    /// use rostersync_core::Login;
    ///
    /// let login = Login::new("jdoe");
    /// assert_eq!(login.as_str(), "jdoe");
    /// ```
    Login
);

define_key!(
    /// A canonical group identifier: the normalized, machine-safe form
    /// of a raw group label (see [`crate::normalize`]).
    ///
    /// Directory-reported group names are wrapped as-is; roster labels
    /// must pass through normalization first so both sides compare on
    /// the same footing.
    GroupId
);
