//! Empty-body policy.
//!
//! Some responses legitimately carry no body (`204 No Content`,
//! `205 Reset Content`). [`EmptyBodyPolicy`] decides, from the status code,
//! whether a missing or zero-length body is a valid empty result or an error.
//! Every serializer consults its policy the same way.

use std::collections::BTreeSet;

/// Status codes whose responses may have an empty body by default.
pub const DEFAULT_EMPTY_STATUS_CODES: [u16; 2] = [204, 205];

/// Returns `true` when an empty body is acceptable for `status` under the
/// default policy.
///
/// Only zero-length bodies are gated: a non-empty body always decodes
/// normally, so `body_len > 0` yields `false`.
///
/// ```
/// use pincer_response::is_empty_body_allowed;
///
/// assert!(is_empty_body_allowed(204, 0));
/// assert!(is_empty_body_allowed(205, 0));
/// assert!(!is_empty_body_allowed(200, 0));
/// ```
#[must_use]
pub fn is_empty_body_allowed(status: u16, body_len: usize) -> bool {
    body_len == 0 && DEFAULT_EMPTY_STATUS_CODES.contains(&status)
}

/// Allow-list of status codes for which an empty body is a valid response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyBodyPolicy {
    status_codes: BTreeSet<u16>,
}

impl Default for EmptyBodyPolicy {
    fn default() -> Self {
        Self::from_status_codes(DEFAULT_EMPTY_STATUS_CODES)
    }
}

impl EmptyBodyPolicy {
    /// Create a new policy builder, starting from the default status codes.
    #[must_use]
    pub fn builder() -> EmptyBodyPolicyBuilder {
        EmptyBodyPolicyBuilder::default()
    }

    /// Create a policy allowing exactly the given status codes.
    #[must_use]
    pub fn from_status_codes(codes: impl IntoIterator<Item = u16>) -> Self {
        Self {
            status_codes: codes.into_iter().collect(),
        }
    }

    /// The allowed status codes, in ascending order.
    pub fn status_codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.status_codes.iter().copied()
    }

    /// Returns `true` when a body of `body_len` bytes may be treated as an
    /// empty result for `status`.
    #[must_use]
    pub fn is_empty_body_allowed(&self, status: u16, body_len: usize) -> bool {
        body_len == 0 && self.status_codes.contains(&status)
    }

    /// Same as [`Self::is_empty_body_allowed`] for an optional status.
    ///
    /// Without a status there is nothing to justify an empty body.
    #[must_use]
    pub fn allows(&self, status: Option<u16>, body_len: usize) -> bool {
        status.is_some_and(|status| self.is_empty_body_allowed(status, body_len))
    }
}

/// Builder for [`EmptyBodyPolicy`].
#[derive(Debug, Clone)]
pub struct EmptyBodyPolicyBuilder {
    status_codes: BTreeSet<u16>,
}

impl Default for EmptyBodyPolicyBuilder {
    fn default() -> Self {
        Self {
            status_codes: DEFAULT_EMPTY_STATUS_CODES.into_iter().collect(),
        }
    }
}

impl EmptyBodyPolicyBuilder {
    /// Allow an empty body for `status`.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status_codes.insert(status);
        self
    }

    /// Allow an empty body for every status in `codes`.
    #[must_use]
    pub fn statuses(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.status_codes.extend(codes);
        self
    }

    /// Stop allowing an empty body for `status`.
    #[must_use]
    pub fn without_status(mut self, status: u16) -> Self {
        self.status_codes.remove(&status);
        self
    }

    /// Build the policy.
    #[must_use]
    pub fn build(self) -> EmptyBodyPolicy {
        EmptyBodyPolicy {
            status_codes: self.status_codes,
        }
    }
}

/// Value for endpoints that return no content.
///
/// Use it as the target of a [`DecodableSerializer`](crate::DecodableSerializer)
/// when the response body is expected to be empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Empty;
