//! Form tamper protection port.

/// A freshly issued anti-forgery pair.
///
/// The nonce travels in a cookie, the token in a hidden form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    pub nonce: String,
    pub token: String,
}

/// Issues and checks anti-forgery tokens for form submissions.
pub trait CsrfProtection: Send + Sync {
    /// Issue a new nonce/token pair.
    fn issue(&self) -> CsrfToken;

    /// Check that `token` was issued for `nonce`.
    fn verify(&self, nonce: &str, token: &str) -> bool;
}
