//! Secure-channel targets whose cipher suite order can be controlled.
//!
//! The adapter never builds secure channels itself. Callers hand it a
//! listening endpoint or a channel engine through [`CipherOrderTarget`] and
//! the adapter decides whether the host level allows the setting.

use std::fmt;

/// The two kinds of secure-channel objects that carry an order preference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SecureTargetKind {
    /// Passive endpoint accepting secure connections.
    Listener,
    /// Active engine driving a single secure channel.
    Engine,
}

impl fmt::Display for SecureTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecureTargetKind::Listener => f.write_str("listener"),
            SecureTargetKind::Engine => f.write_str("engine"),
        }
    }
}

pub trait CipherOrderTarget {
    fn kind(&self) -> SecureTargetKind;

    /// Apply the preference. `true` makes negotiation follow the server's
    /// suite order instead of the client's.
    fn use_server_cipher_suites_order(&mut self, prefer_server_order: bool);
}
