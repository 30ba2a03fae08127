//! The capability adapter: one operation surface keyed by the selected level.
//!
//! Gated operations compare the active level with the level they need.
//! Below it they either return [`CompatError::Unsupported`] (cipher suite
//! order) or a conservative answer (inaccessible-object classification).
//! Tag parsing and loopback resolution behave the same at every level.

use crate::cipher::CipherOrderTarget;
use crate::error::{self, CompatError};
use crate::level::{AvailabilityFlags, CapabilityLevel};
use crate::locale::{self, LocaleTag};
use crate::loopback::{self, NameResolver, SystemResolver};
use crate::messages::{self, MessageCatalog};
use serde::Serialize;
use std::error::Error;
use std::net::IpAddr;

/// Level needed to force the server's cipher suite order.
pub const CIPHER_ORDER_LEVEL: CapabilityLevel = CapabilityLevel::Level8;
/// Level at which inaccessible-object errors can occur.
pub const INACCESSIBLE_OBJECT_LEVEL: CapabilityLevel = CapabilityLevel::Level9;

/// Operations that fail with a catalog key below their level.
const GATED_OPERATIONS: &[(CapabilityLevel, &str)] = &[(
    CIPHER_ORDER_LEVEL,
    messages::NO_SERVER_CIPHER_SUITE_ORDER,
)];

#[derive(Clone, Debug)]
pub struct CompatAdapter {
    level: CapabilityLevel,
    availability: AvailabilityFlags,
    messages: MessageCatalog,
}

/// Serializable view of an adapter, emitted by `detect-compat`.
#[derive(Clone, Debug, Serialize)]
pub struct CompatSnapshot {
    pub level: CapabilityLevel,
    pub availability: AvailabilityFlags,
    pub loopback: Option<String>,
    pub unsupported: Vec<UnsupportedNotice>,
}

/// A gated operation the active level cannot perform, with its rendered text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UnsupportedNotice {
    pub key: &'static str,
    pub required: CapabilityLevel,
    pub message: String,
}

impl CompatAdapter {
    pub fn new(level: CapabilityLevel, messages: MessageCatalog) -> Self {
        Self {
            level,
            availability: AvailabilityFlags::for_level(level),
            messages,
        }
    }

    /// Adapter for `level` using the built-in message catalog.
    pub fn for_level(level: CapabilityLevel) -> Self {
        Self::new(level, MessageCatalog::builtin())
    }

    pub fn level(&self) -> CapabilityLevel {
        self.level
    }

    pub fn availability(&self) -> AvailabilityFlags {
        self.availability
    }

    pub fn is_level_available(&self, level: CapabilityLevel) -> bool {
        self.availability.is_available(level)
    }

    pub fn parse_locale_tag(&self, tag: &str) -> Option<LocaleTag> {
        locale::parse_locale_tag(tag)
    }

    /// Make `target` prefer the server's cipher suite order.
    ///
    /// Requires Level8. Below that the target is left untouched and the call
    /// fails with the `compat.noServerCipherSuiteOrder` key.
    pub fn set_server_cipher_suites_order<T>(
        &self,
        target: &mut T,
        prefer_server_order: bool,
    ) -> Result<(), CompatError>
    where
        T: CipherOrderTarget + ?Sized,
    {
        self.require(CIPHER_ORDER_LEVEL, messages::NO_SERVER_CIPHER_SUITE_ORDER)?;
        tracing::debug!(
            target_kind = %target.kind(),
            prefer_server_order,
            "applying cipher suite order preference"
        );
        target.use_server_cipher_suites_order(prefer_server_order);
        Ok(())
    }

    /// Whether `err` reports an object that could not be made accessible.
    ///
    /// Always false below Level9, where the condition cannot arise.
    pub fn is_inaccessible_object_error(&self, err: &(dyn Error + 'static)) -> bool {
        if !self.level.satisfies(INACCESSIBLE_OBJECT_LEVEL) {
            return false;
        }
        error::is_inaccessible_object(err)
    }

    /// Loopback address from the system resolver, or `None`.
    pub fn loopback_address(&self) -> Option<IpAddr> {
        self.loopback_address_with(&SystemResolver)
    }

    pub fn loopback_address_with(&self, resolver: &dyn NameResolver) -> Option<IpAddr> {
        loopback::loopback_address_with(resolver)
    }

    /// Snapshot including a loopback lookup, which may block on the resolver.
    pub fn snapshot(&self) -> CompatSnapshot {
        CompatSnapshot {
            level: self.level,
            availability: self.availability,
            loopback: self.loopback_address().map(|addr| addr.to_string()),
            unsupported: self.unsupported(),
        }
    }

    /// Gated operations that would fail at the active level.
    pub fn unsupported(&self) -> Vec<UnsupportedNotice> {
        GATED_OPERATIONS
            .iter()
            .filter(|(required, _)| !self.level.satisfies(*required))
            .map(|&(required, key)| UnsupportedNotice {
                key,
                required,
                message: self.messages.get(key),
            })
            .collect()
    }

    fn require(&self, required: CapabilityLevel, key: &'static str) -> Result<(), CompatError> {
        if self.level.satisfies(required) {
            return Ok(());
        }
        Err(CompatError::Unsupported {
            key,
            message: self.messages.get(key),
            required,
            active: self.level,
        })
    }
}
