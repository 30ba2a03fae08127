//! Host capability ladder.
//!
//! The crate probes the host runtime once, picks the most capable
//! [`CapabilityLevel`] it supports, and exposes a single [`CompatAdapter`]
//! for the rest of the process. Operations the host cannot honor degrade to
//! an explicit [`CompatError`], a conservative answer, or a best-effort
//! value instead of failing in ways callers cannot anticipate.
//!
//! Most callers only need [`adapter`] and [`is_level_available`]. Embedders
//! that want a specific configuration call [`init`] before anything else
//! touches the adapter.

pub mod adapter;
pub mod cipher;
pub mod config;
pub mod error;
pub mod level;
pub mod locale;
pub mod loopback;
pub mod messages;
pub mod probe;
pub mod selector;

pub use adapter::{CompatAdapter, CompatSnapshot, UnsupportedNotice};
pub use cipher::{CipherOrderTarget, SecureTargetKind};
pub use config::{CompatConfig, MarkerTable};
pub use error::{CompatError, InaccessibleObjectError};
pub use level::{AvailabilityFlags, CapabilityLevel, UnknownLevel};
pub use locale::{LocaleTag, is_alpha, parse_locale_tag};
pub use loopback::{NameResolver, SystemResolver};
pub use messages::MessageCatalog;
pub use probe::{DynamicSymbols, HostFacilities, Probe};
pub use selector::{adapter, availability, init, is_level_available, select, select_level};
