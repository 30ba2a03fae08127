//! One-time level selection and the process-wide adapter.
//!
//! The global adapter is built on first access (or by an explicit [`init`])
//! inside a `OnceLock`, so concurrent first callers still see a single
//! selection. After that every accessor is a plain read.

use crate::adapter::CompatAdapter;
use crate::config::CompatConfig;
use crate::level::{AvailabilityFlags, CapabilityLevel};
use crate::probe::{DynamicSymbols, HostFacilities, Probe};
use std::sync::OnceLock;

static ADAPTER: OnceLock<CompatAdapter> = OnceLock::new();

/// Pick the most capable supported level.
///
/// Probes are evaluated most capable first regardless of the order given.
/// `Base` probes and probes above `max_level` are skipped. Falls back to
/// `Base` when nothing is supported.
pub fn select_level(
    probes: &[Probe],
    host: &dyn HostFacilities,
    max_level: Option<CapabilityLevel>,
) -> CapabilityLevel {
    let mut ordered: Vec<&Probe> = probes
        .iter()
        .filter(|probe| probe.level != CapabilityLevel::Base)
        .collect();
    ordered.sort_by(|a, b| b.level.cmp(&a.level));

    for probe in ordered {
        if let Some(ceiling) = max_level {
            if probe.level > ceiling {
                tracing::debug!(level = %probe.level, ceiling = %ceiling, "probe above ceiling skipped");
                continue;
            }
        }
        if probe.is_supported(host) {
            tracing::debug!(level = %probe.level, "probe supported");
            return probe.level;
        }
        tracing::debug!(level = %probe.level, "probe not supported");
    }

    CapabilityLevel::Base
}

/// Probe `host` with the configured ladder and build the matching adapter.
pub fn select(config: &CompatConfig, host: &dyn HostFacilities) -> CompatAdapter {
    let probes = config.markers.probes();
    let level = select_level(&probes, host, config.max_level);
    tracing::info!(level = %level, probes = probes.len(), "capability level selected");
    CompatAdapter::new(level, config.messages_or_builtin())
}

/// The process-wide adapter, selected from the environment on first use.
pub fn adapter() -> &'static CompatAdapter {
    ADAPTER.get_or_init(|| select(&CompatConfig::from_env_or_default(), &DynamicSymbols))
}

/// Select the process-wide adapter with an explicit configuration.
///
/// Only the first initialization takes effect; later calls return the
/// adapter that is already installed.
pub fn init(config: CompatConfig) -> &'static CompatAdapter {
    let mut installed_here = false;
    let adapter = ADAPTER.get_or_init(|| {
        installed_here = true;
        select(&config, &DynamicSymbols)
    });
    if !installed_here {
        tracing::debug!(level = %adapter.level(), "compat adapter already initialized; config ignored");
    }
    adapter
}

pub fn is_level_available(level: CapabilityLevel) -> bool {
    adapter().is_level_available(level)
}

pub fn availability() -> AvailabilityFlags {
    adapter().availability()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkerTable;
    use std::collections::BTreeSet;
    use std::io;

    struct FakeHost {
        symbols: BTreeSet<String>,
    }

    impl FakeHost {
        fn with(symbols: &[&str]) -> Self {
            Self {
                symbols: symbols.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl HostFacilities for FakeHost {
        fn has_symbol(&self, name: &str) -> io::Result<bool> {
            if name == "explodes" {
                return Err(io::Error::other("resolver exploded"));
            }
            Ok(self.symbols.contains(name))
        }
    }

    fn ladder() -> Vec<Probe> {
        vec![
            Probe::new(CapabilityLevel::Level9, ["m9"]),
            Probe::new(CapabilityLevel::Level8, ["m8"]),
            Probe::new(CapabilityLevel::Level7, ["m7"]),
            Probe::new(CapabilityLevel::Level6, ["m6"]),
        ]
    }

    #[test]
    fn selects_highest_supported_level() {
        let host = FakeHost::with(&["m6", "m7", "m8"]);
        assert_eq!(select_level(&ladder(), &host, None), CapabilityLevel::Level8);
    }

    #[test]
    fn first_supported_probe_wins_even_with_gaps() {
        let host = FakeHost::with(&["m9"]);
        assert_eq!(select_level(&ladder(), &host, None), CapabilityLevel::Level9);
    }

    #[test]
    fn falls_back_to_base() {
        let host = FakeHost::with(&[]);
        assert_eq!(select_level(&ladder(), &host, None), CapabilityLevel::Base);
        assert_eq!(select_level(&[], &host, None), CapabilityLevel::Base);
    }

    #[test]
    fn probe_order_does_not_depend_on_input_order() {
        let host = FakeHost::with(&["m6", "m7"]);
        let mut probes = ladder();
        probes.reverse();
        assert_eq!(select_level(&probes, &host, None), CapabilityLevel::Level7);
    }

    #[test]
    fn failing_probe_degrades_to_next_level() {
        let host = FakeHost::with(&["m6", "m7"]);
        let probes = vec![
            Probe::new(CapabilityLevel::Level9, ["explodes"]),
            Probe::new(CapabilityLevel::Level7, ["m7"]),
        ];
        assert_eq!(select_level(&probes, &host, None), CapabilityLevel::Level7);
    }

    #[test]
    fn ceiling_caps_selection() {
        let host = FakeHost::with(&["m6", "m7", "m8", "m9"]);
        assert_eq!(
            select_level(&ladder(), &host, Some(CapabilityLevel::Level7)),
            CapabilityLevel::Level7
        );
        assert_eq!(
            select_level(&ladder(), &host, Some(CapabilityLevel::Base)),
            CapabilityLevel::Base
        );
    }

    #[test]
    fn base_probes_are_ignored() {
        let host = FakeHost::with(&["anything"]);
        let probes = vec![Probe::new(CapabilityLevel::Base, ["anything"])];
        assert_eq!(select_level(&probes, &host, None), CapabilityLevel::Base);
    }

    #[test]
    fn select_builds_monotonic_adapter_from_config() {
        let config = CompatConfig {
            markers: MarkerTable {
                level6: vec!["m6".into()],
                level7: vec!["m7".into()],
                level8: vec!["m8".into(), "missing".into()],
                level9: vec!["m9".into()],
            },
            ..CompatConfig::default()
        };
        let host = FakeHost::with(&["m6", "m7", "m8"]);
        let adapter = select(&config, &host);
        assert_eq!(adapter.level(), CapabilityLevel::Level7);
        let flags = adapter.availability();
        assert!(flags.is_available(CapabilityLevel::Level6));
        assert!(flags.is_available(CapabilityLevel::Level7));
        assert!(!flags.is_available(CapabilityLevel::Level8));
        assert!(!flags.is_available(CapabilityLevel::Level9));
    }

    #[test]
    fn global_adapter_is_stable() {
        let first = adapter();
        let second = init(CompatConfig {
            max_level: Some(CapabilityLevel::Base),
            ..CompatConfig::default()
        });
        assert!(std::ptr::eq(first, second));
        for level in CapabilityLevel::ALL {
            assert_eq!(is_level_available(level), level <= first.level());
        }
        assert_eq!(availability(), first.availability());
    }
}
