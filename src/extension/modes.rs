//! Runtime mode flags
//!
//! A small closed bitmask of the contexts this host can run in. The active
//! mode for a process is computed once during startup from configuration and
//! command line switches, and is immutable for the life of the process.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitmask of runtime contexts used to gate extension activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunMode(u32);

impl RunMode {
    /// No modes set. An extension gated on this can never activate.
    pub const NONE: RunMode = RunMode(0);
    /// Normal operation, serving real traffic.
    pub const PRODUCTION: RunMode = RunMode(1);
    /// Host development: meta and tooling extensions are wanted.
    pub const DEVELOPMENT: RunMode = RunMode(1 << 1);
    /// Extension development: debugging aids for extension authors.
    pub const PLUGIN_DEV: RunMode = RunMode(1 << 2);

    const NAMED: [(RunMode, &'static str); 3] = [
        (RunMode::PRODUCTION, "PRODUCTION"),
        (RunMode::DEVELOPMENT, "DEVELOPMENT"),
        (RunMode::PLUGIN_DEV, "PLUGIN_DEV"),
    ];

    const KNOWN_BITS: u32 = 0b111;

    /// Combine individual toggles into a mode mask.
    pub fn from_flags(production: bool, development: bool, plugin_dev: bool) -> RunMode {
        let mut mode = RunMode::NONE;
        if production {
            mode |= RunMode::PRODUCTION;
        }
        if development {
            mode |= RunMode::DEVELOPMENT;
        }
        if plugin_dev {
            mode |= RunMode::PLUGIN_DEV;
        }
        mode
    }

    /// Reconstruct a mode mask from raw bits. The set is closed: bits outside
    /// the known modes are discarded.
    pub const fn from_bits(bits: u32) -> RunMode {
        RunMode(bits & Self::KNOWN_BITS)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when any of `other`'s bits are set in this mask.
    pub const fn includes(self, other: RunMode) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_production(self) -> bool {
        self.includes(RunMode::PRODUCTION)
    }

    pub const fn is_development(self) -> bool {
        self.includes(RunMode::DEVELOPMENT)
    }

    pub const fn is_plugin_dev(self) -> bool {
        self.includes(RunMode::PLUGIN_DEV)
    }

    /// Names of the modes set in this mask, in fixed bit order.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(mode, _)| self.includes(*mode))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl Default for RunMode {
    /// The default gate for extensions that declare nothing.
    fn default() -> Self {
        RunMode::PRODUCTION
    }
}

impl BitOr for RunMode {
    type Output = RunMode;

    fn bitor(self, rhs: RunMode) -> RunMode {
        RunMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for RunMode {
    fn bitor_assign(&mut self, rhs: RunMode) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for RunMode {
    type Output = RunMode;

    fn bitand(self, rhs: RunMode) -> RunMode {
        RunMode(self.0 & rhs.0)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        write!(f, "{}", self.names().join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_values_are_fixed() {
        assert_eq!(RunMode::PRODUCTION.bits(), 1);
        assert_eq!(RunMode::DEVELOPMENT.bits(), 2);
        assert_eq!(RunMode::PLUGIN_DEV.bits(), 4);
    }

    #[test]
    fn from_flags_combines_bits() {
        let mode = RunMode::from_flags(true, false, true);
        assert!(mode.is_production());
        assert!(!mode.is_development());
        assert!(mode.is_plugin_dev());
        assert_eq!(mode.bits(), 0b101);

        assert!(RunMode::from_flags(false, false, false).is_empty());
    }

    #[test]
    fn from_bits_discards_unknown_bits() {
        let mode = RunMode::from_bits(0b1101);
        assert_eq!(mode.bits(), 0b101);
    }

    #[test]
    fn includes_is_any_overlap() {
        let mode = RunMode::PRODUCTION | RunMode::DEVELOPMENT;
        assert!(mode.includes(RunMode::PRODUCTION));
        assert!(mode.includes(RunMode::DEVELOPMENT));
        assert!(!mode.includes(RunMode::PLUGIN_DEV));
        assert!(mode.includes(RunMode::DEVELOPMENT | RunMode::PLUGIN_DEV));
        assert!(!RunMode::NONE.includes(mode));
    }

    #[test]
    fn names_follow_bit_order() {
        let mode = RunMode::PLUGIN_DEV | RunMode::PRODUCTION;
        assert_eq!(mode.names(), vec!["PRODUCTION", "PLUGIN_DEV"]);
        assert!(RunMode::NONE.names().is_empty());
    }

    #[test]
    fn display_joins_names() {
        assert_eq!(
            (RunMode::PRODUCTION | RunMode::DEVELOPMENT).to_string(),
            "PRODUCTION|DEVELOPMENT"
        );
        assert_eq!(RunMode::NONE.to_string(), "(none)");
    }

    #[test]
    fn default_is_production() {
        assert_eq!(RunMode::default(), RunMode::PRODUCTION);
    }
}
