//! Platform identities and bootstrap ordering.

use serde::{Deserialize, Serialize};

/// Name of the desktop fallback platform.
///
/// Unlike every other platform, `pc` cannot be probed from device
/// capabilities at runtime, so its bootstrap registration must come after
/// all detectable platforms.
pub const FALLBACK_PLATFORM: &str = "pc";

/// A named target runtime environment.
///
/// Platforms are enumerated from the addon registry and carry identity
/// only; capability interfaces live with the addons themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Platform name as registered by its addon.
    pub name: String,
}

impl Platform {
    /// Creates a platform with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns true if this is the desktop fallback platform.
    pub fn is_fallback(&self) -> bool {
        self.name == FALLBACK_PLATFORM
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Orders platforms for bootstrap registration.
///
/// The order is stable, except that every fallback entry moves to the end;
/// the relative order of all other platforms is preserved.
pub fn boot_order(platforms: &[Platform]) -> Vec<&Platform> {
    let mut ordered: Vec<&Platform> = Vec::with_capacity(platforms.len());
    ordered.extend(platforms.iter().filter(|p| !p.is_fallback()));
    ordered.extend(platforms.iter().filter(|p| p.is_fallback()));
    ordered
}
