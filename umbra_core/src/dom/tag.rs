// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag-name canonicalization.

use alloc::string::String;

/// Query-layer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomConfig {
    /// Prefix prepended to every tag name.
    pub namespace: &'static str,
    /// `(platform name, canonical name)` pairs applied before prefixing.
    pub aliases: &'static [(&'static str, &'static str)],
}

impl DomConfig {
    /// React Native tag names: Android-specific component names map to their
    /// cross-platform equivalents, and every name gets the `RN:` prefix.
    pub const REACT_NATIVE: Self = Self {
        namespace: "RN:",
        aliases: &[("AndroidTextInput", "TextInput"), ("AndroidSwitch", "Switch")],
    };

    /// A configuration with the given prefix and no aliases.
    #[must_use]
    pub const fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            aliases: &[],
        }
    }

    /// Replaces the alias table.
    #[must_use]
    pub const fn with_aliases(mut self, aliases: &'static [(&'static str, &'static str)]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Maps a platform component name to its canonical name.
    #[must_use]
    pub fn canonical_name<'n>(&self, component_name: &'n str) -> &'n str {
        self.aliases
            .iter()
            .find(|(platform, _)| *platform == component_name)
            .map_or(component_name, |&(_, canonical)| canonical)
    }

    /// Returns the DOM tag name for a component name.
    #[must_use]
    pub fn tag_name(&self, component_name: &str) -> String {
        let canonical = self.canonical_name(component_name);
        let mut name = String::with_capacity(self.namespace.len() + canonical.len());
        name.push_str(self.namespace);
        name.push_str(canonical);
        name
    }
}

impl Default for DomConfig {
    fn default() -> Self {
        Self::REACT_NATIVE
    }
}
