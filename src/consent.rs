//! Cookie consent preferences
//!
//! Preferences are stored as one JSON object under [`CONSENT_STORAGE_KEY`].
//! Essential cookies are always allowed and cannot be switched off.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Result, ToolkitError};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized preferences
pub const CONSENT_STORAGE_KEY: &str = "cookie_consent";

/// Cookie categories a visitor can decide on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    Essential,
    Analytics,
    Marketing,
    Preferences,
}

impl ConsentCategory {
    pub const ALL: [ConsentCategory; 4] = [
        ConsentCategory::Essential,
        ConsentCategory::Analytics,
        ConsentCategory::Marketing,
        ConsentCategory::Preferences,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            ConsentCategory::Essential => "Required for the site to work",
            ConsentCategory::Analytics => "Help us understand how the site is used",
            ConsentCategory::Marketing => "Allow personalised advertising",
            ConsentCategory::Preferences => "Remember your settings between visits",
        }
    }
}

impl std::fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsentCategory::Essential => write!(f, "essential"),
            ConsentCategory::Analytics => write!(f, "analytics"),
            ConsentCategory::Marketing => write!(f, "marketing"),
            ConsentCategory::Preferences => write!(f, "preferences"),
        }
    }
}

/// A visitor's cookie decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPreferences {
    #[serde(default = "always_true")]
    pub essential: bool,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub marketing: bool,
    #[serde(default)]
    pub preferences: bool,
}

fn always_true() -> bool {
    true
}

impl Default for ConsentPreferences {
    fn default() -> Self {
        Self::essential_only()
    }
}

impl ConsentPreferences {
    pub fn essential_only() -> Self {
        Self {
            essential: true,
            analytics: false,
            marketing: false,
            preferences: false,
        }
    }

    pub fn all() -> Self {
        Self {
            essential: true,
            analytics: true,
            marketing: true,
            preferences: true,
        }
    }

    pub fn allows(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Essential => true,
            ConsentCategory::Analytics => self.analytics,
            ConsentCategory::Marketing => self.marketing,
            ConsentCategory::Preferences => self.preferences,
        }
    }

    /// Force the essential flag back on
    fn sanitized(mut self) -> Self {
        self.essential = true;
        self
    }
}

/// Reads and writes consent decisions through a [`KeyValueStore`]
pub struct ConsentManager {
    store: Arc<dyn KeyValueStore>,
}

impl ConsentManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved preferences, or `None` when the visitor has not decided yet.
    ///
    /// Unreadable or malformed entries count as undecided.
    pub fn load(&self) -> Option<ConsentPreferences> {
        let value = match self.store.get(CONSENT_STORAGE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = CONSENT_STORAGE_KEY, error = %e, "Failed to read consent preferences");
                return None;
            }
        };

        match serde_json::from_value::<ConsentPreferences>(value) {
            Ok(prefs) => Some(prefs.sanitized()),
            Err(e) => {
                tracing::warn!(key = CONSENT_STORAGE_KEY, error = %e, "Ignoring malformed consent preferences");
                None
            }
        }
    }

    /// Effective preferences: saved ones, else essential only
    pub fn current(&self) -> ConsentPreferences {
        self.load().unwrap_or_default()
    }

    /// Whether the consent banner still needs an answer
    pub fn has_decided(&self) -> bool {
        self.load().is_some()
    }

    pub fn allows(&self, category: ConsentCategory) -> bool {
        self.current().allows(category)
    }

    pub fn save(&self, prefs: ConsentPreferences) -> Result<ConsentPreferences> {
        let prefs = prefs.sanitized();
        let value = serde_json::to_value(prefs)?;
        self.store
            .set(CONSENT_STORAGE_KEY, value)
            .map_err(|e| ToolkitError::storage(CONSENT_STORAGE_KEY, e))?;

        tracing::info!(
            analytics = prefs.analytics,
            marketing = prefs.marketing,
            preferences = prefs.preferences,
            "Consent preferences saved"
        );
        Ok(prefs)
    }

    pub fn accept_all(&self) -> Result<ConsentPreferences> {
        self.save(ConsentPreferences::all())
    }

    pub fn reject_optional(&self) -> Result<ConsentPreferences> {
        self.save(ConsentPreferences::essential_only())
    }

    /// Change one category; essential cannot be changed
    pub fn set(&self, category: ConsentCategory, allowed: bool) -> Result<ConsentPreferences> {
        let mut prefs = self.current();
        match category {
            ConsentCategory::Essential => {
                return Err(ToolkitError::invalid_input("Essential cookies cannot be disabled"));
            }
            ConsentCategory::Analytics => prefs.analytics = allowed,
            ConsentCategory::Marketing => prefs.marketing = allowed,
            ConsentCategory::Preferences => prefs.preferences = allowed,
        }
        self.save(prefs)
    }

    /// Forget the decision so the banner shows again
    pub fn reset(&self) -> Result<()> {
        self.store
            .remove(CONSENT_STORAGE_KEY)
            .map_err(|e| ToolkitError::storage(CONSENT_STORAGE_KEY, e))
    }
}
