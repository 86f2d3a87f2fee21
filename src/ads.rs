//! Advertisement script loading and slot registration

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::Result;

/// Element id the network script is injected under
pub const AD_SCRIPT_ELEMENT_ID: &str = "ad-network-script";

/// Where the ad network script lives and which publisher it serves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdConfig {
    pub script_url: String,
    pub client_id: Option<String>,
}

impl AdConfig {
    /// Script URL with the publisher id attached
    pub fn script_src(&self) -> String {
        match &self.client_id {
            Some(client) if self.script_url.contains('?') => format!("{}&client={}", self.script_url, client),
            Some(client) => format!("{}?client={}", self.script_url, client),
            None => self.script_url.clone(),
        }
    }
}

/// A place on a page that can hold an ad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSlot {
    pub slot_id: String,
    pub format: String,
    #[serde(default)]
    pub responsive: bool,
}

impl AdSlot {
    pub fn new(slot_id: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            format: "auto".to_string(),
            responsive: true,
        }
    }
}

/// The page that actually receives scripts and slots
pub trait ScriptHost: Send + Sync {
    fn inject_script(&self, element_id: &str, src: &str) -> Result<()>;

    fn register_slot(&self, slot: &AdSlot) -> Result<()>;
}

/// Escape text for use inside a double-quoted HTML attribute
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Host that renders the script tag and slot markup as HTML fragments
#[derive(Debug, Default)]
pub struct HtmlSnippetHost {
    fragments: Mutex<Vec<String>>,
}

impl HtmlSnippetHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything rendered so far, in order
    pub fn render(&self) -> String {
        self.fragments.lock().join("\n")
    }
}

impl ScriptHost for HtmlSnippetHost {
    fn inject_script(&self, element_id: &str, src: &str) -> Result<()> {
        self.fragments.lock().push(format!(
            r#"<script id="{}" async src="{}" crossorigin="anonymous"></script>"#,
            escape_attr(element_id),
            escape_attr(src)
        ));
        Ok(())
    }

    fn register_slot(&self, slot: &AdSlot) -> Result<()> {
        self.fragments.lock().push(format!(
            r#"<ins class="ad-slot" data-ad-slot="{}" data-ad-format="{}" data-full-width-responsive="{}"></ins>"#,
            escape_attr(&slot.slot_id),
            escape_attr(&slot.format),
            slot.responsive
        ));
        Ok(())
    }
}

/// Loads the ad network once, then registers slots against it
pub struct AdLoader {
    config: AdConfig,
    host: Arc<dyn ScriptHost>,
    initialized: Mutex<bool>,
}

impl AdLoader {
    pub fn new(config: AdConfig, host: Arc<dyn ScriptHost>) -> Self {
        Self {
            config,
            host,
            initialized: Mutex::new(false),
        }
    }

    pub fn is_initialized(&self) -> bool {
        *self.initialized.lock()
    }

    /// Inject the network script unless already done; a failed injection can be retried
    pub fn ensure_initialized(&self) -> bool {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return true;
        }

        let src = self.config.script_src();
        match self.host.inject_script(AD_SCRIPT_ELEMENT_ID, &src) {
            Ok(()) => {
                *initialized = true;
                tracing::debug!(element_id = AD_SCRIPT_ELEMENT_ID, src = %src, "Ad script injected");
                true
            }
            Err(e) => {
                tracing::warn!(element_id = AD_SCRIPT_ELEMENT_ID, error = %e, "Failed to inject ad script");
                false
            }
        }
    }

    /// Fill a slot; failures are logged and reported as `false`
    pub fn place(&self, slot: &AdSlot) -> bool {
        if !self.ensure_initialized() {
            return false;
        }

        match self.host.register_slot(slot) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(slot = %slot.slot_id, error = %e, "Failed to register ad slot");
                false
            }
        }
    }
}
