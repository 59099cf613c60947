//! Browser automation steps and page-readiness conditions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A wire-format duration, split into whole seconds and nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeout {
    /// Whole seconds.
    pub secs: u64,
    /// Nanosecond remainder.
    pub nanos: u32,
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Self {
            secs: d.as_secs(),
            nanos: d.subsec_nanos(),
        }
    }
}

/// Wait until the network has been idle for the given window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdleNetwork {
    /// How long the network must stay quiet.
    pub timeout: Timeout,
}

/// Wait until a CSS selector appears, up to a deadline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selector {
    /// The deadline for the selector to appear.
    pub timeout: Timeout,
    /// The CSS selector to wait for.
    pub selector: String,
}

/// Wait for a fixed delay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delay {
    /// The delay to wait out.
    pub timeout: Timeout,
}

fn default_some_true() -> Option<bool> {
    Some(true)
}

/// Page-readiness conditions evaluated before a rendered page is captured.
///
/// Requires the `request` option to be `chrome` or `smart`. Conditions are
/// independent; any subset may be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitFor {
    /// Wait for an idle-network window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_network: Option<IdleNetwork>,
    /// Wait until a selector exists after scripts and network events ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
    /// Wait for the DOM to settle on a selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dom: Option<Selector>,
    /// Wait out a hard delay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<Delay>,
    /// Wait for page navigation to complete. Server default is true.
    #[serde(default = "default_some_true", skip_serializing_if = "Option::is_none")]
    pub page_navigations: Option<bool>,
}

/// One automated browser action, applied to a URL or URL path.
///
/// Requires the `request` option to be `chrome` or `smart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum PageAction {
    /// Evaluate a JavaScript snippet on the page.
    Evaluate {
        /// The code to evaluate.
        code: String,
    },
    /// Click the first element matching a selector.
    Click {
        /// The CSS selector to click.
        selector: String,
    },
    /// Wait for a fixed number of milliseconds.
    Wait {
        /// Milliseconds to wait.
        duration: u64,
    },
    /// Wait until the next navigation completes.
    WaitForNavigation,
    /// Wait until a selector appears.
    WaitFor {
        /// The CSS selector to wait for.
        selector: String,
    },
    /// Wait until a selector appears, then click it.
    WaitForAndClick {
        /// The CSS selector to wait for and click.
        selector: String,
    },
    /// Scroll horizontally by a pixel offset.
    ScrollX {
        /// Pixels to scroll by.
        pixels: i32,
    },
    /// Scroll vertically by a pixel offset.
    ScrollY {
        /// Pixels to scroll by.
        pixels: i32,
    },
    /// Fill an input element with a value.
    Fill {
        /// The CSS selector of the input.
        selector: String,
        /// The value to fill in.
        value: String,
    },
    /// Perform repeated infinite-scroll passes.
    InfiniteScroll {
        /// Number of scroll passes.
        times: u32,
    },
}

/// Automation steps keyed by URL or URL path.
pub type AutomationMap = HashMap<String, Vec<PageAction>>;

/// Raw JavaScript snippets keyed by URL or URL path.
pub type ExecutionScripts = HashMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_page_action_tagged_serialization() {
        let action = PageAction::Click {
            selector: "#load-more".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "Click", "selector": "#load-more"})
        );

        let unit = PageAction::WaitForNavigation;
        assert_eq!(
            serde_json::to_value(&unit).unwrap(),
            json!({"type": "WaitForNavigation"})
        );
    }

    #[test]
    fn test_page_action_round_trips_through_wire_names() {
        let value = json!({"type": "InfiniteScroll", "times": 3});
        let action: PageAction = serde_json::from_value(value).unwrap();
        assert_eq!(action, PageAction::InfiniteScroll { times: 3 });
    }

    #[test]
    fn test_wait_for_defaults_page_navigations_on_deserialize() {
        let wait: WaitFor = serde_json::from_value(json!({})).unwrap();
        assert_eq!(wait.page_navigations, Some(true));
    }

    #[test]
    fn test_wait_for_skips_unset_conditions() {
        let wait = WaitFor {
            delay: Some(Delay {
                timeout: Timeout { secs: 2, nanos: 0 },
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&wait).unwrap(),
            json!({"delay": {"timeout": {"secs": 2, "nanos": 0}}})
        );
    }

    #[test]
    fn test_timeout_from_duration() {
        let timeout = Timeout::from(Duration::from_millis(1500));
        assert_eq!(timeout.secs, 1);
        assert_eq!(timeout.nanos, 500_000_000);
    }
}
