use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tiptime_core::{TipPercentage, DEFAULT_ROUND_UP, DEFAULT_TIP_PERCENTAGE};
use tiptime_prefs::InputSnapshot;
use tokio::sync::RwLock;

/// State shared between the controller and its subscription task.
pub type SharedScreenState = Arc<RwLock<ScreenState>>;

/// What the tip screen currently displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenState {
    /// Raw text of the cost field.
    pub cost_input: String,

    /// Selected tip option.
    pub selected: TipPercentage,

    /// Round-up switch.
    pub round_up: bool,

    /// Result label; empty until the first calculation.
    pub result_text: String,

    /// Whether the on-screen keyboard is showing.
    pub keyboard_visible: bool,
}

impl ScreenState {
    pub fn shared(self) -> SharedScreenState {
        Arc::new(RwLock::new(self))
    }

    /// Restores controls from stored input preferences.
    ///
    /// A missing tip option leaves the selection alone; a missing round-up
    /// flag turns the switch on.
    pub fn apply_snapshot(&mut self, snapshot: &InputSnapshot) {
        if let Some(percentage) = snapshot.tip_option {
            self.selected = percentage;
        }
        self.round_up = snapshot.is_round_up.unwrap_or(DEFAULT_ROUND_UP);
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        ScreenState {
            cost_input: String::new(),
            selected: DEFAULT_TIP_PERCENTAGE,
            round_up: DEFAULT_ROUND_UP,
            result_text: String::new(),
            keyboard_visible: false,
        }
    }
}
