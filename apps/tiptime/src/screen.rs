//! # Tip Screen Controller
//!
//! Headless version of the tip screen: the host forwards input events here
//! and renders [`ScreenState`].
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Host Event               Controller              Effect                │
//! │  ──────────               ──────────              ──────                │
//! │                                                                         │
//! │  Type in cost ──────────► set_cost() ───────────► cost_input           │
//! │  Pick 15/18/20 ─────────► select_percentage() ──► selected             │
//! │  Toggle switch ─────────► set_round_up() ───────► round_up             │
//! │  Tap Calculate ─────────► calculate() ──────────► result_text          │
//! │                                                   + save (cost > 0)    │
//! │  Press Enter ───────────► handle_key() ─────────► hide keyboard        │
//! │                                                                         │
//! │  Screen visible ────────► start() ──────────────► restore from store   │
//! │  Screen hidden ─────────► stop() ───────────────► drop subscription    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stored values overwrite the controls whenever a snapshot arrives; the
//! newest snapshot wins over anything the user toggled since.

use futures_util::StreamExt;
use tiptime_core::validation::parse_cost;
use tiptime_core::{calculate_tip, CurrencyFormat, TipPercentage, TipResult};
use tiptime_prefs::InputPreferences;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::state::{ScreenState, SharedScreenState};

// =============================================================================
// Keys
// =============================================================================

/// Keys the cost field forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

// =============================================================================
// Subscription
// =============================================================================

/// A running preference subscription. Dropping it cancels the task.
struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    fn spawn(prefs: &InputPreferences, state: SharedScreenState) -> Self {
        let mut updates = prefs.observe_input();

        let task = tokio::spawn(async move {
            while let Some(item) = updates.next().await {
                match item {
                    Ok(snapshot) => {
                        debug!(?snapshot, "Restoring input preferences");
                        state.write().await.apply_snapshot(&snapshot);
                    }
                    Err(err) => {
                        error!(%err, "Input preference subscription failed");
                        break;
                    }
                }
            }
        });

        Subscription { task }
    }

    fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The tip screen.
pub struct TipScreen {
    state: SharedScreenState,
    prefs: InputPreferences,
    currency: CurrencyFormat,
    subscription: Option<Subscription>,
}

impl TipScreen {
    pub fn new(prefs: InputPreferences, currency: CurrencyFormat) -> Self {
        TipScreen {
            state: ScreenState::default().shared(),
            prefs,
            currency,
            subscription: None,
        }
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn preferences(&self) -> &InputPreferences {
        &self.prefs
    }

    /// Copy of what the screen currently shows.
    pub async fn state(&self) -> ScreenState {
        self.state.read().await.clone()
    }

    // =========================================================================
    // Input Events
    // =========================================================================

    pub async fn set_cost(&self, text: impl Into<String>) {
        self.state.write().await.cost_input = text.into();
    }

    pub async fn select_percentage(&self, percentage: TipPercentage) {
        self.state.write().await.selected = percentage;
    }

    pub async fn set_round_up(&self, round_up: bool) {
        self.state.write().await.round_up = round_up;
    }

    /// The cost field gained focus.
    pub async fn focus_cost_input(&self) {
        self.state.write().await.keyboard_visible = true;
    }

    /// Computes the tip and updates the result label.
    ///
    /// The current options are saved only when the cost is a positive
    /// number; the save does not block the label update.
    pub async fn calculate(&self) -> TipResult {
        let mut state = self.state.write().await;

        let result = calculate_tip(&state.cost_input, state.selected, state.round_up);
        let billable = matches!(parse_cost(&state.cost_input), Ok(cost) if cost > 0.0);

        if billable {
            self.prefs.save(state.selected, state.round_up);
        } else {
            debug!(cost = %state.cost_input, "No billable cost, preferences not saved");
        }

        state.result_text = result.display_text(&self.currency);
        result
    }

    /// Handles a key from the cost field. Returns whether it was consumed.
    pub async fn handle_key(&self, key: Key) -> bool {
        match key {
            Key::Enter => {
                self.state.write().await.keyboard_visible = false;
                true
            }
            Key::Backspace | Key::Char(_) => false,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Subscribes to stored preferences. No-op while a subscription is
    /// live; one that ended on an error is replaced.
    pub fn start(&mut self) {
        if self.is_subscribed() {
            return;
        }
        info!(store = %self.prefs.store().name(), "Tip screen started");
        self.subscription = Some(Subscription::spawn(&self.prefs, self.state.clone()));
    }

    /// Cancels the subscription; `start` subscribes afresh.
    pub fn stop(&mut self) {
        if self.subscription.take().is_some() {
            info!("Tip screen stopped");
        }
    }

    pub fn is_started(&self) -> bool {
        self.subscription.is_some()
    }

    /// True while the subscription is still receiving snapshots.
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .map(|sub| !sub.is_finished())
            .unwrap_or(false)
    }
}
