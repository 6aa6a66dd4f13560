//! The game session: the context object the driving loop owns.
//!
//! [`GameSession`] wires one [`PetController`], one [`PetStore`] and the
//! player [`Inventory`] together. The (out-of-scope) UI layer calls
//! [`GameSession::tick`] once per frame, dispatches interactions through
//! [`GameSession::interact`], and reads stats via [`GameSession::pet`].
//! Saves happen after every successful interaction and on a periodic
//! autosave timer; a failed save is logged and retried at the next
//! cadence, never fatal.

use tracing::{info, warn};

use crate::catalog::{find_item, Inventory};
use crate::config::GameConfig;
use crate::controller::{Interaction, InteractionOutcome, PetController};
use crate::pet::PetRecord;
use crate::store::{open_store, PetStore};

/// Explicit process-wide game state: controller + store + inventory.
pub struct GameSession {
    controller: PetController,
    store: Box<dyn PetStore>,
    inventory: Inventory,
    autosave_interval_ms: u64,
    autosave_acc_ms: u64,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("pet", &self.controller.record().name)
            .field("inventory", &self.inventory.len())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Start a session from configuration: open the configured store
    /// (falling back to in-memory), resume the newest saved pet or create
    /// a fresh one, and persist it immediately so it has an id.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let store = open_store(&config.storage);
        Self::with_store(store, config)
    }

    /// Start a session on an already-open store. Used by tests and by
    /// drivers that construct their own backend.
    #[must_use]
    pub fn with_store(mut store: Box<dyn PetStore>, config: &GameConfig) -> Self {
        let mut record = match store.list_all().into_iter().next() {
            Some(existing) => {
                info!(name = %existing.name, id = ?existing.id, "resuming saved pet");
                existing
            }
            None => {
                info!(name = %config.game.pet_name, "creating new pet");
                PetRecord::new(config.game.pet_name.clone())
            }
        };
        if !store.save(&mut record) {
            warn!("initial save failed; continuing without persistence");
        }

        Self {
            controller: PetController::new(record),
            store,
            inventory: Inventory::new(),
            autosave_interval_ms: config.game.autosave_interval_ms,
            autosave_acc_ms: 0,
        }
    }

    /// Read-only stat snapshot for display.
    #[must_use]
    pub fn pet(&self) -> &PetRecord {
        self.controller.record()
    }

    /// The pet behavior engine.
    #[must_use]
    pub fn controller(&self) -> &PetController {
        &self.controller
    }

    /// The player's food inventory.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Advance game time by `elapsed_ms` and run the autosave timer.
    pub fn tick(&mut self, elapsed_ms: u64) {
        self.controller.advance_time(elapsed_ms);

        self.autosave_acc_ms += elapsed_ms;
        if self.autosave_acc_ms >= self.autosave_interval_ms {
            self.autosave_acc_ms = 0;
            self.save_now();
        }
    }

    /// Persist the current record. Returns `false` when the store failed;
    /// the next autosave will retry.
    pub fn save_now(&mut self) -> bool {
        let saved = self.store.save(self.controller.record_mut());
        if !saved {
            warn!("autosave failed, will retry at next cadence");
        }
        saved
    }

    /// Run one interaction; successful interactions are saved right away.
    pub fn interact(&mut self, interaction: Interaction) -> InteractionOutcome {
        let outcome = self.controller.interact(interaction);
        if outcome.success {
            self.save_now();
        }
        outcome
    }

    /// Buy a catalog item by name into the inventory. Fails closed on an
    /// unknown item, a full inventory, or not enough coins.
    pub fn buy_food(&mut self, name: &str) -> InteractionOutcome {
        let Some(item) = find_item(name) else {
            return InteractionOutcome {
                success: false,
                message: format!("The shop doesn't sell \"{name}\"."),
            };
        };
        if self.inventory.is_full() {
            return InteractionOutcome {
                success: false,
                message: "Inventory is full!".to_string(),
            };
        }
        if !self.controller.spend_coins(item.price) {
            return InteractionOutcome {
                success: false,
                message: format!("Not enough coins! {} costs {}.", item.name, item.price),
            };
        }
        if !self.inventory.add(item) {
            // Checked above, but refund rather than eat the coins if the
            // inventory filled in between.
            self.controller.refund_coins(item.price);
            return InteractionOutcome {
                success: false,
                message: "Inventory is full!".to_string(),
            };
        }
        self.save_now();
        InteractionOutcome {
            success: true,
            message: format!("Bought {}!", item.name),
        }
    }

    /// Feed the pet an item from the inventory slot at `index`.
    pub fn feed_from_inventory(&mut self, index: usize) -> InteractionOutcome {
        let Some(item) = self.inventory.take(index) else {
            return InteractionOutcome {
                success: false,
                message: "Nothing in that slot.".to_string(),
            };
        };
        let outcome = self.controller.interact(Interaction::Eat { item });
        if outcome.success {
            self.save_now();
        }
        outcome
    }
}
