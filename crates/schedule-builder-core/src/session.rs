//! Host wiring between the people store and the selection engine.
//!
//! The session loads the selected person's schedule into the engine, keeps
//! the engine disabled while nobody is selected, and writes every change the
//! engine publishes back to the store as a full replacement.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::warn;

use crate::availability::{ScheduleCollection, SelectionMode};
use crate::error::StoreError;
use crate::events::SlotChange;
use crate::people::EntityStore;
use crate::selection::SelectionEngine;

pub struct Session {
    store: Rc<RefCell<EntityStore>>,
    engine: SelectionEngine,
    /// Entity whose schedule the engine currently holds.
    loaded: Option<String>,
}

impl Session {
    pub fn new(store: EntityStore, mode: SelectionMode) -> Self {
        let store = Rc::new(RefCell::new(store));
        let mut engine = SelectionEngine::new(mode);

        let sink = Rc::clone(&store);
        engine.on_schedule_changed(move |slots| {
            if let Err(e) = sink.borrow_mut().replace_selected_schedule(slots.clone()) {
                warn!(error = %e, "schedule change not stored");
            }
        });

        let mut session = Self {
            store,
            engine,
            loaded: None,
        };
        session.sync_selection();
        session
    }

    pub fn store(&self) -> Ref<'_, EntityStore> {
        self.store.borrow()
    }

    /// Run a store mutation, then resync the engine with the selection.
    ///
    /// A gesture in progress survives unless the selection or the selected
    /// schedule changed underneath it.
    pub fn with_store_mut<R>(&mut self, f: impl FnOnce(&mut EntityStore) -> R) -> R {
        let result = f(&mut self.store.borrow_mut());
        self.sync_selection();
        result
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn select(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.borrow_mut().select(id)?;
        self.sync_selection();
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.store.borrow_mut().deselect();
        self.sync_selection();
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.engine.set_mode(mode);
    }

    pub fn pointer_down(&mut self, day: u8, time: u32) -> Option<SlotChange> {
        self.engine.pointer_down(day, time)
    }

    pub fn pointer_enter(&mut self, day: u8, time: u32) -> Option<SlotChange> {
        self.engine.pointer_enter(day, time)
    }

    pub fn pointer_up(&mut self) {
        self.engine.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.engine.pointer_leave();
    }

    /// Empty the selected person's schedule.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.store.borrow_mut().clear_selected_schedule()?;
        self.sync_selection();
        Ok(())
    }

    /// Tear down the engine and hand back the store.
    pub fn into_store(self) -> EntityStore {
        let Session { store, engine, .. } = self;
        drop(engine);
        match Rc::try_unwrap(store) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        }
    }

    fn sync_selection(&mut self) {
        let store = self.store.borrow();
        match store.selected() {
            Some(entity) => {
                let unchanged = self.loaded.as_deref() == store.selected_id()
                    && entity.schedule == *self.engine.schedule();
                if !unchanged {
                    self.engine.load_schedule(entity.schedule.clone());
                    self.loaded = Some(entity.id.clone());
                }
                self.engine.set_disabled(false);
            }
            None => {
                self.engine.load_schedule(ScheduleCollection::new());
                self.engine.set_disabled(true);
                self.loaded = None;
            }
        }
    }
}
