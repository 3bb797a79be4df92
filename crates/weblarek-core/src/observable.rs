//! Observable model base.
//!
//! A [`Model`] owns a data snapshot and the bus it reports changes on.
//! Concrete state holders wrap a `Model` privately and expose mutation
//! operations that end in [`Model::announce`]; readers only ever get clones.

use serde::Serialize;
use std::cell::RefCell;

use crate::error::Result;
use crate::types::SharedBus;

/// Anything that reports its changes on an event bus
pub trait Observable {
    /// The bus this component announces on
    fn events(&self) -> &SharedBus;

    /// Emit `event` with `payload` on the bound bus
    ///
    /// Returns the number of handlers invoked. Mutators announce after
    /// writing, so an `Err` from them means the change was applied and an
    /// observer failed.
    fn announce<T: Serialize + ?Sized>(&self, event: &str, payload: &T) -> Result<usize> {
        self.events().emit_with(event, payload)
    }
}

/// Data holder bound to an event bus
///
/// Borrows of the inner data never outlive the closures passed to
/// [`Model::read`] and [`Model::update`], so handlers reached through
/// `announce` are free to read the model again.
pub struct Model<D> {
    data: RefCell<D>,
    events: SharedBus,
}

impl<D> Model<D> {
    /// Bind an initial data snapshot to `events`
    pub fn new(data: D, events: SharedBus) -> Self {
        Self {
            data: RefCell::new(data),
            events,
        }
    }

    /// Run `f` against the current data
    pub fn read<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.data.borrow())
    }

    /// Run `f` with exclusive access to the data
    ///
    /// Nothing is emitted; callers announce the change afterwards.
    pub fn update<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        f(&mut self.data.borrow_mut())
    }
}

impl<D: Clone> Model<D> {
    /// Clone of the current data
    pub fn snapshot(&self) -> D {
        self.data.borrow().clone()
    }
}

impl<D> Observable for Model<D> {
    fn events(&self) -> &SharedBus {
        &self.events
    }
}

impl<D: std::fmt::Debug> std::fmt::Debug for Model<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("data", &self.data.borrow())
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{shared, shared_bus};
    use serde_json::json;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default, Serialize)]
    struct Counter {
        hits: u32,
    }

    #[test]
    fn test_announce_reaches_bus() {
        let bus = shared_bus();
        let seen = shared(Vec::new());
        let sink = Rc::clone(&seen);
        bus.subscribe("counter:changed", move |payload| {
            sink.borrow_mut().push(payload.clone());
            Ok(())
        });

        let model = Model::new(Counter::default(), Rc::clone(&bus));
        let hits = model.update(|c| {
            c.hits += 1;
            c.hits
        });
        let invoked = model.announce("counter:changed", &model.snapshot()).expect("announce");

        assert_eq!(hits, 1);
        assert_eq!(invoked, 1);
        assert_eq!(*seen.borrow(), vec![json!({ "hits": 1 })]);
    }

    #[test]
    fn test_handlers_can_read_model_during_announce() {
        let bus = shared_bus();
        let model = Rc::new(Model::new(Counter { hits: 7 }, Rc::clone(&bus)));
        let observed = shared(0);

        let reader = Rc::clone(&model);
        let sink = Rc::clone(&observed);
        bus.subscribe("counter:changed", move |_| {
            *sink.borrow_mut() = reader.read(|c| c.hits);
            Ok(())
        });

        model.announce("counter:changed", &()).expect("announce");
        assert_eq!(*observed.borrow(), 7);
    }
}
