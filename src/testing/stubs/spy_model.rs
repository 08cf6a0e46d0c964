use crate::models::MotionModel;
use std::cell::Cell;
use std::rc::Rc;

/// Identity model that counts how often it was asked to propagate.
#[derive(Default)]
pub struct SpyModel {
    calls: Rc<Cell<u64>>,
}

#[derive(Clone)]
pub struct SpyHandle(Rc<Cell<u64>>);

impl SpyHandle {
    pub fn count(&self) -> u64 {
        self.0.get()
    }
}

impl SpyModel {
    pub fn new() -> (Self, SpyHandle) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                calls: Rc::clone(&calls),
            },
            SpyHandle(calls),
        )
    }
}

impl MotionModel for SpyModel {
    fn propagate(&self, current: f64) -> f64 {
        self.calls.set(self.calls.get() + 1);
        current
    }
}
