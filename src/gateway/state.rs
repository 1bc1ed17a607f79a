use std::sync::Arc;

use crate::dispatch::JobDispatcher;

#[derive(Clone)]
pub struct HandlerState {
    pub dispatcher: Arc<dyn JobDispatcher>,
}

impl HandlerState {
    pub fn new(dispatcher: Arc<dyn JobDispatcher>) -> Self {
        Self { dispatcher }
    }
}
