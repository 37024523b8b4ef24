use std::rc::Rc;
use super::value::Value;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Pending,
    Fulfilled,
    Rejected,
}

pub type Thunk = Rc<dyn Fn()>;

pub struct State {
    pub status:       Status,
    pub settled:      Option<Value>,
    pub on_fulfilled: Option<Thunk>,
    pub on_rejected:  Option<Thunk>,
}

impl State {
    pub fn new() -> Self {
        Self {
            status:       Status::Pending,
            settled:      None,
            on_fulfilled: None,
            on_rejected:  None,
        }
    }
}
