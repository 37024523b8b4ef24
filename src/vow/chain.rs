use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use super::state::{State, Status, Thunk};
use super::value::Value;

#[derive(Clone)]
pub struct Vow {
    state: Rc<RefCell<State>>,
}

#[derive(Clone)]
pub struct Resolver {
    vow: Vow,
}

type Callback = Rc<dyn Fn(Value) -> Value>;

impl Vow {
    pub fn new<E: FnOnce(Resolver)>(executor: E) -> Self {
        let vow = Self::pending();
        executor(Resolver { vow: vow.clone() });
        vow
    }

    pub fn resolve<V: Into<Value>>(value: V) -> Self {
        let value = value.into();
        match value.thenable() {
            Some(vow) => vow,
            None      => Self::with(Status::Fulfilled, value),
        }
    }

    pub fn reject<V: Into<Value>>(reason: V) -> Self {
        let reason = reason.into();
        match reason.catchable() {
            Some(vow) => vow,
            None      => Self::with(Status::Rejected, reason),
        }
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status
    }

    pub fn settled(&self) -> Option<Value> {
        self.state.borrow().settled.clone()
    }

    pub fn then<F, R>(&self, on_fulfilled: F) -> Self
    where
        F: Fn(Value) -> R + 'static,
        R: Into<Value>,
    {
        self.chain(callback(on_fulfilled), None)
    }

    pub fn then2<F, R, G, S>(&self, on_fulfilled: F, on_rejected: G) -> Self
    where
        F: Fn(Value) -> R + 'static,
        R: Into<Value>,
        G: Fn(Value) -> S + 'static,
        S: Into<Value>,
    {
        self.chain(callback(on_fulfilled), Some(callback(on_rejected)))
    }

    pub fn catch<G, S>(&self, on_rejected: G) -> Self
    where
        G: Fn(Value) -> S + 'static,
        S: Into<Value>,
    {
        let on_rejected = callback(on_rejected);

        match self.status() {
            Status::Pending => {
                let next     = Self::pending();
                let resolver = Resolver { vow: next.clone() };
                self.store_rejected(subscriber(self, on_rejected, resolver));
                next
            }
            Status::Fulfilled => self.clone(),
            Status::Rejected  => {
                let next     = Self::pending();
                let resolver = Resolver { vow: next.clone() };
                run_and_flatten(&on_rejected, self.result(), &resolver);
                next
            }
        }
    }

    pub fn finally<F, R>(&self, on_finally: F) -> Self
    where
        F: Fn() -> R + 'static,
        R: Into<Value>,
    {
        match self.status() {
            // no rejected slot: a rejection while pending never reaches `next`
            Status::Pending => {
                let next     = Self::pending();
                let resolver = Resolver { vow: next.clone() };
                self.store_fulfilled(Rc::new(move || resolver.resolve(on_finally())));
                next
            }
            _ => Self::new(|resolver| resolver.resolve(on_finally())),
        }
    }

    fn chain(&self, on_fulfilled: Callback, on_rejected: Option<Callback>) -> Self {
        match self.status() {
            Status::Pending => {
                let next     = Self::pending();
                let resolver = Resolver { vow: next.clone() };

                self.store_fulfilled(subscriber(self, on_fulfilled, resolver.clone()));

                match on_rejected {
                    Some(on_rejected) => {
                        self.store_rejected(subscriber(self, on_rejected, resolver));
                    }
                    None => {
                        let vow = self.clone();
                        self.store_rejected(Rc::new(move || resolver.reject(vow.result())));
                    }
                }

                next
            }
            Status::Fulfilled => {
                let next     = Self::pending();
                let resolver = Resolver { vow: next.clone() };
                run_and_flatten(&on_fulfilled, self.result(), &resolver);
                next
            }
            Status::Rejected => match on_rejected {
                Some(on_rejected) => {
                    let next     = Self::pending();
                    let resolver = Resolver { vow: next.clone() };
                    run_and_flatten(&on_rejected, self.result(), &resolver);
                    next
                }
                None => Self::with(Status::Rejected, self.result()),
            },
        }
    }

    fn settle(&self, status: Status, value: Value) {
        let thunk = {
            let mut state = self.state.borrow_mut();
            state.status  = status;
            state.settled = Some(value);
            match status {
                Status::Rejected => state.on_rejected.clone(),
                _                => state.on_fulfilled.clone(),
            }
        };

        debug!(?status, "settled");

        // the slot survives settlement; a repeated settle fires it again
        if let Some(thunk) = thunk {
            thunk();
        }
    }

    fn result(&self) -> Value {
        let state = self.state.borrow();
        state.settled.clone().unwrap_or_else(Value::null)
    }

    // single slot per channel: a later registration overwrites
    fn store_fulfilled(&self, thunk: Thunk) {
        self.state.borrow_mut().on_fulfilled = Some(thunk);
    }

    fn store_rejected(&self, thunk: Thunk) {
        self.state.borrow_mut().on_rejected = Some(thunk);
    }

    fn pending() -> Self {
        Self { state: Rc::new(RefCell::new(State::new())) }
    }

    fn with(status: Status, value: Value) -> Self {
        let vow = Self::pending();
        {
            let mut state = vow.state.borrow_mut();
            state.status  = status;
            state.settled = Some(value);
        }
        vow
    }
}

impl Resolver {
    pub fn resolve<V: Into<Value>>(&self, value: V) {
        self.vow.settle(Status::Fulfilled, value.into());
    }

    pub fn reject<V: Into<Value>>(&self, reason: V) {
        self.vow.settle(Status::Rejected, reason.into());
    }
}

impl PartialEq for Vow {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for Vow {}

impl fmt::Debug for Vow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vow({:?})", self.status())
    }
}

fn callback<F, R>(f: F) -> Callback
where
    F: Fn(Value) -> R + 'static,
    R: Into<Value>,
{
    Rc::new(move |value| f(value).into())
}

fn subscriber(vow: &Vow, callback: Callback, resolver: Resolver) -> Thunk {
    let vow = vow.clone();
    Rc::new(move || run_and_flatten(&callback, vow.result(), &resolver))
}

fn run_and_flatten(callback: &Callback, input: Value, resolver: &Resolver) {
    let returned = callback(input);

    match returned.thenable() {
        Some(inner) => {
            let fulfil = resolver.clone();
            let reject = resolver.clone();
            inner.then2(
                move |value| fulfil.resolve(value),
                move |reason| reject.reject(reason),
            );
        }
        None => resolver.resolve(returned),
    }
}
