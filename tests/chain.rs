use std::cell::{Cell, RefCell};
use std::rc::Rc;
use serde_json::{json, Value as Json};
use vow::{Status, Value, Vow};

fn observe(vow: &Vow) -> Rc<RefCell<Option<Json>>> {
    let seen = Rc::new(RefCell::new(None));
    let slot = seen.clone();
    vow.then(move |value| *slot.borrow_mut() = value.into_json());
    seen
}

#[test]
fn immediate_settle_is_synchronous() {
    let seen = observe(&Vow::resolve(5));
    assert_eq!(*seen.borrow(), Some(json!(5)));
}

#[test]
fn executor_runs_synchronously() {
    let ran = Rc::new(Cell::new(false));
    let flag = ran.clone();

    let vow = Vow::new(move |resolver| {
        flag.set(true);
        resolver.resolve("done");
    });

    assert!(ran.get());
    assert_eq!(vow.status(), Status::Fulfilled);
    assert_eq!(vow.settled(), Some(Value::from("done")));
}

#[test]
fn single_slot_overwrite() {
    let mut held = None;
    let vow = Vow::new(|resolver| held = Some(resolver));

    let first = Rc::new(Cell::new(false));
    let flag = first.clone();
    vow.then(move |_| flag.set(true));

    let second = Rc::new(Cell::new(false));
    let flag = second.clone();
    vow.then(move |_| flag.set(true));

    held.unwrap().resolve(1);

    assert!(!first.get());
    assert!(second.get());
}

#[test]
fn unhandled_rejection_carries_reason() {
    let rejected = Vow::reject("boom");
    let next = rejected.then(|_| "not run");

    assert_ne!(next, rejected);
    assert_eq!(next.status(), Status::Rejected);
    assert_eq!(next.settled(), Some(Value::from("boom")));
}

#[test]
fn pending_rejection_propagates_through_then() {
    let mut held = None;
    let vow = Vow::new(|resolver| held = Some(resolver));

    let seen = Rc::new(RefCell::new(None));
    let slot = seen.clone();
    vow.then(|_| "not run")
        .catch(move |reason| *slot.borrow_mut() = reason.into_json());

    held.unwrap().reject("boom");

    assert_eq!(*seen.borrow(), Some(json!("boom")));
}

#[test]
fn rejection_handler_recovers() {
    let next = Vow::reject("boom").then2(|_| "not run", |_| "recovered");

    assert_eq!(next.status(), Status::Fulfilled);
    assert_eq!(next.settled(), Some(Value::from("recovered")));
}

#[test]
fn returned_deferred_is_flattened() {
    let mut held = None;
    let inner = Vow::new(|resolver| held = Some(resolver));

    let chained = Vow::resolve(1).then(move |_| inner.clone());
    let seen = observe(&chained);

    assert_eq!(*seen.borrow(), None);
    held.unwrap().resolve(7);
    assert_eq!(*seen.borrow(), Some(json!(7)));
}

#[test]
fn flattening_preserves_failure_channel() {
    let mut held = None;
    let inner = Vow::new(|resolver| held = Some(resolver));

    let seen = Rc::new(RefCell::new(None));
    let slot = seen.clone();
    Vow::resolve(1)
        .then(move |_| inner.clone())
        .catch(move |reason| *slot.borrow_mut() = reason.into_json());

    held.unwrap().reject("inner failed");
    assert_eq!(*seen.borrow(), Some(json!("inner failed")));
}

#[test]
fn finally_masks_rejection() {
    let next = Vow::reject("E").finally(|| "X");

    assert_eq!(next.status(), Status::Fulfilled);
    assert_eq!(next.settled(), Some(Value::from("X")));
}

#[test]
fn finally_skips_rejection_while_pending() {
    let mut held = None;
    let vow = Vow::new(|resolver| held = Some(resolver));

    let ran = Rc::new(Cell::new(false));
    let flag = ran.clone();
    let next = vow.finally(move || flag.set(true));

    held.unwrap().reject("late");

    assert!(!ran.get());
    assert_eq!(next.status(), Status::Pending);
}

#[test]
fn repeated_settlement_refires_slot() {
    let mut held = None;
    let vow = Vow::new(|resolver| held = Some(resolver));

    let count = Rc::new(Cell::new(0));
    let seen = Rc::new(RefCell::new(None));
    let fired = count.clone();
    let slot = seen.clone();
    vow.then(move |value| {
        fired.set(fired.get() + 1);
        *slot.borrow_mut() = value.into_json();
    });

    let resolver = held.unwrap();
    resolver.resolve(1);
    resolver.resolve(2);

    assert_eq!(count.get(), 2);
    assert_eq!(*seen.borrow(), Some(json!(2)));
}

#[test]
fn catch_on_fulfilled_is_identity() {
    let vow = Vow::resolve(1);
    let same = vow.catch(|_| "not run");

    assert_eq!(same, vow);
}

#[test]
fn resolve_of_deferred_is_identity() {
    let inner = Vow::new(|_| {});
    assert_eq!(Vow::resolve(Value::from(inner.clone())), inner);
}

#[test]
fn reject_of_deferred_is_identity() {
    let inner = Vow::new(|_| {});
    assert_eq!(Vow::reject(Value::from(inner.clone())), inner);
}

#[test]
fn aggregate_stays_rejected_after_item_refires() {
    let mut held = None;
    let flaky = Vow::new(|resolver| held = Some(resolver));

    let aggregate = Vow::all([Value::from(Vow::resolve(1)), Value::from(flaky)]);

    let fulfilled = Rc::new(Cell::new(0));
    let fired = fulfilled.clone();
    let seen = Rc::new(RefCell::new(None));
    let slot = seen.clone();
    aggregate.then2(
        move |_| fired.set(fired.get() + 1),
        move |reason| *slot.borrow_mut() = reason.into_json(),
    );

    let resolver = held.unwrap();
    resolver.reject("bad");
    assert_eq!(aggregate.status(), Status::Rejected);

    // the item has no settle-once guard, so it can still fulfill afterwards;
    // the zeroed length keeps the aggregate from flipping to fulfilled
    resolver.resolve(5);
    assert_eq!(aggregate.status(), Status::Rejected);
    assert_eq!(aggregate.settled(), Some(Value::from("bad")));
    assert_eq!(fulfilled.get(), 0);
    assert_eq!(*seen.borrow(), Some(json!("bad")));
}

#[test]
fn empty_aggregate_never_settles() {
    let aggregate = Vow::all(Vec::<Value>::new());
    assert_eq!(aggregate.status(), Status::Pending);
}
