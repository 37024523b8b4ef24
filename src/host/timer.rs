use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::thread::{sleep, spawn};
use std::time::Duration;
use anyhow::{anyhow, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;
use crate::vow::{Resolver, Value, Vow};

// Sleeps happen on worker threads; only timer ids cross the channel.
// Resolvers and their values never leave the owning thread.
#[derive(Clone)]
pub struct Timers {
    armed:    Rc<RefCell<Armed>>,
    sender:   Sender<u64>,
    receiver: Receiver<u64>,
}

struct Armed {
    counter: u64,
    pending: HashMap<u64, (Resolver, Fire)>,
}

enum Fire {
    Fulfill(Value),
    Reject(Value),
}

impl Timers {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        let armed = Armed {
            counter: 0,
            pending: HashMap::new(),
        };

        Self {
            armed:    Rc::new(RefCell::new(armed)),
            sender:   sender,
            receiver: receiver,
        }
    }

    pub fn fulfill_after<V: Into<Value>>(&self, delay: Duration, value: V) -> Vow {
        self.arm(delay, Fire::Fulfill(value.into()))
    }

    pub fn reject_after<V: Into<Value>>(&self, delay: Duration, reason: V) -> Vow {
        self.arm(delay, Fire::Reject(reason.into()))
    }

    pub fn run(&self) -> Result<()> {
        loop {
            if self.armed.borrow().pending.is_empty() {
                return Ok(());
            }

            let id = match self.receiver.recv() {
                Ok(id) => id,
                Err(_) => return Err(anyhow!("timer channel closed")),
            };

            let fired = self.armed.borrow_mut().pending.remove(&id);

            if let Some((resolver, fire)) = fired {
                debug!(id, "timer fired");
                match fire {
                    Fire::Fulfill(value)  => resolver.resolve(value),
                    Fire::Reject(reason)  => resolver.reject(reason),
                }
            }
        }
    }

    fn arm(&self, delay: Duration, fire: Fire) -> Vow {
        let armed  = self.armed.clone();
        let sender = self.sender.clone();

        Vow::new(move |resolver| {
            let mut armed = armed.borrow_mut();

            let id = armed.counter;
            armed.counter += 1;
            armed.pending.insert(id, (resolver, fire));

            spawn(move || {
                sleep(delay);
                let _ = sender.send(id);
            });
        })
    }
}
