use std::cell::{Cell, RefCell};
use std::rc::Rc;
use super::chain::Vow;
use super::value::Value;

impl Vow {
    pub fn all<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let items: Vec<Value> = items.into_iter().map(Into::into).collect();

        Self::new(|resolver| {
            let total     = items.len();
            let results   = Rc::new(RefCell::new(vec![Value::null(); total]));
            let count     = Rc::new(Cell::new(0));
            let remaining = Rc::new(Cell::new(total));

            for (index, item) in items.into_iter().enumerate() {
                let results = results.clone();
                let count   = count.clone();
                let length  = remaining.clone();
                let fulfil  = resolver.clone();

                let remaining = remaining.clone();
                let reject    = resolver.clone();

                Vow::resolve(item)
                    .then(move |value| {
                        // result `index` always comes from input `index`,
                        // whatever the completion order
                        results.borrow_mut()[index] = value;
                        count.set(count.get() + 1);
                        // checked against the shared length, which a failure
                        // zeroes: a rejected aggregate never flips to fulfilled
                        if count.get() == length.get() {
                            let results = results.borrow().clone();
                            fulfil.resolve(results);
                        }
                    })
                    .catch(move |reason| {
                        // first failure settles the aggregate; later ones are dropped
                        if remaining.get() != 0 {
                            reject.reject(reason);
                            remaining.set(0);
                        }
                    });
            }
        })
    }
}
