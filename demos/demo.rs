use std::time::Duration;
use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, registry};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use vow::host::Timers;
use vow::{Value, Vow};

fn main() -> Result<()> {
    let mut filter = EnvFilter::from_default_env();
    filter = filter.add_directive(LevelFilter::WARN.into());
    let print = fmt::layer().compact();
    registry().with(filter).with(print).init();

    let timers = Timers::new();

    let p1 = Vow::resolve(3);
    let p2 = 1337;
    let p3 = timers.fulfill_after(Duration::from_millis(100), "foo");

    Vow::all([Value::from(p1), Value::from(p2), Value::from(p3)])
        .then2(
            |results| println!("{results}"),
            |reason| println!("failed: {reason}"),
        );

    let second = timers.clone();
    let fourth = timers.clone();

    timers
        .fulfill_after(Duration::from_secs(1), "first vow success")
        .then2(
            |value| { println!("{value}"); "second vow" },
            |reason| { println!("{reason}"); "second vow" },
        )
        .then(move |value| {
            println!("{value}");
            second.fulfill_after(Duration::from_secs(1), "third vow")
        })
        .then(move |value| {
            println!("{value}");
            fourth.reject_after(Duration::from_secs(1), "fourth vow")
        })
        .then(|value| println!("{value}"))
        .then(|_| println!("not printed"))
        .catch(|reason| println!("caught: {reason}"))
        .finally(|| println!("printed always"));

    timers.run()
}
