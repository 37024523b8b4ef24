pub use timer::Timers;

mod timer;
