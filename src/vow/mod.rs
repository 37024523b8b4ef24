pub use chain::Resolver;
pub use chain::Vow;
pub use state::Status;
pub use value::Value;

mod all;
mod chain;
mod state;
mod value;
