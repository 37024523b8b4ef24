pub use vow::Resolver;
pub use vow::Status;
pub use vow::Value;
pub use vow::Vow;

pub mod host;
pub mod vow;
