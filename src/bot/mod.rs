pub mod dispatcher;
pub mod handler;

pub use dispatcher::{Dispatcher, Inbound};
pub use handler::{Handler, run_bot};
