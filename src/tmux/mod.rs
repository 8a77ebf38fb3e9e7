//! tmux integration: session listing, deterministic naming, and process
//! control for the attach/create handoff.

mod execute;
mod naming;
mod session;

pub use execute::{attach, create};
pub use naming::NameRegistry;
pub use session::{list_sessions, Session};
