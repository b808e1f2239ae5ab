//! Per-step systems. Each one is a free function over the body slice so the
//! orchestrator controls ordering explicitly.

pub mod body;
pub mod collision;
pub mod integrate;
pub mod spawn;
pub mod support;

pub use body::Body;
pub use collision::{resolve_contacts, resolve_pair, Contact, ContactStats};
pub use integrate::{integrate_all, integrate_body};
pub use spawn::{SpawnRequest, SpawnScheduler};
pub use support::{all_supported, at_floor, demote_unsupported, supports};
