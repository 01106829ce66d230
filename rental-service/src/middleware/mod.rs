//! Request middleware for rental-service.

mod actor;

pub use actor::{ActorContext, Role};
