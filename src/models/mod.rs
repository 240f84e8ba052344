//! Data models for the Intercom API.
//!
//! Every resource is a thin wrapper over an [`Attributes`] map with typed
//! accessors for the fields the API documents. Unknown fields are kept and
//! remain reachable through [`Resource::get`].

mod attributes;
mod common;
mod company;
mod custom_data;
mod event;
mod impression;
mod message_thread;
mod note;
mod query;
mod tag;
mod user;

pub use attributes::*;
pub use common::*;
pub use company::*;
pub use custom_data::*;
pub use event::*;
pub use impression::*;
pub use message_thread::*;
pub use note::*;
pub use query::*;
pub use tag::*;
pub use user::*;
