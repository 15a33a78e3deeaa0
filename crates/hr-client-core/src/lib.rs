//! Session handling and the request gateway shared by HR admin front-ends
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;
mod envelope;
mod navigation;
mod session;
mod storage;

pub use client::{
    api::hr::{ReportKind, Resource},
    Client, LoginOutcome, UiCallBack, NO_ARGS,
};
pub use envelope::{ApiError, Envelope, ErrorKind, Success};
pub use navigation::{landing_path, route_guard, Navigator, TracingNavigator};
pub use session::{Credential, SessionManager};
pub use storage::{FileStorage, MemoryStorage, SlotStorage};
