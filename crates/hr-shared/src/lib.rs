//! Code shared between the HR admin clients and their tests

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
pub mod id;
mod macros;
pub mod req_args;
pub mod responses;
pub mod token;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
