//! This module stores the expected format of the arguments for the requests
//! The structure of the module is supposed to match the path of the endpoints.
//! For example `/profile/change-password` would map to
//! [`api::ChangePasswordReqArgs`]. Some structs are not serializable because
//! they hold secrets, the client builds the request body for those by hand

use crate::const_config::client::CLIENT_DEFAULT_PAGE_SIZE;
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

pub mod api;

#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

/// Paging arguments sent as query parameters. The account backend counts pages
/// from 0, the data backend from 1, the caller chooses
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PageReqArgs {
    pub page: u32,
    pub size: u32,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = username;
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = password;
        self
    }

    /// Both fields are required by the backend, checking here saves a round
    /// trip
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.expose_secret().is_empty()
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

impl PageReqArgs {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn first(size: u32) -> Self {
        Self { page: 0, size }
    }
}

impl Default for PageReqArgs {
    fn default() -> Self {
        Self::first(CLIENT_DEFAULT_PAGE_SIZE)
    }
}
