mod auth;
mod gateway;
mod helpers;
mod resources;
