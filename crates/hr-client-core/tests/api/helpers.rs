use hr_client_core::Client;
use hr_test_helper::{build_client, unreachable_address, RecordingNavigator};
use std::sync::Arc;

pub use hr_test_helper::{no_cb, spawn_app};

/// Client whose every request fails to connect
pub fn spawn_unreachable_client() -> (Client, Arc<RecordingNavigator>) {
    build_client(unreachable_address())
}
