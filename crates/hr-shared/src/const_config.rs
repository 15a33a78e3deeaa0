//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Used when no base url is configured. This is the address the backend
    /// listens on during development
    pub const CLIENT_DEFAULT_BASE_URL: &str = "http://localhost:8080";
    pub const CLIENT_DEFAULT_PAGE_SIZE: u32 = 10;
}

/// Names of the persisted session slots
pub mod storage {
    pub const STORAGE_KEY_TOKEN: &str = "auth_token";
    pub const STORAGE_KEY_SUBJECT: &str = "user_data";
    pub const STORAGE_KEY_EXPIRES_AT: &str = "token_expired_date";
    pub const STORAGE_ALL_KEYS: [&str; 3] =
        [STORAGE_KEY_TOKEN, STORAGE_KEY_SUBJECT, STORAGE_KEY_EXPIRES_AT];
}

/// Front-end locations used for redirects
pub mod navigation {
    pub const NAV_LOGIN: &str = "/login";
    pub const NAV_HOME: &str = "/";
    pub const NAV_EMPLOYEES: &str = "/employees";
    pub const NAV_SALARIES: &str = "/salaries";
}

/// Fixed messages and codes used when the client itself produces an error
pub mod error {
    pub const ERR_MSG_SESSION_EXPIRED: &str = "session expired";
    pub const ERR_MSG_FORBIDDEN: &str = "insufficient permission";
    pub const ERR_MSG_CONNECTIVITY: &str = "unable to connect to server";
    pub const ERR_MSG_MALFORMED: &str = "malformed response from server";
    pub const ERR_MSG_GENERIC: &str = "an error occurred";
    pub const ERR_MSG_SESSION_NOT_SAVED: &str = "failed to save session";
    pub const ERR_MSG_VALIDATION: &str = "validation failed";
    pub const ERR_CODE_FORBIDDEN: &str = "FORBIDDEN";
    pub const ERR_CODE_HTTP: &str = "HTTP_ERROR";
    pub const ERR_CODE_VALIDATION: &str = "VALIDATION_ERROR";
    pub const ERR_CODE_GENERIC: &str = "ERROR";
    pub const ERR_CODE_SESSION_NOT_SAVED: &str = "SESSION_NOT_SAVED";
}

pub mod path {
    mod path_spec;
    pub use path_spec::{Endpoint, PathSpec};

    // Served by the account backend directly
    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/auth/signIn");
    pub const PATH_AUTH_LOGOUT: PathSpec = PathSpec::post("/auth/logout");
    pub const PATH_HEALTH_CHECK: PathSpec = PathSpec::get("/api/v1/health");
    pub const PATH_PROFILE: PathSpec = PathSpec::get("/profile");
    pub const PATH_PROFILE_UPDATE: PathSpec = PathSpec::put("/profile");
    pub const PATH_PROFILE_CHANGE_PASSWORD: PathSpec = PathSpec::put("/profile/change-password");
    pub const PATH_ROLES: PathSpec = PathSpec::get("/api/roles");
    pub const PATH_USERS: PathSpec = PathSpec::get("/users");

    /// All HR data requests are proxied to the data backend under this prefix
    pub const PATH_PROXY_PREFIX: &str = "/api/python";
    pub const PATH_ATTENDANCE: PathSpec = PathSpec::get("/api/python/attendance");
    pub const PATH_DASHBOARD: PathSpec = PathSpec::get("/api/python/dashboard");
    pub const PATH_DEPARTMENTS: PathSpec = PathSpec::get("/api/python/departments");
    pub const PATH_DIVIDENDS: PathSpec = PathSpec::get("/api/python/dividends");
    pub const PATH_EMPLOYEES: PathSpec = PathSpec::get("/api/python/employees");
    pub const PATH_POSITIONS: PathSpec = PathSpec::get("/api/python/positions");
    pub const PATH_REPORTS: PathSpec = PathSpec::get("/api/python/reports");
    pub const PATH_SALARIES: PathSpec = PathSpec::get("/api/python/salaries");
}
