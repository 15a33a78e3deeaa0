use reqwest::{self, Method};
use std::fmt::Display;

/// A fixed route known at compile time
#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: reqwest::Method,
}

/// A route resolved at runtime, for example one including a record id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub method: reqwest::Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PUT,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path,
            method: Method::DELETE,
        }
    }

    /// Same path with a different method
    pub fn with_method(&self, method: Method) -> Endpoint {
        Endpoint {
            path: self.path.to_string(),
            method,
        }
    }

    /// Appends `/{segment}` to the path, keeping the method
    pub fn join<S: Display>(&self, segment: S) -> Endpoint {
        Endpoint::from(self.clone()).join(segment)
    }
}

impl Endpoint {
    pub fn join<S: Display>(mut self, segment: S) -> Self {
        let segment = segment.to_string();
        let segment = segment.trim_matches('/');
        if !self.path.ends_with('/') {
            self.path.push('/');
        }
        self.path.push_str(segment);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Returns true if requests to this endpoint conventionally carry a body
    pub fn has_body(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT || self.method == Method::PATCH
    }
}

impl From<PathSpec> for Endpoint {
    fn from(value: PathSpec) -> Self {
        Self {
            path: value.path.to_string(),
            method: value.method,
        }
    }
}
