//! Minimal stand-in for the account backend and the HR data proxy
//!
//! Replies use the same envelope the real backends use. Every request is
//! recorded so tests can check what the client actually sent.

use actix_web::{
    dev::{Server, Service as _, ServiceRequest},
    http::{header, StatusCode},
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use anyhow::Context;
use hr_time::{Seconds, Timestamp};
use serde_json::{json, Value};
use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
};
use tracing::info;

pub const TEST_PASSWORD: &str = "Secret123";
pub const TEST_TOKEN_ADMIN: &str = "token-admin";
pub const TEST_TOKEN_HR: &str = "token-hr";
pub const TEST_USERNAME_ADMIN: &str = "admin";
pub const TEST_USERNAME_HR: &str = "hr";

const SESSION_LENGTH: Seconds = Seconds::new(3600);

/// What the backend saw for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct RequestLog(Arc<Mutex<Vec<RecordedRequest>>>);

impl RequestLog {
    fn record(&self, req: &ServiceRequest) {
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            authorization: header_text(req.headers(), header::AUTHORIZATION),
        };
        self.0.lock().expect("mutex poisoned").push(recorded);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().expect("mutex poisoned").clone()
    }

    /// Requests received for `path`, in arrival order
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

/// Starts the stub on a random local port, returns the server to run and the
/// port it is bound to
pub fn build_stub_backend(log: RequestLog) -> anyhow::Result<(Server, u16)> {
    let listener = TcpListener::bind("127.0.0.1:0").context("failed to bind stub backend")?;
    let port = listener
        .local_addr()
        .context("failed to get local address of listener")?
        .port();
    info!(?port, "Port assigned to the stub backend is {port}");

    let server = HttpServer::new(move || {
        let log = log.clone();
        App::new()
            .wrap_fn(move |req, srv| {
                log.record(&req);
                srv.call(req)
            })
            .service(
                web::scope("/auth")
                    .route("/signIn", web::post().to(sign_in))
                    .route("/logout", web::post().to(logout)),
            )
            .route("/api/v1/health", web::get().to(health))
            .route("/profile", web::get().to(profile))
            .route("/api/roles", web::get().to(roles))
            .route("/users", web::get().to(users))
            .route("/users/{id}/status", web::put().to(user_status))
            .service(
                web::scope("/api/python")
                    .route("/employees", web::get().to(employees))
                    .route("/employees", web::post().to(create_employee))
                    .route("/departments", web::get().to(departments))
                    .route("/positions", web::get().to(positions)),
            )
            .route("/echo", web::route().to(echo))
            .route("/status/{code}", web::route().to(bare_status))
            .route("/reply/{name}", web::route().to(canned_reply))
    })
    .workers(1)
    .listen(listener)
    .context("Failed to bind HTTP Server to listener")?
    .run();
    Ok((server, port))
}

fn header_text(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

/// `size` is the number of items in `data`, zero when it is not a list
fn success(data: Value) -> HttpResponse {
    let size = data.as_array().map_or(0, Vec::len);
    HttpResponse::Ok().json(json!({
        "status": 200,
        "code": "OK",
        "message": "success",
        "data": data,
        "size": size,
    }))
}

fn user_json(id: u64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "userName": username,
        "fullName": format!("{username} user"),
        "email": format!("{username}@example.com"),
        "active": false,
        "roles": [{"id": id, "name": role}],
    })
}

async fn sign_in(body: web::Json<Value>) -> HttpResponse {
    let username = body["userName"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let (token, user) = match (username, password) {
        (TEST_USERNAME_ADMIN, TEST_PASSWORD) => {
            (TEST_TOKEN_ADMIN, user_json(1, TEST_USERNAME_ADMIN, "ADMIN"))
        }
        (TEST_USERNAME_HR, TEST_PASSWORD) => {
            (TEST_TOKEN_HR, user_json(2, TEST_USERNAME_HR, "HR_MANAGER"))
        }
        _ => {
            return HttpResponse::Unauthorized().json(json!({
                "status": 401,
                "code": "UNAUTHORIZED",
                "message": "Username or password is incorrect",
            }))
        }
    };
    let expires_at = Timestamp::now() + SESSION_LENGTH;
    success(json!({
        "token": token,
        "expiredDate": expires_at.to_rfc3339(),
        "user": user,
    }))
}

async fn logout() -> HttpResponse {
    success(json!("logged out"))
}

async fn health() -> HttpResponse {
    success(json!({"status": "UP"}))
}

/// Only the tokens handed out by sign in are accepted
async fn profile(req: HttpRequest) -> HttpResponse {
    match header_text(req.headers(), header::AUTHORIZATION).as_deref() {
        Some(auth) if auth == format!("Bearer {TEST_TOKEN_ADMIN}") => {
            success(user_json(1, TEST_USERNAME_ADMIN, "ADMIN"))
        }
        Some(auth) if auth == format!("Bearer {TEST_TOKEN_HR}") => {
            success(user_json(2, TEST_USERNAME_HR, "HR_MANAGER"))
        }
        _ => HttpResponse::Unauthorized().finish(),
    }
}

async fn roles() -> HttpResponse {
    success(json!([
        {"id": 1, "name": "ADMIN", "description": "Administrator"},
        {"id": 2, "name": "HR_MANAGER"},
        {"id": 3, "name": "PAYROLL_MANAGER"},
    ]))
}

/// Paged the way the account backend pages, on the top level
async fn users() -> HttpResponse {
    let mut locked = user_json(3, "locked", "HR_MANAGER");
    locked["active"] = json!(true);
    HttpResponse::Ok().json(json!({
        "status": 200,
        "code": "OK",
        "message": "success",
        "data": [user_json(1, TEST_USERNAME_ADMIN, "ADMIN"), locked],
        "size": 2,
        "totalElements": 12,
        "totalPages": 6,
        "page": 0,
        "pageSize": 2,
    }))
}

async fn user_status(path: web::Path<u64>, body: web::Json<Value>) -> HttpResponse {
    let mut user = user_json(path.into_inner(), "someone", "HR_MANAGER");
    user["active"] = body["active"].clone();
    success(user)
}

/// Records wrapped with their pagination, the envelope `size` counts nothing
async fn employees() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "operationType": "Success",
        "message": "ok",
        "data": {
            "data": [{"id": 1, "full_name": "Nguyen Van A"}, {"id": 2, "full_name": "Tran Thi B"}],
            "total_records": 2,
            "page": 1,
            "size": 10,
        },
        "size": 0,
    }))
}

async fn create_employee() -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "operationType": "Failure",
        "code": "VALIDATION_ERROR",
        "message": "Validation failed",
        "domain": "employee",
        "details": [
            {"field": "email", "message": "invalid"},
            {"field": "full_name", "message": "required"},
        ],
        "traceId": "trace-employee-1",
    }))
}

/// List wrapped in a second `data` field
async fn departments() -> HttpResponse {
    success(json!({"data": [{"id": 1, "name": "Finance"}, {"id": 2, "name": "IT"}]}))
}

/// Spring style page object
async fn positions() -> HttpResponse {
    success(json!({
        "content": [{"id": 5, "name": "Accountant"}],
        "totalElements": 1,
        "totalPages": 1,
        "number": 0,
        "size": 20,
    }))
}

/// Reports back what was received
async fn echo(req: HttpRequest, body: String) -> HttpResponse {
    success(json!({
        "method": req.method().as_str(),
        "query": req.query_string(),
        "body": body,
        "authorization": header_text(req.headers(), header::AUTHORIZATION),
        "contentType": header_text(req.headers(), header::CONTENT_TYPE),
    }))
}

/// Replies with the status requested and no body
async fn bare_status(path: web::Path<u16>) -> HttpResponse {
    match StatusCode::from_u16(path.into_inner()) {
        Ok(status) => HttpResponse::build(status).finish(),
        Err(_) => HttpResponse::BadRequest().finish(),
    }
}

async fn canned_reply(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "ok-false" => HttpResponse::Ok().json(json!({
            "status": 200,
            "code": "ERR",
            "message": "X",
        })),
        "forbidden" => HttpResponse::Forbidden().json(json!({
            "status": 403,
            "code": "ACCESS_DENIED",
            "message": "Access Denied",
        })),
        "plain-text" => HttpResponse::BadGateway()
            .content_type("text/plain")
            .body("upstream unavailable"),
        "not-json" => HttpResponse::Ok()
            .content_type("text/html")
            .body("<html>maintenance</html>"),
        _ => HttpResponse::NotFound().json(json!({
            "operationType": "Failure",
            "code": "NOT_FOUND",
            "message": "no such reply",
            "domain": "stub",
            "details": {"name": path.as_str()},
        })),
    }
}
