use crate::helpers::{no_cb, spawn_app};
use hr_client_core::ErrorKind;
use hr_shared::{
    req_args::{api::admin::user::UserStatusReqArgs, api::hr::EmployeeFilter, PageReqArgs},
    responses::PageInfo,
    uac::{RoleRecord, ROLE_ADMIN},
};
use hr_test_helper::TEST_USERNAME_ADMIN;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Employee {
    id: u64,
    full_name: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Named {
    id: u64,
    name: String,
}

#[tokio::test]
async fn users_listed_with_normalized_status() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = app
        .core_client
        .list_users(PageReqArgs::first(2), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    let users = outcome.payload;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username.as_ref(), TEST_USERNAME_ADMIN);
    assert!(users[0].is_active);
    assert!(!users[1].is_active, "backend flag true means locked");
    assert_eq!(
        outcome.page_info,
        Some(PageInfo {
            total_elements: Some(12),
            total_pages: Some(6),
            page: Some(0),
            page_size: Some(2),
        })
    );
    let requests = app.backend_log.requests_to("/users");
    assert_eq!(requests[0].query, "page=0&size=2");
}

#[tokio::test]
async fn lock_user_sends_inverted_flag() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = app
        .core_client
        .set_user_status(7.into(), UserStatusReqArgs { is_active: false }, no_cb)
        .await
        .unwrap();

    // Assert
    let user = outcome.unwrap().payload;
    assert!(!user.is_active);
    let requests = app.backend_log.requests_to("/users/7/status");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
}

#[tokio::test]
async fn roles_listed() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = app.core_client.list_roles(no_cb).await.unwrap();

    // Assert
    let outcome = outcome.unwrap();
    assert_eq!(outcome.page_info, None, "envelope size is an item count");
    let roles: Vec<RoleRecord> = outcome.payload;
    assert_eq!(roles.len(), 3);
    assert_eq!(&*roles[0].name, ROLE_ADMIN);
}

#[tokio::test]
async fn profile_after_login() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = app.core_client.get_profile(no_cb).await.unwrap();

    // Assert
    let profile = outcome.unwrap().payload;
    assert_eq!(profile.username.as_ref(), TEST_USERNAME_ADMIN);
    assert!(app.redirects().is_empty());
}

#[tokio::test]
async fn employees_from_wrapped_records_with_inner_paging() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    let filter = EmployeeFilter {
        keyword: Some("nguyen".to_string()),
        ..Default::default()
    };

    // Act
    let outcome = app
        .core_client
        .list_employees::<Employee, _>(&filter, no_cb)
        .await
        .unwrap();

    // Assert
    let outcome = outcome.unwrap();
    assert_eq!(
        outcome.payload,
        vec![
            Employee {
                id: 1,
                full_name: "Nguyen Van A".into()
            },
            Employee {
                id: 2,
                full_name: "Tran Thi B".into()
            },
        ]
    );
    let page = outcome.page_info.unwrap();
    assert_eq!(page.total_elements, Some(2));
    assert_eq!(page.page, Some(1));
    assert_eq!(page.page_size, Some(10));
    let requests = app.backend_log.requests_to("/api/python/employees");
    assert_eq!(requests[0].query, "keyword=nguyen");
}

#[tokio::test]
async fn departments_from_wrapped_list() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = app
        .core_client
        .departments()
        .list::<(), Named, _>(None, no_cb)
        .await
        .unwrap();

    // Assert
    let outcome = outcome.unwrap();
    let names: Vec<_> = outcome.payload.into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["Finance", "IT"]);
    assert_eq!(outcome.page_info, None);
}

#[tokio::test]
async fn positions_from_page_object() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = app
        .core_client
        .positions()
        .list::<(), Named, _>(None, no_cb)
        .await
        .unwrap();

    // Assert
    let outcome = outcome.unwrap();
    assert_eq!(
        outcome.payload,
        vec![Named {
            id: 5,
            name: "Accountant".into()
        }]
    );
    let page = outcome.page_info.unwrap();
    assert_eq!(page.total_elements, Some(1));
    assert_eq!(page.page, Some(0));
    assert_eq!(page.page_size, Some(20));
}

#[tokio::test]
async fn wrong_payload_shape_is_malformed() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let outcome = app
        .core_client
        .departments()
        .list::<(), Employee, _>(None, no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome.unwrap_err().kind, ErrorKind::ConnectivityError);
}
