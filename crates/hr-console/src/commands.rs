//! Runs one command against the backend and prints the outcome

use anyhow::bail;
use hr_client_core::{Client, Envelope, Success};
use hr_shared::{
    errors::NotLoggedInError,
    id::RecordId,
    req_args::{
        api::hr::{EmployeeFilter, PeriodFilter},
        LoginReqArgs, PageReqArgs,
    },
    responses::PageInfo,
    uac::{Capability, UserRecord},
};
use serde_json::Value;
use std::future::Future;
use tracing::{info, warn};

use crate::{cli::Command, configuration::ClientSettings};

fn no_cb() {}

/// Waits for the reply and turns a failure into the message to show the user
async fn settle<T, E, R>(reply: R) -> anyhow::Result<Success<T>>
where
    R: Future<Output = Result<Envelope<T>, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    match reply.await? {
        Ok(success) => Ok(success),
        Err(e) => bail!(e.user_message()),
    }
}

/// Checks there is a usable session before anything is sent
///
/// Capabilities are advisory, the backend decides
fn require_session(client: &Client, capability: Capability) -> anyhow::Result<()> {
    if !client.guard_route(capability.nav_path()) {
        return Err(NotLoggedInError.into());
    }
    if !client.capabilities().allows(capability) {
        warn!(%capability, "the current roles do not include this, the backend may refuse");
    }
    Ok(())
}

#[tracing::instrument(skip(client, settings))]
pub async fn run(
    client: &Client,
    settings: &ClientSettings,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let args = LoginReqArgs::new(username, password);
            let outcome = settle(client.login(args, no_cb)).await?.payload;
            let roles: Vec<String> = outcome
                .subject
                .roles
                .iter()
                .map(ToString::to_string)
                .collect();
            println!(
                "Signed in as {} ({})",
                outcome.subject.greeting_name(),
                roles.join(", ")
            );
            println!("Start page: {}", outcome.landing_path);
        }
        Command::Logout => {
            if let Err(e) = settle(client.logout(no_cb)).await {
                info!(?e, "backend was not told about the logout");
            }
            println!("Signed out");
        }
        Command::Whoami => print_whoami(client)?,
        Command::Health => {
            settle(client.health_check(no_cb)).await?;
            println!("Backend at {} is up", client.server_address());
        }
        Command::Profile => {
            require_session(client, Capability::EditProfile)?;
            let profile = settle(client.get_profile(no_cb)).await?.payload;
            print_user(&profile);
        }
        Command::Users { page, size } => {
            require_session(client, Capability::ManageUsers)?;
            let args = PageReqArgs::new(page, size.unwrap_or(settings.page_size));
            let users = settle(client.list_users(args, no_cb)).await?;
            users.payload.iter().for_each(print_user);
            print_page_info(users.page_info);
        }
        Command::Roles => {
            require_session(client, Capability::ManageUsers)?;
            let roles = settle(client.list_roles(no_cb)).await?.payload;
            for role in roles {
                match role.description {
                    Some(description) => println!("{:>4} {} - {description}", role.id, role.name),
                    None => println!("{:>4} {}", role.id, role.name),
                }
            }
        }
        Command::Employees {
            keyword,
            department,
            position,
        } => {
            require_session(client, Capability::ManageEmployees)?;
            let filter = EmployeeFilter {
                keyword,
                size: Some(settings.page_size),
                ..Default::default()
            };
            let reply = match (department, position) {
                (Some(id), _) => {
                    client.employees_in_department(RecordId::from(id), &filter, no_cb)
                }
                (None, Some(id)) => {
                    client.employees_in_position(RecordId::from(id), &filter, no_cb)
                }
                (None, None) => client.list_employees(&filter, no_cb),
            };
            print_records(settle(reply).await?)?;
        }
        Command::Departments => {
            require_session(client, Capability::ManageDepartments)?;
            let page = PageReqArgs::first(settings.page_size);
            let reply = client.departments().list(Some(&page), no_cb);
            print_records(settle(reply).await?)?;
        }
        Command::Positions => {
            require_session(client, Capability::ManagePositions)?;
            let page = PageReqArgs::first(settings.page_size);
            let reply = client.positions().list(Some(&page), no_cb);
            print_records(settle(reply).await?)?;
        }
        Command::Salaries { month } => {
            require_session(client, Capability::ManageSalaries)?;
            let filter = month.map(PeriodFilter::month).unwrap_or_default();
            let reply = client.salaries().list(Some(&filter), no_cb);
            print_records(settle(reply).await?)?;
        }
        Command::Dashboard => {
            require_session(client, Capability::ViewDashboard)?;
            let overview: Value = settle(client.dashboard_overview(no_cb)).await?.payload;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
    }
    Ok(())
}

fn print_whoami(client: &Client) -> anyhow::Result<()> {
    let session = client.session();
    let Some(credential) = session.credential() else {
        return Err(NotLoggedInError.into());
    };
    let subject = &credential.subject;
    println!("{} ({})", subject.greeting_name(), subject.username);
    for role in subject.roles.iter() {
        println!("  role: {role}");
    }
    if session.is_valid() {
        println!(
            "Session valid until {}",
            credential.expires_at.display_as_locale_datetime()
        );
    } else {
        println!(
            "Session expired at {}",
            credential.expires_at.display_as_locale_datetime()
        );
        return Err(NotLoggedInError.into());
    }
    for capability in client.capabilities().iter() {
        println!("  {:<12} {}", capability.to_string(), capability.nav_path());
    }
    Ok(())
}

fn print_user(user: &UserRecord) {
    let status = if user.is_active { "active" } else { "locked" };
    let name = user
        .display_name
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let roles: Vec<String> = user.roles.iter().map(ToString::to_string).collect();
    println!(
        "{:>4} {:<20} {:<30} {status:<6} {}",
        user.id,
        user.username.as_ref(),
        name,
        roles.join(",")
    );
}

fn print_records(records: Success<Vec<Value>>) -> anyhow::Result<()> {
    for record in records.payload.iter() {
        println!("{}", serde_json::to_string(record)?);
    }
    print_page_info(records.page_info);
    Ok(())
}

fn print_page_info(page_info: Option<PageInfo>) {
    let Some(page) = page_info else {
        return;
    };
    let show = |value: Option<u64>| value.map(|v| v.to_string()).unwrap_or_else(|| "?".into());
    println!(
        "page {} of {} ({} records, {} per page)",
        show(page.page),
        show(page.total_pages),
        show(page.total_elements),
        show(page.page_size)
    );
}
