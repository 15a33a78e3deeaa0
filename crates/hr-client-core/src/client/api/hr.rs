//! Records served by the HR data backend through the account backend's proxy

use futures::channel::oneshot;
use hr_shared::{
    const_config::path::{
        PathSpec, PATH_ATTENDANCE, PATH_DASHBOARD, PATH_DEPARTMENTS, PATH_DIVIDENDS,
        PATH_EMPLOYEES, PATH_POSITIONS, PATH_REPORTS, PATH_SALARIES,
    },
    id::RecordId,
    req_args::api::hr::{EmployeeFilter, PeriodFilter},
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::{
    client::{UiCallBack, NO_ARGS},
    envelope::Envelope,
    Client,
};

/// One collection of records with the usual list/get/create/update/delete
/// routes under a common base path
///
/// Payload types are chosen by the caller
#[derive(Debug, Clone)]
pub struct Resource<'a> {
    client: &'a Client,
    base: PathSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Salary,
    Attendance,
    Financial,
}

impl<'a> Resource<'a> {
    pub fn new(client: &'a Client, base: PathSpec) -> Self {
        Self { client, base }
    }

    pub fn path(&self) -> &'static str {
        self.base.path
    }

    pub fn list<Q, U, F>(
        &self,
        query: Option<&Q>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<U>>>
    where
        Q: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.client
            .call_list(self.base.with_method(Method::GET), query, ui_notify)
    }

    pub fn get<U, F>(&self, id: RecordId, ui_notify: F) -> oneshot::Receiver<Envelope<U>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.client.call(self.base.join(id), NO_ARGS, ui_notify)
    }

    pub fn create<B, U, F>(&self, record: &B, ui_notify: F) -> oneshot::Receiver<Envelope<U>>
    where
        B: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.client
            .call(self.base.with_method(Method::POST), Some(record), ui_notify)
    }

    pub fn update<B, U, F>(
        &self,
        id: RecordId,
        record: &B,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        B: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.client.call(
            self.base.join(id).method(Method::PUT),
            Some(record),
            ui_notify,
        )
    }

    pub fn delete<F: UiCallBack>(
        &self,
        id: RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Value>> {
        self.client.call(
            self.base.join(id).method(Method::DELETE),
            NO_ARGS,
            ui_notify,
        )
    }

    /// GET a single value from a route below the base path
    pub fn fetch_at<S, Q, U, F>(
        &self,
        segment: S,
        query: Option<&Q>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        S: Display,
        Q: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.client.call(self.base.join(segment), query, ui_notify)
    }

    /// GET a list from a route below the base path
    pub fn list_at<S, Q, U, F>(
        &self,
        segment: S,
        query: Option<&Q>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<U>>>
    where
        S: Display,
        Q: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.client
            .call_list(self.base.join(segment), query, ui_notify)
    }

    /// POST to a route below the base path
    pub fn post_at<S, B, U, F>(
        &self,
        segment: S,
        body: &B,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        S: Display,
        B: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.client.call(
            self.base.join(segment).method(Method::POST),
            Some(body),
            ui_notify,
        )
    }
}

impl ReportKind {
    fn segment(&self) -> &'static str {
        match self {
            ReportKind::Salary => "salary",
            ReportKind::Attendance => "attendance",
            ReportKind::Financial => "financial",
        }
    }
}

impl Client {
    pub fn employees(&self) -> Resource<'_> {
        Resource::new(self, PATH_EMPLOYEES)
    }

    pub fn departments(&self) -> Resource<'_> {
        Resource::new(self, PATH_DEPARTMENTS)
    }

    pub fn positions(&self) -> Resource<'_> {
        Resource::new(self, PATH_POSITIONS)
    }

    pub fn salaries(&self) -> Resource<'_> {
        Resource::new(self, PATH_SALARIES)
    }

    pub fn attendance(&self) -> Resource<'_> {
        Resource::new(self, PATH_ATTENDANCE)
    }

    pub fn dividends(&self) -> Resource<'_> {
        Resource::new(self, PATH_DIVIDENDS)
    }

    pub fn dashboard(&self) -> Resource<'_> {
        Resource::new(self, PATH_DASHBOARD)
    }

    pub fn reports(&self) -> Resource<'_> {
        Resource::new(self, PATH_REPORTS)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn list_employees<U, F>(
        &self,
        filter: &EmployeeFilter,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<U>>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.employees().list(Some(filter), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn employees_in_department<U, F>(
        &self,
        department_id: RecordId,
        filter: &EmployeeFilter,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<U>>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.departments()
            .list_at(format!("{department_id}/employees"), Some(filter), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn employees_in_position<U, F>(
        &self,
        position_id: RecordId,
        filter: &EmployeeFilter,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<U>>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.positions()
            .list_at(format!("{position_id}/employees"), Some(filter), ui_notify)
    }

    #[tracing::instrument(skip(body, ui_notify))]
    pub fn generate_salaries<B, U, F>(
        &self,
        body: &B,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        B: Serialize + ?Sized,
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.salaries().post_at("generate", body, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn my_salaries<U, F>(
        &self,
        employee_id: RecordId,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<Vec<U>>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.salaries()
            .list_at("my", Some(&PeriodFilter::employee(employee_id)), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn salary_statistics<U, F>(
        &self,
        month: &str,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.salaries()
            .fetch_at("statistics", Some(&PeriodFilter::month(month)), ui_notify)
    }

    /// Without a month the backend reports on the current one
    #[tracing::instrument(skip(ui_notify))]
    pub fn attendance_statistics<U, F>(
        &self,
        month: Option<&str>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        let filter = month.map(PeriodFilter::month).unwrap_or_default();
        self.attendance()
            .fetch_at("statistics", Some(&filter), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn dashboard_overview<U, F>(&self, ui_notify: F) -> oneshot::Receiver<Envelope<U>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        self.dashboard().fetch_at("overview", NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn report<U, F>(
        &self,
        kind: ReportKind,
        year: Option<&str>,
        ui_notify: F,
    ) -> oneshot::Receiver<Envelope<U>>
    where
        U: DeserializeOwned + Send + 'static,
        F: UiCallBack,
    {
        let query = year.map(|year| [("year", year)]);
        self.reports()
            .fetch_at(kind.segment(), query.as_ref(), ui_notify)
    }
}
