//! Request payloads for endpoints that take more than an id.
//!
//! # Design
//! Responses stay untyped `serde_json::Value`s; only the inputs get structs.
//! Each type knows how to add itself to a [`Call`], omitting unset optional
//! fields so the service applies its own defaults. The serde derives let the
//! same values be loaded from JSON fixtures or config files.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::Call;

/// Paging, filtering and ordering for listing endpoints.
///
/// `filter` is the JSON filter string the service expects, e.g.
/// `{"status:ne":"DELETED"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub(crate) fn apply(&self, call: Call) -> Call {
        call.param_opt("offset", self.offset)
            .param_opt("limit", self.limit)
            .param_opt("filter", self.filter.as_deref())
            .param_opt("orderby", self.order_by.as_deref())
    }
}

/// Filters for the account activity log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryOptions {
    /// e.g. `all`, `userCreation`, `formCreation`, `formDelete`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// e.g. `lastWeek`, `lastMonth`, `last3Months`, `lastYear`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `ASC` or `DESC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// `MM/DD/YYYY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl HistoryOptions {
    pub(crate) fn apply(&self, call: Call) -> Call {
        call.param_opt("action", self.action.as_deref())
            .param_opt("date", self.date.as_deref())
            .param_opt("sortBy", self.sort_by.as_deref())
            .param_opt("startDate", self.start_date.as_deref())
            .param_opt("endDate", self.end_date.as_deref())
    }
}

/// Access level requested at login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Access {
    #[default]
    Full,
    ReadOnly,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Full => "full",
            Access::ReadOnly => "readOnly",
        }
    }
}

/// Username/password login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub access: Access,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            app_name: String::new(),
            access: Access::Full,
        }
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub(crate) fn apply(&self, call: Call) -> Call {
        call.param("username", &self.username)
            .param("password", &self.password)
            .param("appName", &self.app_name)
            .param("access", self.access.as_str())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("app_name", &self.app_name)
            .field("access", &self.access)
            .finish()
    }
}

/// Output format of a form report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Csv,
    Excel,
    Grid,
    Table,
    Rss,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Csv => "csv",
            ReportType::Excel => "excel",
            ReportType::Grid => "grid",
            ReportType::Table => "table",
            ReportType::Rss => "rss",
        }
    }
}

/// A report to create on a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub report_type: ReportType,
    /// Comma-separated field list, e.g. `ip,dt,1,3,4`. All fields when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl NewReport {
    pub fn new(title: impl Into<String>, report_type: ReportType) -> Self {
        Self {
            title: title.into(),
            report_type,
            fields: None,
        }
    }

    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub(crate) fn apply(&self, call: Call) -> Call {
        call.param("title", &self.title)
            .param("list_type", self.report_type.as_str())
            .param_opt("fields", self.fields.as_deref())
    }
}

/// A folder to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFolder {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Hex color such as `#FFEEDD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            color: None,
        }
    }

    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent = Some(parent_id.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(crate) fn apply(&self, call: Call) -> Call {
        call.param("name", &self.name)
            .param_opt("parent", self.parent.as_deref())
            .param_opt("color", self.color.as_deref())
    }
}

/// Parameters for rendering a submission as PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfRequest {
    pub form_id: String,
    pub submission_id: String,
    /// PDF report design to use; the form's default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    /// Ask for the file itself instead of a JSON envelope with its URL.
    /// The file is not JSON, so `generate_pdf` fails to decode it.
    #[serde(default)]
    pub download: bool,
}

impl PdfRequest {
    pub fn new(form_id: impl fmt::Display, submission_id: impl fmt::Display) -> Self {
        Self {
            form_id: form_id.to_string(),
            submission_id: submission_id.to_string(),
            report_id: None,
            download: false,
        }
    }

    pub fn report_id(mut self, report_id: impl fmt::Display) -> Self {
        self.report_id = Some(report_id.to_string());
        self
    }

    pub fn download(mut self, download: bool) -> Self {
        self.download = download;
        self
    }

    pub(crate) fn apply(&self, call: Call) -> Call {
        call.param("formid", &self.form_id)
            .param("submissionid", &self.submission_id)
            .param_opt("reportid", self.report_id.as_deref())
            .param("download", if self.download { "1" } else { "0" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_of(call: Call) -> Vec<(String, String)> {
        call.params.into_iter().collect()
    }

    #[test]
    fn empty_list_options_add_nothing() {
        let call = ListOptions::default().apply(Call::get("/user/forms"));
        assert!(call.params.is_empty());
    }

    #[test]
    fn list_options_use_wire_names() {
        let opts = ListOptions::new().limit(5).order_by("created_at");
        let call = opts.apply(Call::get("/user/forms"));
        assert_eq!(
            params_of(call),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("orderby".to_string(), "created_at".to_string()),
            ]
        );
    }

    #[test]
    fn history_options_use_camel_case() {
        let opts = HistoryOptions {
            sort_by: Some("DESC".into()),
            start_date: Some("01/01/2024".into()),
            ..Default::default()
        };
        let call = opts.apply(Call::get("/user/history"));
        assert_eq!(call.params.get("sortBy").map(String::as_str), Some("DESC"));
        assert_eq!(call.params.get("startDate").map(String::as_str), Some("01/01/2024"));
        assert_eq!(call.params.len(), 2);
    }

    #[test]
    fn credentials_defaults() {
        let creds: Credentials =
            serde_json::from_str(r#"{"username":"u","password":"p"}"#).unwrap();
        assert_eq!(creds.access, Access::Full);
        let call = creds.apply(Call::post("/user/login"));
        assert_eq!(call.params.get("appName").map(String::as_str), Some(""));
        assert_eq!(call.params.get("access").map(String::as_str), Some("full"));
    }

    #[test]
    fn access_serializes_like_the_wire_value() {
        assert_eq!(serde_json::to_value(Access::ReadOnly).unwrap(), "readOnly");
        assert_eq!(Access::ReadOnly.as_str(), "readOnly");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("me", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn report_type_names() {
        for (ty, name) in [
            (ReportType::Csv, "csv"),
            (ReportType::Excel, "excel"),
            (ReportType::Grid, "grid"),
            (ReportType::Table, "table"),
            (ReportType::Rss, "rss"),
        ] {
            assert_eq!(ty.as_str(), name);
            assert_eq!(serde_json::to_value(ty).unwrap(), name);
        }
    }

    #[test]
    fn report_without_fields_omits_them() {
        let call = NewReport::new("Weekly", ReportType::Csv).apply(Call::post("/form/1/reports"));
        assert!(!call.params.contains_key("fields"));
        assert_eq!(call.params.get("list_type").map(String::as_str), Some("csv"));
    }

    #[test]
    fn folder_optional_fields_are_omitted() {
        let call = NewFolder::new("Archive").apply(Call::post("/folder"));
        assert_eq!(params_of(call), vec![("name".to_string(), "Archive".to_string())]);

        let call = NewFolder::new("Archive")
            .parent("abc")
            .color("#FFEEDD")
            .apply(Call::post("/folder"));
        assert_eq!(call.params.len(), 3);
    }

    #[test]
    fn pdf_request_defaults_to_no_download() {
        let call = PdfRequest::new(1, 2).apply(Call::get("/generatePDF"));
        assert_eq!(call.params.get("download").map(String::as_str), Some("0"));
        assert!(!call.params.contains_key("reportid"));

        let call = PdfRequest::new(1, 2)
            .report_id(3)
            .download(true)
            .apply(Call::get("/generatePDF"));
        assert_eq!(call.params.get("download").map(String::as_str), Some("1"));
        assert_eq!(call.params.get("reportid").map(String::as_str), Some("3"));
    }
}
