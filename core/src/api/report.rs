use std::fmt::Display;

use serde_json::Value;

use crate::client::{Call, JotformClient};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::NewReport;

use super::segment;

impl<T: Transport> JotformClient<T> {
    pub fn get_form_reports(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/form/{}/reports", segment(form_id))))
    }

    pub fn create_report(&self, form_id: impl Display, report: &NewReport) -> Result<Value> {
        let path = format!("/form/{}/reports", segment(form_id));
        self.call(report.apply(Call::post(path)))
    }

    pub fn get_report(&self, report_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/report/{}", segment(report_id))))
    }

    /// Permanent; the report does not go to the trash.
    pub fn delete_report(&self, report_id: impl Display) -> Result<Value> {
        self.call(Call::delete(format!("/report/{}", segment(report_id))))
    }
}
