use std::fmt::Display;

use serde_json::Value;

use crate::client::{Call, JotformClient};
use crate::error::Result;
use crate::http::Params;
use crate::transport::Transport;
use crate::types::{ListOptions, PdfRequest};

use super::segment;

impl<T: Transport> JotformClient<T> {
    pub fn get_form_submissions(
        &self,
        form_id: impl Display,
        options: &ListOptions,
    ) -> Result<Value> {
        let path = format!("/form/{}/submissions", segment(form_id));
        self.call(options.apply(Call::get(path)))
    }

    /// `submission` is keyed by question id, e.g. `submission[3]`, or
    /// `submission[4_first]` for compound fields.
    pub fn create_submission(&self, form_id: impl Display, submission: &Params) -> Result<Value> {
        let path = format!("/form/{}/submissions", segment(form_id));
        self.call(Call::post(path).params(submission.clone()))
    }

    pub fn get_submission(&self, submission_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/submission/{}", segment(submission_id))))
    }

    pub fn update_submission(
        &self,
        submission_id: impl Display,
        submission: &Params,
    ) -> Result<Value> {
        let path = format!("/submission/{}", segment(submission_id));
        self.call(Call::post(path).params(submission.clone()))
    }

    /// Permanent; the submission does not go to the trash.
    pub fn delete_submission(&self, submission_id: impl Display) -> Result<Value> {
        self.call(Call::delete(format!("/submission/{}", segment(submission_id))))
    }

    pub fn get_submission_thread(&self, submission_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/submission/{}/thread", segment(submission_id))))
    }

    /// With `download` set the service answers with the PDF bytes, which
    /// surfaces as [`ApiError::Decode`](crate::ApiError::Decode) holding the body.
    pub fn generate_pdf(&self, request: &PdfRequest) -> Result<Value> {
        self.call(request.apply(Call::get("/generatePDF")))
    }
}
