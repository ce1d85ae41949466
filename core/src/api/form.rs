use std::fmt::Display;

use serde_json::Value;

use crate::client::{Call, JotformClient};
use crate::error::Result;
use crate::http::Params;
use crate::transport::Transport;

use super::segment;

/// Forms, their fields, properties, files and webhooks.
impl<T: Transport> JotformClient<T> {
    /// `form` uses the service's bracketed keys, e.g. `properties[title]`,
    /// `questions[0][type]`.
    pub fn create_form(&self, form: &Params) -> Result<Value> {
        self.call(Call::post("/form").params(form.clone()))
    }

    pub fn get_form(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/form/{}", segment(form_id))))
    }

    /// Moves the form to the trash; it is deleted for good after 30 days.
    pub fn trash_form(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::delete(format!("/form/{}", segment(form_id))))
    }

    pub fn clone_form(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::post(format!("/form/{}/clone", segment(form_id))))
    }

    pub fn archive_form(&self, form_id: impl Display) -> Result<Value> {
        let path = format!("/form/{}/archive?archive=1", segment(form_id));
        self.call(Call::post(path))
    }

    pub fn unarchive_form(&self, form_id: impl Display) -> Result<Value> {
        let path = format!("/form/{}/archive?archive=0", segment(form_id));
        self.call(Call::post(path))
    }

    /// Files uploaded through the form's submissions.
    pub fn get_form_files(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/form/{}/files", segment(form_id))))
    }

    pub fn get_form_fields(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/form/{}/questions", segment(form_id))))
    }

    /// `field` uses `question[...]` keys, e.g. `question[type]`,
    /// `question[text]`, `question[order]`.
    pub fn add_form_field(&self, form_id: impl Display, field: &Params) -> Result<Value> {
        let path = format!("/form/{}/questions", segment(form_id));
        self.call(Call::post(path).params(field.clone()))
    }

    pub fn get_form_field(&self, form_id: impl Display, field_id: impl Display) -> Result<Value> {
        let path = format!("/form/{}/question/{}", segment(form_id), segment(field_id));
        self.call(Call::get(path))
    }

    pub fn update_form_field(
        &self,
        form_id: impl Display,
        field_id: impl Display,
        field: &Params,
    ) -> Result<Value> {
        let path = format!("/form/{}/question/{}", segment(form_id), segment(field_id));
        self.call(Call::post(path).params(field.clone()))
    }

    pub fn delete_form_field(
        &self,
        form_id: impl Display,
        field_id: impl Display,
    ) -> Result<Value> {
        let path = format!("/form/{}/question/{}", segment(form_id), segment(field_id));
        self.call(Call::delete(path))
    }

    pub fn get_form_properties(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/form/{}/properties", segment(form_id))))
    }

    /// `properties` uses `properties[...]` keys, e.g. `properties[title]`.
    pub fn update_form_properties(
        &self,
        form_id: impl Display,
        properties: &Params,
    ) -> Result<Value> {
        let path = format!("/form/{}/properties", segment(form_id));
        self.call(Call::post(path).params(properties.clone()))
    }

    pub fn get_form_property(&self, form_id: impl Display, key: &str) -> Result<Value> {
        let path = format!("/form/{}/properties/{}", segment(form_id), segment(key));
        self.call(Call::get(path))
    }

    pub fn get_form_webhooks(&self, form_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/form/{}/webhooks", segment(form_id))))
    }

    pub fn add_form_webhook(&self, form_id: impl Display, webhook_url: &str) -> Result<Value> {
        let path = format!("/form/{}/webhooks", segment(form_id));
        self.call(Call::post(path).param("webhookURL", webhook_url))
    }

    pub fn delete_form_webhook(
        &self,
        form_id: impl Display,
        webhook_id: impl Display,
    ) -> Result<Value> {
        let path = format!("/form/{}/webhooks/{}", segment(form_id), segment(webhook_id));
        self.call(Call::delete(path))
    }
}
