use serde_json::Value;

use crate::client::{Call, JotformClient};
use crate::error::Result;
use crate::http::Params;
use crate::transport::Transport;
use crate::types::{Credentials, HistoryOptions, ListOptions};

/// Account-level endpoints.
impl<T: Transport> JotformClient<T> {
    /// Account details: type, avatar, name, email, website.
    pub fn get_user(&self) -> Result<Value> {
        self.call(Call::get("/user"))
    }

    /// Monthly usage: submissions, form count, agent and API usage.
    pub fn get_usage(&self) -> Result<Value> {
        self.call(Call::get("/user/usage"))
    }

    pub fn get_user_submissions(&self, options: &ListOptions) -> Result<Value> {
        self.call(options.apply(Call::get("/user/submissions")))
    }

    /// Sub-user accounts.
    ///
    /// Only legacy plans still have this feature; other accounts get a 401
    /// payload back.
    pub fn get_user_subusers(&self) -> Result<Value> {
        self.call(Call::get("/user/subusers"))
    }

    pub fn get_user_folders(&self) -> Result<Value> {
        self.call(Call::get("/user/folders"))
    }

    pub fn get_user_reports(&self) -> Result<Value> {
        self.call(Call::get("/user/reports"))
    }

    pub fn login(&self, credentials: &Credentials) -> Result<Value> {
        self.call(credentials.apply(Call::post("/user/login")))
    }

    pub fn logout(&self) -> Result<Value> {
        self.call(Call::get("/v1/user/logout"))
    }

    /// Username, time zone, email, account status.
    pub fn get_user_settings(&self) -> Result<Value> {
        self.call(Call::get("/user/settings"))
    }

    /// Keys are the setting names returned by [`get_user_settings`](Self::get_user_settings).
    pub fn update_user_settings(&self, settings: &Params) -> Result<Value> {
        self.call(Call::post("/user/settings").params(settings.clone()))
    }

    pub fn get_user_history(&self, options: &HistoryOptions) -> Result<Value> {
        self.call(options.apply(Call::get("/user/history")))
    }

    pub fn get_user_forms(&self, options: &ListOptions) -> Result<Value> {
        self.call(options.apply(Call::get("/user/forms")))
    }

    /// Apps (portals) on the account.
    pub fn get_apps(&self) -> Result<Value> {
        self.call(Call::get("/user/portals"))
    }

    pub fn get_sender_emails(&self) -> Result<Value> {
        self.call(Call::get("/smtpConfig/user/all"))
    }
}
