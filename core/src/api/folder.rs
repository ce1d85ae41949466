use std::fmt::Display;

use serde_json::Value;

use crate::client::{Call, JotformClient};
use crate::error::Result;
use crate::transport::Transport;
use crate::types::NewFolder;

use super::segment;

impl<T: Transport> JotformClient<T> {
    /// The folder with its forms and subfolders.
    pub fn get_folder(&self, folder_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/folder/{}", segment(folder_id))))
    }

    pub fn create_folder(&self, folder: &NewFolder) -> Result<Value> {
        self.call(folder.apply(Call::post("/folder")))
    }

    pub fn delete_folder(&self, folder_id: impl Display) -> Result<Value> {
        self.call(Call::delete(format!("/folder/{}", segment(folder_id))))
    }
}
