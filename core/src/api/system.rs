use std::fmt::Display;

use serde_json::Value;

use crate::client::{Call, JotformClient};
use crate::error::Result;
use crate::transport::Transport;

use super::segment;

/// Plans, apps and AI agents.
impl<T: Transport> JotformClient<T> {
    /// Usage limits and pricing for a plan such as `FREE`, `BRONZE`, `GOLD`.
    pub fn get_plan(&self, plan_name: &str) -> Result<Value> {
        self.call(Call::get(format!("/system/plan/{}", segment(plan_name))))
    }

    pub fn get_app(&self, app_id: impl Display) -> Result<Value> {
        self.call(Call::get(format!("/portal/{}", segment(app_id))))
    }

    pub fn get_agents(&self) -> Result<Value> {
        self.call(Call::get("/ai-agent-builder/agents"))
    }

    pub fn get_agent(&self, agent_id: impl Display) -> Result<Value> {
        let path = format!("/ai-agent-builder/agents/{}", segment(agent_id));
        self.call(Call::get(path))
    }
}
