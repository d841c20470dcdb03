use crate::core::token::StringList;
use crate::core::TerraformResource;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Alb {
    pub internal: bool,
    pub subnets: StringList,
    pub security_groups: Vec<String>,
}

impl TerraformResource for Alb {
    const RESOURCE_TYPE: &'static str = "aws_alb";
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbTargetGroup {
    pub port: u16,
    pub protocol: String,
    pub vpc_id: String,
    pub target_type: String,
}

impl TerraformResource for AlbTargetGroup {
    const RESOURCE_TYPE: &'static str = "aws_alb_target_group";
}

#[derive(Debug, Clone, Serialize)]
pub struct ListenerDefaultAction {
    pub target_group_arn: String,
    #[serde(rename = "type")]
    pub action_type: String,
}

impl ListenerDefaultAction {
    pub fn forward(target_group_arn: String) -> Self {
        Self {
            target_group_arn,
            action_type: "forward".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbListener {
    pub port: u16,
    pub load_balancer_arn: String,
    pub default_action: Vec<ListenerDefaultAction>,
}

impl TerraformResource for AlbListener {
    const RESOURCE_TYPE: &'static str = "aws_alb_listener";
}
