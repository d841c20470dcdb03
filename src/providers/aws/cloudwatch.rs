use crate::core::TerraformResource;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudwatchLogGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_in_days: Option<u32>,
}

impl TerraformResource for CloudwatchLogGroup {
    const RESOURCE_TYPE: &'static str = "aws_cloudwatch_log_group";
}
