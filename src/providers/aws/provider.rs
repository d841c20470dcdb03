use crate::core::TerraformProvider;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AwsProvider {
    pub region: String,
}

impl TerraformProvider for AwsProvider {
    const NAME: &'static str = "aws";
    const SOURCE: &'static str = "hashicorp/aws";
}
