use crate::core::{TerraformDataSource, TerraformResource};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PolicyPrincipal {
    #[serde(rename = "type")]
    pub principal_type: String,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PolicyStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub principals: Vec<PolicyPrincipal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataAwsIamPolicyDocument {
    pub statement: Vec<PolicyStatement>,
}

impl DataAwsIamPolicyDocument {
    /// Trust policy letting an AWS service assume the role.
    pub fn assume_role_for_service(service: &str) -> Self {
        Self {
            statement: vec![PolicyStatement {
                actions: vec!["sts:AssumeRole".to_string()],
                principals: vec![PolicyPrincipal {
                    principal_type: "Service".to_string(),
                    identifiers: vec![service.to_string()],
                }],
                ..Default::default()
            }],
        }
    }
}

impl TerraformDataSource for DataAwsIamPolicyDocument {
    const DATA_TYPE: &'static str = "aws_iam_policy_document";
}

#[derive(Debug, Clone, Serialize)]
pub struct IamRole {
    pub name: String,
    pub assume_role_policy: String,
}

impl TerraformResource for IamRole {
    const RESOURCE_TYPE: &'static str = "aws_iam_role";
}

#[derive(Debug, Clone, Serialize)]
pub struct IamRolePolicyAttachment {
    pub role: String,
    pub policy_arn: String,
}

impl TerraformResource for IamRolePolicyAttachment {
    const RESOURCE_TYPE: &'static str = "aws_iam_role_policy_attachment";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_role_document_shape() {
        let policy = DataAwsIamPolicyDocument::assume_role_for_service("ecs-tasks.amazonaws.com");
        assert_eq!(
            serde_json::to_value(&policy).unwrap(),
            serde_json::json!({
                "statement": [{
                    "actions": ["sts:AssumeRole"],
                    "principals": [{ "type": "Service", "identifiers": ["ecs-tasks.amazonaws.com"] }]
                }]
            })
        );
    }
}
