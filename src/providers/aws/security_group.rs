use crate::core::token::StringList;
use crate::core::TerraformResource;
use serde::Serialize;

/// One ingress or egress rule.
///
/// Terraform requires every attribute of an inline rule to be present, so
/// the optional lists serialize as empty arrays rather than being skipped.
/// `self` is a Rust keyword; the flag is emitted as `self_attribute` and
/// renamed by the post-synthesis patch.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupRule {
    pub description: String,
    pub protocol: String,
    pub from_port: u16,
    pub to_port: u16,
    pub cidr_blocks: StringList,
    pub ipv6_cidr_blocks: Vec<String>,
    pub prefix_list_ids: Vec<String>,
    pub security_groups: Vec<String>,
    pub self_attribute: bool,
}

impl SecurityGroupRule {
    pub fn tcp(from_port: u16, to_port: u16, cidr_blocks: impl Into<StringList>) -> Self {
        Self {
            description: String::new(),
            protocol: "tcp".to_string(),
            from_port,
            to_port,
            cidr_blocks: cidr_blocks.into(),
            ipv6_cidr_blocks: Vec::new(),
            prefix_list_ids: Vec::new(),
            security_groups: Vec::new(),
            self_attribute: false,
        }
    }

    pub fn tcp_all(cidr_blocks: impl Into<StringList>) -> Self {
        Self::tcp(0, 65535, cidr_blocks)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SecurityGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    pub vpc_id: String,
    pub ingress: Vec<SecurityGroupRule>,
    pub egress: Vec<SecurityGroupRule>,
}

impl TerraformResource for SecurityGroup {
    const RESOURCE_TYPE: &'static str = "aws_security_group";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_keeps_empty_lists() {
        let rule = SecurityGroupRule::tcp(80, 80, vec!["0.0.0.0/0"]);
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["ipv6_cidr_blocks"], serde_json::json!([]));
        assert_eq!(value["description"], "");
        assert_eq!(value["self_attribute"], false);
        assert_eq!(value["cidr_blocks"], serde_json::json!(["0.0.0.0/0"]));
    }
}
