use crate::core::token::StringList;
use crate::core::TerraformResource;
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct EcsCluster {
    pub name: String,
}

impl TerraformResource for EcsCluster {
    const RESOURCE_TYPE: &'static str = "aws_ecs_cluster";
}

// Container definitions follow the ECS API casing, not Terraform's.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    pub container_port: u16,
    pub host_port: u16,
    pub protocol: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfiguration {
    pub log_driver: String,
    pub options: BTreeMap<String, String>,
}

impl LogConfiguration {
    pub fn awslogs(group: &str, region: &str, stream_prefix: &str) -> Self {
        let options = BTreeMap::from([
            ("awslogs-group".to_string(), group.to_string()),
            ("awslogs-region".to_string(), region.to_string()),
            ("awslogs-stream-prefix".to_string(), stream_prefix.to_string()),
        ]);
        Self {
            log_driver: "awslogs".to_string(),
            options,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    pub name: String,
    pub image: String,
    pub essential: bool,
    pub port_mappings: Vec<PortMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfiguration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EcsTaskDefinition {
    pub family: String,
    pub cpu: String,
    pub memory: String,
    /// JSON-encoded list of container definitions.
    pub container_definitions: String,
    pub network_mode: String,
    pub requires_compatibilities: Vec<String>,
    pub execution_role_arn: String,
}

impl EcsTaskDefinition {
    pub fn encode_containers(containers: &[ContainerDefinition]) -> Result<String> {
        Ok(serde_json::to_string(containers)?)
    }
}

impl TerraformResource for EcsTaskDefinition {
    const RESOURCE_TYPE: &'static str = "aws_ecs_task_definition";
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceLoadBalancer {
    pub target_group_arn: String,
    pub container_name: String,
    pub container_port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceNetworkConfiguration {
    pub security_groups: Vec<String>,
    pub subnets: StringList,
    pub assign_public_ip: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EcsService {
    pub name: String,
    pub cluster: String,
    pub task_definition: String,
    pub desired_count: u32,
    pub launch_type: String,
    pub load_balancer: Vec<ServiceLoadBalancer>,
    pub network_configuration: Vec<ServiceNetworkConfiguration>,
}

impl TerraformResource for EcsService {
    const RESOURCE_TYPE: &'static str = "aws_ecs_service";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_definitions_use_ecs_casing() {
        let containers = vec![ContainerDefinition {
            name: "blog".to_string(),
            image: "nginx:latest".to_string(),
            essential: true,
            port_mappings: vec![PortMapping {
                container_port: 80,
                host_port: 80,
                protocol: "tcp".to_string(),
            }],
            log_configuration: Some(LogConfiguration::awslogs(
                "${aws_cloudwatch_log_group.log.name}",
                "eu-west-1",
                "blog",
            )),
        }];

        let encoded = EcsTaskDefinition::encode_containers(&containers).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded[0]["portMappings"][0]["containerPort"], 80);
        assert_eq!(decoded[0]["logConfiguration"]["logDriver"], "awslogs");
        assert_eq!(
            decoded[0]["logConfiguration"]["options"]["awslogs-group"],
            "${aws_cloudwatch_log_group.log.name}"
        );
    }
}
