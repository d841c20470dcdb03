//! The blog service deployment: VPC, Fargate service behind an ALB.

use crate::adapters::LocalStorage;
use crate::config::StackConfig;
use crate::core::app::App;
use crate::core::stack::TerraformStack;
use crate::core::token::Reference;
use crate::core::{ResourceMeta, SynthOutput, TerraformOutput};
use crate::modules::vpc::Vpc;
use crate::providers::aws::{
    Alb, AlbListener, AlbTargetGroup, AwsProvider, CloudwatchLogGroup, ContainerDefinition,
    DataAwsIamPolicyDocument, EcsCluster, EcsService, EcsTaskDefinition, IamRole,
    IamRolePolicyAttachment, ListenerDefaultAction, LogConfiguration, PortMapping, SecurityGroup,
    SecurityGroupRule, ServiceLoadBalancer, ServiceNetworkConfiguration,
};
use crate::utils::error::Result;

pub const EXECUTION_ROLE_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AmazonECSTaskExecutionRolePolicy";
pub const ANYWHERE: &str = "0.0.0.0/0";
pub const HTTP_PORT: u16 = 80;

/// References to the constructs other code may want to wire against.
#[derive(Debug, Clone)]
pub struct BlogStack {
    pub stack: TerraformStack,
    pub vpc: Vpc,
    pub cluster: Reference,
    pub alb: Reference,
    pub listener: Reference,
    pub service: Reference,
}

impl BlogStack {
    pub fn new(config: &StackConfig) -> Result<Self> {
        let name = config.environment.as_str();
        let service_config = &config.service;
        let mut stack = TerraformStack::new(name);

        stack.add_provider(
            &AwsProvider {
                region: config.aws_region.clone(),
            },
            &config.provider.aws_version,
        )?;

        let log_group = stack.add_resource(
            "log",
            &CloudwatchLogGroup {
                name_prefix: Some(name.to_string()),
                ..Default::default()
            },
        )?;

        let vpc = Vpc::new(&mut stack, "vpc", config.network.clone())?;

        let cluster = stack.add_resource(
            "cluster",
            &EcsCluster {
                name: name.to_string(),
            },
        )?;

        let policy = stack.add_data(
            "policy",
            &DataAwsIamPolicyDocument::assume_role_for_service("ecs-tasks.amazonaws.com"),
        )?;

        let execution_role = stack.add_resource(
            "executionRole",
            &IamRole {
                name: format!("{}-ecs-execution-role", name),
                assume_role_policy: policy.attr("json"),
            },
        )?;

        stack.add_resource(
            "executionRoleAttachment",
            &IamRolePolicyAttachment {
                role: execution_role.attr("name"),
                policy_arn: EXECUTION_ROLE_POLICY_ARN.to_string(),
            },
        )?;

        let containers = vec![ContainerDefinition {
            name: service_config.container_name.clone(),
            image: service_config.image.clone(),
            essential: true,
            port_mappings: vec![PortMapping {
                container_port: service_config.container_port,
                host_port: service_config.container_port,
                protocol: "tcp".to_string(),
            }],
            log_configuration: Some(LogConfiguration::awslogs(
                &log_group.attr("name"),
                &config.aws_region,
                &service_config.log_stream_prefix,
            )),
        }];

        let task_definition = stack.add_resource(
            "taskDefinition",
            &EcsTaskDefinition {
                family: service_config.family.clone(),
                cpu: service_config.cpu.to_string(),
                memory: service_config.memory.to_string(),
                container_definitions: EcsTaskDefinition::encode_containers(&containers)?,
                network_mode: "awsvpc".to_string(),
                requires_compatibilities: vec!["FARGATE".to_string()],
                execution_role_arn: execution_role.attr("arn"),
            },
        )?;

        let sg_alb = stack.add_resource(
            "sgAlb",
            &SecurityGroup {
                name_prefix: Some(format!("{}-alb", name)),
                vpc_id: vpc.vpc_id(),
                ingress: vec![SecurityGroupRule::tcp(HTTP_PORT, HTTP_PORT, vec![ANYWHERE])],
                egress: vec![SecurityGroupRule::tcp_all(vec![vpc.vpc_cidr_block()])],
                ..Default::default()
            },
        )?;

        let sg_service = stack.add_resource(
            "sgService",
            &SecurityGroup {
                name: Some(service_config.security_group_name.clone()),
                vpc_id: vpc.vpc_id(),
                ingress: vec![SecurityGroupRule::tcp_all(vec![vpc.vpc_cidr_block()])],
                egress: vec![SecurityGroupRule::tcp_all(vec![ANYWHERE])],
                ..Default::default()
            },
        )?;

        let alb = stack.add_resource(
            "alb",
            &Alb {
                internal: false,
                subnets: vpc.public_subnet_ids(),
                security_groups: vec![sg_alb.attr("id")],
            },
        )?;

        let target = stack.add_resource(
            "target",
            &AlbTargetGroup {
                port: HTTP_PORT,
                protocol: "HTTP".to_string(),
                vpc_id: vpc.vpc_id(),
                target_type: "ip".to_string(),
            },
        )?;

        let listener = stack.add_resource(
            "listener",
            &AlbListener {
                port: HTTP_PORT,
                load_balancer_arn: alb.attr("arn"),
                default_action: vec![ListenerDefaultAction::forward(target.attr("arn"))],
            },
        )?;

        // Terraform does not infer that the target group must be attached to a
        // listener before the service registers with it.
        let service = stack.add_resource_with(
            "service",
            &EcsService {
                name: service_config.name.clone(),
                cluster: cluster.attr("id"),
                task_definition: task_definition.attr("arn"),
                desired_count: service_config.desired_count,
                launch_type: "FARGATE".to_string(),
                load_balancer: vec![ServiceLoadBalancer {
                    target_group_arn: target.attr("arn"),
                    container_name: service_config.container_name.clone(),
                    container_port: service_config.container_port,
                }],
                network_configuration: vec![ServiceNetworkConfiguration {
                    security_groups: vec![sg_service.attr("id")],
                    subnets: vpc.private_subnet_ids(),
                    assign_public_ip: false,
                }],
            },
            ResourceMeta::depends_on([listener.address()]),
        )?;

        stack.add_output(
            "blog_url",
            TerraformOutput {
                value: format!("http://{}", alb.attr("dns_name")),
                description: Some("Public URL of the blog load balancer".to_string()),
                sensitive: false,
            },
        )?;

        tracing::info!(stack = name, region = %config.aws_region, "Declared blog stack");

        Ok(Self {
            stack,
            vpc,
            cluster,
            alb,
            listener,
            service,
        })
    }

    /// Builds the stack and writes `cdk.tf.json` under the configured
    /// output directory. A dry run patches in memory and writes nothing.
    pub async fn synthesize(config: &StackConfig, dry_run: bool) -> Result<SynthOutput> {
        let blog = Self::new(config)?;
        let app = App::with_patches(
            LocalStorage::new(config.outdir()),
            config.synth.patches.clone(),
        );

        if dry_run {
            tracing::info!("🔍 DRY RUN MODE - nothing will be written");
            return app.synth_in_memory(&blog.stack);
        }
        app.synth(&blog.stack).await
    }
}
