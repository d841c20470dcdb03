//! AWS provider bindings.

pub mod cloudwatch;
pub mod ecs;
pub mod elb;
pub mod iam;
pub mod provider;
pub mod security_group;

pub use cloudwatch::CloudwatchLogGroup;
pub use ecs::{
    ContainerDefinition, EcsCluster, EcsService, EcsTaskDefinition, LogConfiguration,
    PortMapping, ServiceLoadBalancer, ServiceNetworkConfiguration,
};
pub use elb::{Alb, AlbListener, AlbTargetGroup, ListenerDefaultAction};
pub use iam::{
    DataAwsIamPolicyDocument, IamRole, IamRolePolicyAttachment, PolicyPrincipal, PolicyStatement,
};
pub use provider::AwsProvider;
pub use security_group::{SecurityGroup, SecurityGroupRule};
