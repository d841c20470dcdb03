//! The `terraform-aws-modules/vpc/aws` module with fixed defaults.

use crate::core::stack::TerraformStack;
use crate::core::token::{Reference, StringList};
use crate::core::TerraformModule;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODULE_VERSION: &str = "~> 2.0";
pub const DEFAULT_CIDR: &str = "10.0.0.0/16";
pub const DEFAULT_AZS: [&str; 3] = ["eu-west-1a", "eu-west-1b", "eu-west-1c"];
pub const DEFAULT_PRIVATE_SUBNETS: [&str; 3] = ["10.0.1.0/24", "10.0.2.0/24", "10.0.3.0/24"];
pub const DEFAULT_PUBLIC_SUBNETS: [&str; 3] = ["10.0.101.0/24", "10.0.102.0/24", "10.0.103.0/24"];

/// Caller overrides; anything left unset falls back to the defaults above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VpcOptions {
    pub name: Option<String>,
    pub cidr: Option<String>,
    pub azs: Option<Vec<String>>,
    pub private_subnets: Option<Vec<String>>,
    pub public_subnets: Option<Vec<String>>,
    pub enable_nat_gateway: Option<bool>,
    pub single_nat_gateway: Option<bool>,
    pub module_version: Option<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl VpcOptions {
    /// Fills every unset option from the defaults. Caller values win.
    pub fn with_defaults(self, name: &str) -> VpcModule {
        VpcModule {
            name: self.name.unwrap_or_else(|| name.to_string()),
            cidr: self.cidr.unwrap_or_else(|| DEFAULT_CIDR.to_string()),
            azs: self.azs.unwrap_or_else(|| owned(&DEFAULT_AZS)),
            private_subnets: self
                .private_subnets
                .unwrap_or_else(|| owned(&DEFAULT_PRIVATE_SUBNETS)),
            public_subnets: self
                .public_subnets
                .unwrap_or_else(|| owned(&DEFAULT_PUBLIC_SUBNETS)),
            enable_nat_gateway: self.enable_nat_gateway.unwrap_or(true),
            single_nat_gateway: self.single_nat_gateway,
            version: self
                .module_version
                .unwrap_or_else(|| DEFAULT_MODULE_VERSION.to_string()),
        }
    }
}

/// Resolved module inputs as written to the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpcModule {
    pub name: String,
    pub cidr: String,
    pub azs: Vec<String>,
    pub private_subnets: Vec<String>,
    pub public_subnets: Vec<String>,
    pub enable_nat_gateway: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_nat_gateway: Option<bool>,
    #[serde(skip)]
    pub version: String,
}

impl TerraformModule for VpcModule {
    const SOURCE: &'static str = "terraform-aws-modules/vpc/aws";

    fn version(&self) -> Option<&str> {
        Some(&self.version)
    }
}

/// A declared VPC module and its outputs.
#[derive(Debug, Clone)]
pub struct Vpc {
    reference: Reference,
    inputs: VpcModule,
}

impl Vpc {
    pub fn new(stack: &mut TerraformStack, id: &str, options: VpcOptions) -> Result<Self> {
        let inputs = options.with_defaults(stack.name());
        let reference = stack.add_module(id, &inputs)?;
        tracing::debug!(cidr = %inputs.cidr, azs = inputs.azs.len(), "Declared VPC module");
        Ok(Self { reference, inputs })
    }

    pub fn inputs(&self) -> &VpcModule {
        &self.inputs
    }

    pub fn private_subnet_ids(&self) -> StringList {
        self.reference.list_attr("private_subnets")
    }

    pub fn public_subnet_ids(&self) -> StringList {
        self.reference.list_attr("public_subnets")
    }

    pub fn vpc_id(&self) -> String {
        self.reference.attr("vpc_id")
    }

    pub fn vpc_cidr_block(&self) -> String {
        self.reference.attr("vpc_cidr_block")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_fill_unset_options() {
        let module = VpcOptions::default().with_defaults("blog");
        assert_eq!(module.name, "blog");
        assert_eq!(module.cidr, "10.0.0.0/16");
        assert_eq!(module.azs, vec!["eu-west-1a", "eu-west-1b", "eu-west-1c"]);
        assert_eq!(module.public_subnets[2], "10.0.103.0/24");
        assert!(module.enable_nat_gateway);
        assert_eq!(module.version, DEFAULT_MODULE_VERSION);
    }

    #[test]
    fn test_caller_options_win() {
        let options = VpcOptions {
            cidr: Some("172.16.0.0/16".to_string()),
            azs: Some(vec!["us-east-1a".to_string()]),
            enable_nat_gateway: Some(false),
            ..Default::default()
        };
        let module = options.with_defaults("blog");
        assert_eq!(module.cidr, "172.16.0.0/16");
        assert_eq!(module.azs, vec!["us-east-1a"]);
        assert!(!module.enable_nat_gateway);
        assert_eq!(module.private_subnets.len(), 3);
    }

    #[test]
    fn test_outputs_are_module_tokens() {
        let mut stack = TerraformStack::new("blog");
        let vpc = Vpc::new(&mut stack, "vpc", VpcOptions::default()).unwrap();

        assert_eq!(
            vpc.private_subnet_ids(),
            StringList::Expression("${module.vpc.private_subnets}".to_string())
        );
        assert_eq!(vpc.vpc_id(), "${module.vpc.vpc_id}");
        assert_eq!(vpc.vpc_cidr_block(), "${module.vpc.vpc_cidr_block}");

        let module = &stack.to_document()["module"]["vpc"];
        assert_eq!(module["enable_nat_gateway"], true);
        assert!(module.get("single_nat_gateway").is_none());
    }
}
