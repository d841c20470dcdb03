use crate::core::patch::Patch;
use crate::modules::vpc::VpcOptions;
use crate::utils::error::{Result, StackError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex"));

/// IAM role names are capped at 64 characters and the stack name is
/// suffixed with `-ecs-execution-role`.
pub const MAX_ENVIRONMENT_LEN: usize = 32;

const FARGATE_CPU_UNITS: [&str; 5] = ["256", "512", "1024", "2048", "4096"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    pub aws_region: String,
    pub environment: String,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub network: VpcOptions,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub synth: SynthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub aws_version: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            aws_version: "~> 2.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub container_name: String,
    pub image: String,
    pub family: String,
    pub cpu: u32,
    pub memory: u32,
    pub container_port: u16,
    pub desired_count: u32,
    pub log_stream_prefix: String,
    pub security_group_name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "blog".to_string(),
            container_name: "blog".to_string(),
            image: "npalm/040code.github.io:latest".to_string(),
            family: "test".to_string(),
            cpu: 256,
            memory: 512,
            container_port: 80,
            desired_count: 1,
            log_stream_prefix: "040code".to_string(),
            security_group_name: "blog-service".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub outdir: String,
    pub patches: Vec<Patch>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            outdir: "cdktf.out".to_string(),
            patches: vec![Patch::default()],
        }
    }
}

impl StackConfig {
    /// A configuration with every optional section at its default.
    pub fn new(aws_region: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            aws_region: aws_region.into(),
            environment: environment.into(),
            provider: ProviderConfig::default(),
            network: VpcOptions::default(),
            service: ServiceConfig::default(),
            synth: SynthConfig::default(),
        }
    }

    /// Loads a `.json` or `.toml` file; anything else is parsed as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        serde_json::from_str(&processed).map_err(|e| StackError::ConfigError {
            message: format!("JSON parsing error: {}", e),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn outdir(&self) -> &str {
        &self.synth.outdir
    }

    /// Applies command line overrides: output directory and patch opt-out.
    #[cfg(feature = "cli")]
    pub fn apply_cli(&mut self, args: &crate::config::CliConfig) {
        if let Some(outdir) = &args.outdir {
            tracing::info!("🔧 Output directory overridden to: {}", outdir);
            self.synth.outdir = outdir.clone();
        }
        if args.skip_patch {
            tracing::warn!(
                "Post-synthesis patches disabled, the document may be rejected by Terraform"
            );
            self.synth.patches.clear();
        }
    }

    /// Values copied verbatim into the document must not carry a patch
    /// pattern, or the patch would rewrite them.
    fn validate_against_patches(&self, network_name: &str) -> Result<()> {
        let service = &self.service;
        let fields = [
            ("aws_region", self.aws_region.as_str()),
            ("environment", self.environment.as_str()),
            ("network.name", network_name),
            ("service.name", service.name.as_str()),
            ("service.container_name", service.container_name.as_str()),
            ("service.image", service.image.as_str()),
            ("service.family", service.family.as_str()),
            ("service.log_stream_prefix", service.log_stream_prefix.as_str()),
            ("service.security_group_name", service.security_group_name.as_str()),
        ];

        for patch in &self.synth.patches {
            for (field, value) in fields {
                validation::validate_excludes(field, value, &patch.from)?;
            }
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_region("aws_region", &self.aws_region)?;
        validation::validate_stack_name("environment", &self.environment, MAX_ENVIRONMENT_LEN)?;
        validation::validate_non_empty_string("provider.aws_version", &self.provider.aws_version)?;

        let network = self.network.clone().with_defaults(&self.environment);
        validation::validate_cidr("network.cidr", &network.cidr)?;
        for cidr in &network.private_subnets {
            validation::validate_cidr("network.private_subnets", cidr)?;
        }
        for cidr in &network.public_subnets {
            validation::validate_cidr("network.public_subnets", cidr)?;
        }
        validation::validate_same_length(
            "network.private_subnets",
            network.azs.len(),
            network.private_subnets.len(),
            "network.azs",
        )?;
        validation::validate_same_length(
            "network.public_subnets",
            network.azs.len(),
            network.public_subnets.len(),
            "network.azs",
        )?;

        let service = &self.service;
        validation::validate_non_empty_string("service.image", &service.image)?;
        validation::validate_non_empty_string("service.name", &service.name)?;
        validation::validate_non_empty_string("service.container_name", &service.container_name)?;
        validation::validate_non_empty_string("service.family", &service.family)?;
        validation::validate_one_of("service.cpu", &service.cpu.to_string(), &FARGATE_CPU_UNITS)?;
        validation::validate_fargate_memory("service.memory", service.cpu, service.memory)?;
        validation::validate_range("service.container_port", service.container_port, 1, 65535)?;

        validation::validate_non_empty_string("synth.outdir", &self.synth.outdir)?;
        for patch in &self.synth.patches {
            patch.check()?;
        }
        self.validate_against_patches(&network.name)?;

        Ok(())
    }
}

impl Validate for StackConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_json_config() {
        let config =
            StackConfig::from_json_str(r#"{"aws_region": "eu-west-1", "environment": "blog"}"#)
                .unwrap();

        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.environment, "blog");
        assert_eq!(config.service.desired_count, 1);
        assert_eq!(config.outdir(), "cdktf.out");
        assert_eq!(config.synth.patches, vec![Patch::default()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_with_overrides() {
        let toml_content = r#"
aws_region = "eu-central-1"
environment = "staging"

[network]
cidr = "10.20.0.0/16"
azs = ["eu-central-1a", "eu-central-1b"]
private_subnets = ["10.20.1.0/24", "10.20.2.0/24"]
public_subnets = ["10.20.101.0/24", "10.20.102.0/24"]

[service]
image = "ghcr.io/example/blog:1.2.3"
cpu = 512
memory = 1024

[synth]
outdir = "out"
"#;

        let config = StackConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.network.cidr.as_deref(), Some("10.20.0.0/16"));
        assert_eq!(config.service.image, "ghcr.io/example/blog:1.2.3");
        assert_eq!(config.service.container_port, 80);
        assert_eq!(config.outdir(), "out");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BLOG_STACK_TEST_REGION", "ap-southeast-2");

        let config = StackConfig::from_json_str(
            r#"{"aws_region": "${BLOG_STACK_TEST_REGION}", "environment": "${BLOG_STACK_UNSET_VAR}"}"#,
        )
        .unwrap();
        assert_eq!(config.aws_region, "ap-southeast-2");
        assert_eq!(config.environment, "${BLOG_STACK_UNSET_VAR}");

        std::env::remove_var("BLOG_STACK_TEST_REGION");
    }

    #[test]
    fn test_validation_rejects_mismatched_subnets() {
        let mut config = StackConfig::new("eu-west-1", "blog");
        config.network.azs = Some(vec!["eu-west-1a".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = StackConfig::new("eu-west-1", "blog");
        config.service.cpu = 300;
        assert!(config.validate().is_err());

        let mut config = StackConfig::new("eu-west-1", "blog");
        config.network.cidr = Some("10.0.0.0".to_string());
        assert!(config.validate().is_err());

        let config = StackConfig::new("Ireland", "blog");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_values_carrying_patch_pattern() {
        let config = StackConfig::new("eu-west-1", "selfself_attribute_attribute");
        assert!(config.validate().is_err());

        let mut config = StackConfig::new("eu-west-1", "blog");
        config.service.image = "example/self_attribute:latest".to_string();
        assert!(config.validate().is_err());

        // Without patches the value is left alone.
        config.synth.patches.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_enforces_fargate_memory_pairing() {
        let mut config = StackConfig::new("eu-west-1", "blog");
        config.service.cpu = 256;
        config.service.memory = 4096;
        assert!(config.validate().is_err());

        config.service.cpu = 1024;
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_apply_cli_overrides() {
        use clap::Parser;

        let mut config = StackConfig::new("eu-west-1", "blog");
        let args = crate::config::CliConfig::parse_from([
            "blog-stack",
            "--outdir",
            "build/tf",
            "--skip-patch",
        ]);
        config.apply_cli(&args);
        assert_eq!(config.outdir(), "build/tf");
        assert!(config.synth.patches.is_empty());

        let mut config = StackConfig::new("eu-west-1", "blog");
        config.apply_cli(&crate::config::CliConfig::parse_from(["blog-stack"]));
        assert_eq!(config.outdir(), "cdktf.out");
        assert_eq!(config.synth.patches, vec![Patch::default()]);
    }

    #[test]
    fn test_missing_required_key_fails() {
        assert!(StackConfig::from_json_str(r#"{"aws_region": "eu-west-1"}"#).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        temp_file
            .write_all(br#"{"aws_region": "eu-west-1", "environment": "file-test"}"#)
            .unwrap();

        let config = StackConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.environment, "file-test");
    }
}
