use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "blog-stack")]
#[command(about = "Synthesize the blog service deployment into a Terraform JSON document")]
pub struct CliConfig {
    /// Path to the stack configuration (.json or .toml)
    #[arg(short, long, default_value = "config.json")]
    pub config: String,

    /// Override the output directory from the configuration
    #[arg(short, long)]
    pub outdir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print the patched document to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Write the document without running the post-synthesis patches
    #[arg(long)]
    pub skip_patch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["blog-stack"]);
        assert_eq!(config.config, "config.json");
        assert!(config.outdir.is_none());
        assert!(!config.dry_run);
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "blog-stack",
            "--config",
            "stack.toml",
            "-o",
            "out",
            "--dry-run",
            "--skip-patch",
        ]);
        assert_eq!(config.config, "stack.toml");
        assert_eq!(config.outdir.as_deref(), Some("out"));
        assert!(config.dry_run);
        assert!(config.skip_patch);
    }
}
