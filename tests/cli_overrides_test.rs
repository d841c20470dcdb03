#![cfg(feature = "cli")]

use blog_stack::utils::validation::Validate;
use blog_stack::{BlogStack, CliConfig, StackConfig};
use clap::Parser;
use tempfile::TempDir;

fn config_in(temp_dir: &TempDir, extra_args: &[&str]) -> StackConfig {
    let outdir = temp_dir.path().join("cdktf.out");
    let outdir = outdir.to_str().unwrap();

    let mut argv = vec!["blog-stack", "--outdir", outdir];
    argv.extend_from_slice(extra_args);
    let args = CliConfig::parse_from(argv);

    let mut config = StackConfig::new("eu-west-1", "blog");
    config.apply_cli(&args);
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_outdir_override_controls_output_location() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir, &[]);

    let output = BlogStack::synthesize(&config, false).await.unwrap();

    let expected = temp_dir.path().join("cdktf.out").join("cdk.tf.json");
    assert!(expected.exists());
    assert_eq!(output.path, expected.display().to_string());
    assert_eq!(output.replacements, 4);
    assert!(!std::fs::read_to_string(expected).unwrap().contains("self_attribute"));
}

#[tokio::test]
async fn test_skip_patch_leaves_document_unpatched() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir, &["--skip-patch"]);
    assert!(config.synth.patches.is_empty());

    let output = BlogStack::synthesize(&config, false).await.unwrap();
    assert_eq!(output.replacements, 0);

    let written =
        std::fs::read_to_string(temp_dir.path().join("cdktf.out").join("cdk.tf.json")).unwrap();
    assert_eq!(written.matches("self_attribute").count(), 4);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir, &["--dry-run"]);

    let output = BlogStack::synthesize(&config, true).await.unwrap();

    assert!(!temp_dir.path().join("cdktf.out").exists());
    assert_eq!(output.replacements, 4);
    let document: serde_json::Value = serde_json::from_str(&output.document).unwrap();
    assert_eq!(
        document["resource"]["aws_alb_listener"]["listener"]["port"],
        80
    );
}
