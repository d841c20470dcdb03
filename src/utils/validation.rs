use crate::utils::error::{Result, StackError};
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

static REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-gov)?-[a-z]+-\d$").expect("static regex"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("static regex"));

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> StackError {
    StackError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_region(field_name: &str, region: &str) -> Result<()> {
    if region.is_empty() {
        return Err(invalid(field_name, region, "Region cannot be empty"));
    }
    if !REGION_RE.is_match(region) {
        return Err(invalid(
            field_name,
            region,
            "Expected an AWS region such as eu-west-1",
        ));
    }
    Ok(())
}

/// Stack names end up in IAM role names, which are capped at 64 characters.
pub fn validate_stack_name(field_name: &str, name: &str, max_len: usize) -> Result<()> {
    if !NAME_RE.is_match(name) {
        return Err(invalid(
            field_name,
            name,
            "Must start with a letter and contain only letters, digits, '-' or '_'",
        ));
    }
    if name.len() > max_len {
        return Err(invalid(
            field_name,
            name,
            format!("Must be at most {} characters", max_len),
        ));
    }
    Ok(())
}

pub fn validate_cidr(field_name: &str, cidr: &str) -> Result<()> {
    let (addr, prefix) = cidr
        .split_once('/')
        .ok_or_else(|| invalid(field_name, cidr, "Expected a.b.c.d/n notation"))?;

    addr.parse::<Ipv4Addr>()
        .map_err(|e| invalid(field_name, cidr, format!("Invalid IPv4 address: {}", e)))?;

    match prefix.parse::<u8>() {
        Ok(bits) if bits <= 32 => Ok(()),
        _ => Err(invalid(field_name, cidr, "Prefix length must be between 0 and 32")),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

/// Memory (MiB) must be one of the sizes Fargate offers for the CPU units.
pub fn validate_fargate_memory(field_name: &str, cpu: u32, memory: u32) -> Result<()> {
    let allowed: Vec<u32> = match cpu {
        256 => vec![512, 1024, 2048],
        512 => (1..=4).map(|gb| gb * 1024).collect(),
        1024 => (2..=8).map(|gb| gb * 1024).collect(),
        2048 => (4..=16).map(|gb| gb * 1024).collect(),
        4096 => (8..=30).map(|gb| gb * 1024).collect(),
        _ => Vec::new(),
    };

    if !allowed.contains(&memory) {
        let reason = if allowed.is_empty() {
            format!("No Fargate memory sizes for {} CPU units", cpu)
        } else {
            let sizes: Vec<String> = allowed.iter().map(u32::to_string).collect();
            format!("Fargate with {} CPU units accepts {} MiB", cpu, sizes.join(", "))
        };
        return Err(invalid(field_name, memory, reason));
    }
    Ok(())
}

pub fn validate_excludes(field_name: &str, value: &str, pattern: &str) -> Result<()> {
    if !pattern.is_empty() && value.contains(pattern) {
        return Err(invalid(
            field_name,
            value,
            format!("Must not contain '{}', which the post-synthesis patch rewrites", pattern),
        ));
    }
    Ok(())
}

pub fn validate_same_length(
    field_name: &str,
    expected: usize,
    actual: usize,
    against: &str,
) -> Result<()> {
    if expected != actual {
        return Err(invalid(
            field_name,
            actual,
            format!("Expected {} entries to match {}", expected, against),
        ));
    }
    Ok(())
}
