//! Terraform interpolation references.
//!
//! Most resource arguments are only known once Terraform applies the
//! document, so the stack wires constructs together with `${...}`
//! expressions instead of values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wraps a raw Terraform expression in `${...}`.
pub fn interpolate(expression: &str) -> String {
    format!("${{{}}}", expression)
}

/// Address of a declared block, e.g. `aws_alb.alb` or `module.vpc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    address: String,
}

impl Reference {
    pub fn resource(resource_type: &str, id: &str) -> Self {
        Self {
            address: format!("{}.{}", resource_type, id),
        }
    }

    pub fn data(data_type: &str, id: &str) -> Self {
        Self {
            address: format!("data.{}.{}", data_type, id),
        }
    }

    pub fn module(id: &str) -> Self {
        Self {
            address: format!("module.{}", id),
        }
    }

    /// The bare address, as used in `depends_on`.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// A string token for one attribute of this block.
    pub fn attr(&self, attribute: &str) -> String {
        interpolate(&format!("{}.{}", self.address, attribute))
    }

    /// A list token for one list-typed attribute of this block.
    pub fn list_attr(&self, attribute: &str) -> StringList {
        StringList::Expression(self.attr(attribute))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// A list argument that is either spelled out or resolved by Terraform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Items(Vec<String>),
    Expression(String),
}

impl StringList {
    pub fn is_expression(&self) -> bool {
        matches!(self, StringList::Expression(_))
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        StringList::Items(items)
    }
}

impl From<Vec<&str>> for StringList {
    fn from(items: Vec<&str>) -> Self {
        StringList::Items(items.into_iter().map(str::to_string).collect())
    }
}
