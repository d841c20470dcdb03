use serde::Serialize;

/// Meta-arguments Terraform accepts on any resource block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceMeta {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ResourceMeta {
    pub fn depends_on<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            depends_on: addresses.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TerraformOutput {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
}

/// Result of one synthesis run.
#[derive(Debug, Clone)]
pub struct SynthOutput {
    pub path: String,
    pub document: String,
    pub replacements: usize,
}
