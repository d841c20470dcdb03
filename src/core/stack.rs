//! A named collection of Terraform blocks, synthesized into one
//! `cdk.tf.json` document.

use crate::core::token::Reference;
use crate::domain::model::{ResourceMeta, TerraformOutput};
use crate::domain::ports::{
    TerraformDataSource, TerraformModule, TerraformProvider, TerraformResource,
};
use crate::utils::error::{Result, StackError};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

type BlocksByType = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug, Clone)]
pub struct TerraformStack {
    name: String,
    required_providers: BTreeMap<String, Value>,
    providers: BTreeMap<String, Vec<Value>>,
    resources: BlocksByType,
    data: BlocksByType,
    modules: BTreeMap<String, Value>,
    outputs: BTreeMap<String, Value>,
}

impl TerraformStack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_providers: BTreeMap::new(),
            providers: BTreeMap::new(),
            resources: BTreeMap::new(),
            data: BTreeMap::new(),
            modules: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_provider<P: TerraformProvider>(&mut self, provider: &P, version: &str) -> Result<()> {
        let block = to_object(provider)?;
        self.required_providers.insert(
            P::NAME.to_string(),
            json!({ "source": P::SOURCE, "version": version }),
        );
        self.providers
            .entry(P::NAME.to_string())
            .or_default()
            .push(Value::Object(block));
        tracing::debug!(provider = P::NAME, version, "Declared provider");
        Ok(())
    }

    pub fn add_resource<R: TerraformResource>(&mut self, id: &str, resource: &R) -> Result<Reference> {
        self.add_resource_with(id, resource, ResourceMeta::default())
    }

    pub fn add_resource_with<R: TerraformResource>(
        &mut self,
        id: &str,
        resource: &R,
        meta: ResourceMeta,
    ) -> Result<Reference> {
        let mut block = to_object(resource)?;
        if let Value::Object(meta) = serde_json::to_value(&meta)? {
            block.extend(meta);
        }
        let block = self.with_metadata(id, block);

        insert_unique(&self.name, &mut self.resources, R::RESOURCE_TYPE, id, block)?;
        tracing::debug!(resource = R::RESOURCE_TYPE, id, "Declared resource");
        Ok(Reference::resource(R::RESOURCE_TYPE, id))
    }

    pub fn add_data<D: TerraformDataSource>(&mut self, id: &str, data: &D) -> Result<Reference> {
        let block = self.with_metadata(id, to_object(data)?);
        insert_unique(&self.name, &mut self.data, D::DATA_TYPE, id, block)?;
        tracing::debug!(data = D::DATA_TYPE, id, "Declared data source");
        Ok(Reference::data(D::DATA_TYPE, id))
    }

    pub fn add_module<M: TerraformModule>(&mut self, id: &str, module: &M) -> Result<Reference> {
        if self.modules.contains_key(id) {
            return Err(self.duplicate("module", id));
        }

        let mut block = to_object(module)?;
        block.insert("source".to_string(), Value::String(M::SOURCE.to_string()));
        if let Some(version) = module.version() {
            block.insert("version".to_string(), Value::String(version.to_string()));
        }
        let block = self.with_metadata(id, block);

        self.modules.insert(id.to_string(), block);
        tracing::debug!(module = M::SOURCE, id, "Declared module");
        Ok(Reference::module(id))
    }

    pub fn add_output(&mut self, id: &str, output: TerraformOutput) -> Result<()> {
        if self.outputs.contains_key(id) {
            return Err(self.duplicate("output", id));
        }
        self.outputs
            .insert(id.to_string(), serde_json::to_value(output)?);
        Ok(())
    }

    /// The Terraform JSON document for every block declared so far.
    pub fn to_document(&self) -> Value {
        let mut document = Map::new();
        document.insert(
            "//".to_string(),
            json!({
                "metadata": {
                    "version": env!("CARGO_PKG_VERSION"),
                    "stackName": self.name,
                    "backend": "local",
                }
            }),
        );
        document.insert(
            "terraform".to_string(),
            json!({ "required_providers": self.required_providers }),
        );

        if !self.providers.is_empty() {
            document.insert("provider".to_string(), json!(self.providers));
        }
        if !self.data.is_empty() {
            document.insert("data".to_string(), json!(self.data));
        }
        if !self.modules.is_empty() {
            document.insert("module".to_string(), json!(self.modules));
        }
        if !self.resources.is_empty() {
            document.insert("resource".to_string(), json!(self.resources));
        }
        if !self.outputs.is_empty() {
            document.insert("output".to_string(), json!(self.outputs));
        }

        Value::Object(document)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    fn with_metadata(&self, id: &str, mut block: Map<String, Value>) -> Value {
        block.insert(
            "//".to_string(),
            json!({
                "metadata": {
                    "path": format!("{}/{}", self.name, id),
                    "uniqueId": id,
                }
            }),
        );
        Value::Object(block)
    }

    fn duplicate(&self, kind: &str, id: &str) -> StackError {
        StackError::DuplicateConstruct {
            stack: self.name.clone(),
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

fn to_object<T: Serialize>(block: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(block)? {
        Value::Object(map) => Ok(map),
        other => Err(StackError::ConfigError {
            message: format!("Block arguments must serialize to an object, got {}", other),
        }),
    }
}

fn insert_unique(
    stack: &str,
    blocks: &mut BlocksByType,
    block_type: &str,
    id: &str,
    block: Value,
) -> Result<()> {
    let by_id = blocks.entry(block_type.to_string()).or_default();
    if by_id.contains_key(id) {
        return Err(StackError::DuplicateConstruct {
            stack: stack.to_string(),
            kind: block_type.to_string(),
            id: id.to_string(),
        });
    }
    by_id.insert(id.to_string(), block);
    Ok(())
}
