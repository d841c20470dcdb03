use crate::core::patch::{self, Patch};
use crate::core::stack::TerraformStack;
use crate::domain::model::SynthOutput;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

pub const OUTPUT_FILE: &str = "cdk.tf.json";

/// Writes stacks to storage and post-processes the emitted document.
pub struct App<S: Storage> {
    storage: S,
    patches: Vec<Patch>,
}

impl<S: Storage> App<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            patches: vec![Patch::default()],
        }
    }

    pub fn with_patches(storage: S, patches: Vec<Patch>) -> Self {
        Self { storage, patches }
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Synthesizes `stack` into `cdk.tf.json`, then patches the written file.
    pub async fn synth(&self, stack: &TerraformStack) -> Result<SynthOutput> {
        for patch in &self.patches {
            patch.check()?;
        }

        tracing::info!("Synthesizing stack {}", stack.name());
        let document = stack.to_json_pretty()?;

        self.storage
            .write_file(OUTPUT_FILE, document.as_bytes())
            .await?;
        let path = self.storage.locate(OUTPUT_FILE);
        tracing::info!("Wrote {}", path);

        let (document, replacements) =
            patch::patch_file(&self.storage, OUTPUT_FILE, &self.patches).await?;

        Ok(SynthOutput {
            path,
            document,
            replacements,
        })
    }

    /// Synthesizes and patches in memory without touching storage.
    pub fn synth_in_memory(&self, stack: &TerraformStack) -> Result<SynthOutput> {
        let document = stack.to_json_pretty()?;
        let (document, replacements) = patch::apply_all(&self.patches, &document)?;
        Ok(SynthOutput {
            path: OUTPUT_FILE.to_string(),
            document,
            replacements,
        })
    }
}
