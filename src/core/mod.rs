pub mod app;
pub mod patch;
pub mod stack;
pub mod token;

pub use crate::domain::model::{ResourceMeta, SynthOutput, TerraformOutput};
pub use crate::domain::ports::{
    Storage, TerraformDataSource, TerraformModule, TerraformProvider, TerraformResource,
};
pub use crate::utils::error::Result;
