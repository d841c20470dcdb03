use crate::utils::error::Result;
use serde::Serialize;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human readable location of `path`, for logs and reports.
    fn locate(&self, path: &str) -> String;
}

/// A managed resource block (`resource.<TYPE>.<id>`).
pub trait TerraformResource: Serialize {
    const RESOURCE_TYPE: &'static str;
}

/// A data source block (`data.<TYPE>.<id>`).
pub trait TerraformDataSource: Serialize {
    const DATA_TYPE: &'static str;
}

/// A provider configuration block (`provider.<NAME>`).
pub trait TerraformProvider: Serialize {
    const NAME: &'static str;
    const SOURCE: &'static str;
}

/// A module call (`module.<id>`); the arguments are the module's inputs.
pub trait TerraformModule: Serialize {
    const SOURCE: &'static str;

    fn version(&self) -> Option<&str>;
}
