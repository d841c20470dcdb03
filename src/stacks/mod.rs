pub mod blog;

pub use blog::BlogStack;
