pub mod builder;
pub(crate) mod defaults;
pub mod runtime;
pub mod traits;
