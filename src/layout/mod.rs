pub(crate) mod builder;
pub(crate) mod config;
pub(crate) mod constraint;
pub(crate) mod spacer;
