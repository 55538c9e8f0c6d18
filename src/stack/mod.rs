pub(crate) mod container;
