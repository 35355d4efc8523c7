pub(crate) mod exporter;
pub(crate) mod naming;
pub(crate) mod sink;
