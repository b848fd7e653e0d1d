pub(crate) mod host;
pub(crate) mod labels;
pub(crate) mod memory;
pub(crate) mod visibility;
