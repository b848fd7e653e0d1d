pub(crate) mod levels;
pub(crate) mod meter;
pub(crate) mod output;
