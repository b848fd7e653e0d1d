pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod orchestrator;
pub(crate) mod plan;
