pub(crate) mod bars;
pub(crate) mod format;
pub(crate) mod scales;
pub(crate) mod session;
