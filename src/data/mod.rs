pub(crate) mod dataset;
pub(crate) mod normalize;
pub(crate) mod rankings;
pub(crate) mod schema;
pub(crate) mod source;
