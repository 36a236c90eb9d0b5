pub(crate) mod quotes;
pub(crate) mod sync;
