pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod frame_set;
pub(crate) mod preload;
pub(crate) mod source;
