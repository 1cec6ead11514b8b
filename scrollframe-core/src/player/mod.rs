pub(crate) mod config;
pub(crate) mod events;
pub(crate) mod load;
#[allow(clippy::module_inception)]
pub(crate) mod player;
