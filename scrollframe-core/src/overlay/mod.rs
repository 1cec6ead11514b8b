pub(crate) mod beat;
