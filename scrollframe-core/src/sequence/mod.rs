pub(crate) mod frame_map;
