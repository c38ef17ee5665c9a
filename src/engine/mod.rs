pub(crate) mod blender;
pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod sink;
