pub(crate) mod base_color;
pub(crate) mod topology;
