mod component;
pub(crate) mod gauges;
pub(crate) mod logs;

pub(crate) use component::Component;
