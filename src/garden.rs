pub(crate) mod calendar;
pub(crate) mod config;
pub(crate) mod layout;
pub(crate) mod summary;
