pub(crate) mod points;
pub(crate) mod species;
