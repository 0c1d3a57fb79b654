pub(crate) mod glyphs;
pub(crate) mod text;
