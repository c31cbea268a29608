pub(crate) mod style;
