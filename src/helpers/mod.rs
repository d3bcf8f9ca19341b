pub(crate) mod identifier;
