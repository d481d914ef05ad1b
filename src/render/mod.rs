pub(crate) mod latex;
