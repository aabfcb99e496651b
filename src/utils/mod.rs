#[cfg(test)]
pub(crate) mod approx_eq;
