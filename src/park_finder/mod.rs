pub mod debounce;
pub mod filters;
pub mod finder;
pub mod search;

#[cfg(test)]
pub mod test_support;
