pub mod audit;
pub mod batch;
pub mod platforms;
pub mod predict;
pub mod shell;
pub mod user;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;
