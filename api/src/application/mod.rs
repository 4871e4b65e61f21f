pub mod ports;
pub mod services;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;
