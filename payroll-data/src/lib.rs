pub mod employees;
pub mod tax_config;
pub mod writer;
