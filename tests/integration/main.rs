//! Integration tests for segtype

mod cli_test;
mod controller_test;
mod helpers;
mod session_test;
mod source_test;
