//! Integration tests over the assembled router.

mod helpers;

mod auth_test;
mod gateway_test;
