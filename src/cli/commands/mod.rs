pub mod pull;
pub mod push;


#[cfg(test)]
#[path = "push_test.rs"]
mod push_test;
