#[cfg(test)]
pub mod aws_replay;
pub mod extractors;
pub mod jwt;
pub mod secret_hash;
