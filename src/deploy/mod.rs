pub mod bundle;
pub mod canned;
pub mod naming;
