pub mod realize;
pub mod sign;
pub mod solve;
pub mod validate;
