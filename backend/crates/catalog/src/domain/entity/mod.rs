//! Entity Module

pub mod product;
pub mod shoe;
