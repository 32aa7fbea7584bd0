pub mod shared;
pub mod solidity;
