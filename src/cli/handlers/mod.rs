pub mod alphabets;
pub mod config;
pub mod decode;
pub mod encode;
