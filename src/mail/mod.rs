pub mod decoders;
pub mod export;
pub mod header_parser;
pub mod signature;
pub mod source;
pub mod summary;
