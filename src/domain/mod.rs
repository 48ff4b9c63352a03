pub mod email;
pub mod headers;
pub mod history;
pub mod verdict;
