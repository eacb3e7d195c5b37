pub mod retrieve_result;
pub mod summary;
