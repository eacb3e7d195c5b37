pub mod api_client;
pub mod hec_sink;
