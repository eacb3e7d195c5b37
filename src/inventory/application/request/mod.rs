pub mod create_container_view_request;
pub mod retrieve_properties_request;
