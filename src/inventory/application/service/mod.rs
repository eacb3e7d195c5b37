pub mod inventory_service;
pub mod summary_mapper;
