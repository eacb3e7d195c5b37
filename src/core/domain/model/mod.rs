pub mod datastore;
pub mod host;
pub mod managed_object;
pub mod record;
pub mod sample;
pub mod vm;
pub mod vsphere_connection;
pub mod vsphere_session;
