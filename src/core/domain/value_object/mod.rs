mod ingest_secret;
mod ingest_target;
pub(crate) mod serde_helpers;
mod tag_handle;
mod vsphere_host;
mod vsphere_password;
mod vsphere_session_id;
mod vsphere_username;

pub use ingest_secret::IngestSecret;
pub use ingest_target::IngestTarget;
pub use tag_handle::TagHandle;
pub use vsphere_host::VsphereHost;
pub use vsphere_password::VspherePassword;
pub use vsphere_session_id::{SESSION_HEADER, VsphereSessionId};
pub use vsphere_username::VsphereUsername;
