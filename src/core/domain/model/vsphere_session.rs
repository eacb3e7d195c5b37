use crate::core::domain::{
    model::managed_object::ServiceContent, value_object::VsphereSessionId,
};

/// An authenticated VI/JSON session together with the service content
/// discovered at login.
#[derive(Debug, Clone)]
pub struct VsphereSession {
    session_id: VsphereSessionId,
    content: ServiceContent,
}

impl VsphereSession {
    pub fn new(session_id: VsphereSessionId, content: ServiceContent) -> Self {
        Self {
            session_id,
            content,
        }
    }

    pub fn session_id(&self) -> &VsphereSessionId {
        &self.session_id
    }

    pub fn content(&self) -> &ServiceContent {
        &self.content
    }
}
