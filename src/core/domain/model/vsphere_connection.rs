use crate::core::domain::{
    error::{StatsResult, ValidationError},
    value_object::{VsphereHost, VspherePassword, VsphereUsername},
};
use url::Url;

/// Everything needed to reach and authenticate against one vSphere endpoint.
#[derive(Debug, Clone)]
pub struct VsphereConnection {
    vsphere_host: VsphereHost,
    vsphere_username: VsphereUsername,
    vsphere_password: VspherePassword,
    verify_certs: bool,
    base_url: Url,
}

impl VsphereConnection {
    /// Builds a connection to `https://{host}/sdk/vim25/{release}/`.
    pub fn new(
        vsphere_host: VsphereHost,
        vsphere_username: VsphereUsername,
        vsphere_password: VspherePassword,
        verify_certs: bool,
        api_release: &str,
    ) -> StatsResult<Self> {
        let base_url = Url::parse(&format!(
            "https://{}/sdk/vim25/{}/",
            vsphere_host.as_str(),
            api_release.trim_matches('/')
        ))
        .map_err(|e| ValidationError::Format(format!("Invalid vSphere URL: {}", e)))?;

        Ok(Self::with_base_url(
            vsphere_host,
            vsphere_username,
            vsphere_password,
            verify_certs,
            base_url,
        ))
    }

    /// Builds a connection against an explicit base URL (used against mock servers).
    pub(crate) fn with_base_url(
        vsphere_host: VsphereHost,
        vsphere_username: VsphereUsername,
        vsphere_password: VspherePassword,
        verify_certs: bool,
        base_url: Url,
    ) -> Self {
        Self {
            vsphere_host,
            vsphere_username,
            vsphere_password,
            verify_certs,
            base_url,
        }
    }

    pub fn vsphere_host(&self) -> &VsphereHost {
        &self.vsphere_host
    }

    pub fn vsphere_username(&self) -> &VsphereUsername {
        &self.vsphere_username
    }

    pub fn vsphere_password(&self) -> &VspherePassword {
        &self.vsphere_password
    }

    /// Returns `true` when self-signed or otherwise invalid certificates are accepted.
    pub fn accepts_invalid_certs(&self) -> bool {
        !self.verify_certs
    }

    /// Resolves a method path (e.g. `ViewManager/ViewManager/CreateContainerView`)
    /// against the API base.
    pub fn endpoint(&self, path: &str) -> StatsResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ValidationError::Format(format!("Invalid API path '{}': {}", path, e)).into())
    }
}
