//! ACLs for newly created nodes.

use fsgate_auth::{IdentityProvider, LoginSource};
use fsgate_core::PermissionConfig;
use fsgate_core::config::DEFAULT_UMASK;

use crate::acl::Acl;
use crate::error::{Error, Result};
use crate::mode::Mode;

/// The configured umask, or `0o022` without a config.
pub fn umask_from_config(conf: Option<&PermissionConfig>) -> Mode {
    let bits = conf.map_or(DEFAULT_UMASK, PermissionConfig::umask);
    Mode::from_bits_truncate(bits)
}

/// The ACL a node created by `identity` starts with.
///
/// The owner is the identity's user and the group is the configured
/// supergroup. The configured default file or directory mode is masked by
/// the configured umask.
pub fn default_acl<P>(identity: &P, conf: &PermissionConfig, is_directory: bool) -> Acl
where
    P: IdentityProvider + ?Sized,
{
    Acl::builder()
        .owner_group_mode(
            identity.user_name(),
            conf.supergroup(),
            Mode::from_bits_truncate(conf.default_mode(is_directory)),
        )
        .umask(umask_from_config(Some(conf)))
        .build()
}

/// [`default_acl`] for the identity `login` resolves.
///
/// Fails with [`Error::Misconfiguration`] when there is no login identity.
pub fn default_acl_for_login(
    login: &dyn LoginSource,
    conf: &PermissionConfig,
    is_directory: bool,
) -> Result<Acl> {
    let identity = login
        .login_identity()
        .map_err(|e| Error::misconfiguration_with_source("can't get the login user", e))?;
    Ok(default_acl(&identity, conf, is_directory))
}
