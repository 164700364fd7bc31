//! Discovery of the process' own login identity.
//!
//! Which variables name the login user differs per platform. The choice is
//! made at compile time in [`EnvLogin::for_platform`]; callers only see the
//! [`LoginSource`] trait.

use std::collections::BTreeSet;

use crate::error::AuthError;
use crate::groups::{GroupMapping, groups_or_empty};
use crate::identity::Identity;

/// Produces the identity the current process runs as.
pub trait LoginSource: Send + Sync {
    /// The login identity, or [`AuthError::NoLoginUser`].
    fn login_identity(&self) -> Result<Identity, AuthError>;
}

/// A fixed login identity, for services that are told who they are.
#[derive(Debug, Clone)]
pub struct StaticLogin(pub Identity);

impl LoginSource for StaticLogin {
    fn login_identity(&self) -> Result<Identity, AuthError> {
        Ok(self.0.clone())
    }
}

type EnvReader = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the login user from environment variables.
///
/// Variables are tried in order; the first non-empty value wins. Groups come
/// from an optional [`GroupMapping`].
pub struct EnvLogin {
    vars: Vec<&'static str>,
    reader: EnvReader,
    mapping: Option<Box<dyn GroupMapping>>,
}

impl EnvLogin {
    /// Variables that name the login user on this platform.
    #[cfg(windows)]
    pub const PLATFORM_VARS: &'static [&'static str] = &["USERNAME"];

    /// Variables that name the login user on this platform.
    #[cfg(not(windows))]
    pub const PLATFORM_VARS: &'static [&'static str] = &["USER", "LOGNAME"];

    /// Login source for the platform this binary was built for.
    pub fn for_platform() -> Self {
        Self::with_reader(Self::PLATFORM_VARS, |name| std::env::var(name).ok())
    }

    /// Login source with a custom variable list and lookup function.
    pub fn with_reader<F>(vars: &[&'static str], reader: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            vars: vars.to_vec(),
            reader: Box::new(reader),
            mapping: None,
        }
    }

    /// Resolves the login user's groups through `mapping`.
    pub fn with_group_mapping(mut self, mapping: impl GroupMapping + 'static) -> Self {
        self.mapping = Some(Box::new(mapping));
        self
    }
}

impl LoginSource for EnvLogin {
    fn login_identity(&self) -> Result<Identity, AuthError> {
        let user = self
            .vars
            .iter()
            .filter_map(|var| (self.reader)(var))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or_else(|| {
                AuthError::NoLoginUser(format!("none of {} set", self.vars.join(", ")))
            })?;

        let groups = match &self.mapping {
            Some(mapping) => groups_or_empty(mapping.as_ref(), &user),
            None => BTreeSet::new(),
        };
        log::debug!("Login user resolved from environment: {user}");
        Ok(Identity { user, groups })
    }
}

impl std::fmt::Debug for EnvLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvLogin")
            .field("vars", &self.vars)
            .field("has_mapping", &self.mapping.is_some())
            .finish()
    }
}
