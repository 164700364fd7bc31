//! Command handlers.
//!
//! Each handler returns the text to print so that it can be tested without
//! capturing stdout.

use fsgate_acl::{FsPermissionChecker, Mode, ModeParser, default_acl, default_acl_for_login};
use fsgate_auth::{EnvLogin, Identity};
use fsgate_core::PermissionConfig;

use crate::cli::{CheckArgs, Command, ModeAction};
use crate::config_handlers::handle_config_command;
use crate::error::Result;
use crate::fixture::TreeFixture;

/// Runs `command` with configuration from `config_path`.
pub fn run(config_path: Option<&str>, command: Command) -> Result<String> {
    match command {
        Command::Mode { action } => handle_mode_command(action),
        Command::DefaultAcl { user, dir } => {
            let conf = PermissionConfig::load(config_path)?;
            cmd_default_acl(&conf, user.as_deref(), dir)
        }
        Command::Check(args) => {
            let conf = PermissionConfig::load(config_path)?;
            cmd_check(&conf, &args)
        }
        Command::Config { action } => Ok(handle_config_command(config_path, action)?),
    }
}

// ============================================================================
// Mode commands
// ============================================================================

/// Dispatches a `mode` subcommand.
pub fn handle_mode_command(action: ModeAction) -> Result<String> {
    match action {
        ModeAction::Format { mode } => cmd_mode_format(&mode),
        ModeAction::Parse { spec, base, dir } => cmd_mode_parse(&spec, &base, dir),
    }
}

/// Symbolic form of an octal mode.
pub fn cmd_mode_format(mode: &str) -> Result<String> {
    let mode: Mode = mode.parse()?;
    Ok(mode.to_string())
}

/// Result of applying `spec` to `base`, as `<octal> <symbolic>`.
pub fn cmd_mode_parse(spec: &str, base: &str, is_directory: bool) -> Result<String> {
    let base: Mode = base.parse()?;
    let mode = ModeParser::new(spec)?.apply_to(base, is_directory);
    Ok(format!("{mode:03o} {mode}"))
}

// ============================================================================
// ACL commands
// ============================================================================

/// The ACL a new node would get, as `<owner>:<group> <symbolic> (<octal>)`.
///
/// Without a user the login user of this process is used.
pub fn cmd_default_acl(
    conf: &PermissionConfig,
    user: Option<&str>,
    is_directory: bool,
) -> Result<String> {
    let acl = match user {
        Some(user) => default_acl(&Identity::new(user), conf, is_directory),
        None => default_acl_for_login(&EnvLogin::for_platform(), conf, is_directory)?,
    };
    let mode = acl.permission();
    Ok(format!(
        "{}:{} {mode} ({mode:03o})",
        acl.owner_user(),
        acl.owner_group()
    ))
}

/// Checks a request against a tree fixture.
///
/// A denial is returned as an error carrying the checker's message.
pub fn cmd_check(conf: &PermissionConfig, args: &CheckArgs) -> Result<String> {
    let tree = TreeFixture::from_file(&args.tree)?.build(conf)?;
    let identity = Identity::with_groups(&args.user, args.groups.iter().cloned());
    let checker = FsPermissionChecker::from_config(conf, &identity);
    let request = args.request();
    tracing::debug!(user = %identity, path = %args.path, ?request, "checking");
    tree.check(&checker, &args.path, &request)?;
    Ok(format!("allowed: {identity} on {}", args.path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::RequestPreset;

    const TREE: &str = r#"
[root]
owner = "fsgate"
group = "supergroup"
mode = 0o755

[[node]]
path = "/dir1"
kind = "dir"
owner = "leo"
group = "sales"
mode = 0o755

[[node]]
path = "/dir1/file1"
kind = "file"
owner = "leo"
group = "sales"
mode = 0o644
"#;

    fn check_args(tree: &std::path::Path, user: &str, preset: RequestPreset) -> CheckArgs {
        CheckArgs {
            tree: tree.display().to_string(),
            user: user.to_string(),
            groups: Vec::new(),
            path: "/dir1/file1".to_string(),
            request: Some(preset),
            ancestor: None,
            parent: None,
            access: None,
            owner: false,
        }
    }

    #[test]
    fn test_mode_format() {
        assert_eq!(cmd_mode_format("644").unwrap(), "rw-r--r--");
        assert_eq!(cmd_mode_format("1777").unwrap(), "rwxrwxrwt");
        assert!(cmd_mode_format("9").is_err());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(cmd_mode_parse("u+x", "644", false).unwrap(), "744 rwxr--r--");
        assert_eq!(cmd_mode_parse("a+X", "644", true).unwrap(), "755 rwxr-xr-x");
        assert!(cmd_mode_parse("u+q", "644", false).is_err());
    }

    #[test]
    fn test_default_acl_for_user() {
        let out = cmd_default_acl(&PermissionConfig::default(), Some("leo"), true).unwrap();
        assert_eq!(out, "leo:supergroup rwxr-xr-x (755)");
    }

    #[test]
    fn test_check_allowed_and_denied() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("tree.toml");
        std::fs::write(&tree, TREE).unwrap();
        let conf = PermissionConfig::default();

        let out = cmd_check(&conf, &check_args(&tree, "leo", RequestPreset::Write)).unwrap();
        assert!(out.starts_with("allowed: uid=leo"));

        let err = cmd_check(&conf, &check_args(&tree, "diana", RequestPreset::Write)).unwrap_err();
        assert!(err.is_access_denied());
        assert_eq!(
            err.to_string(),
            "Permission denied: user=diana, access=WRITE, inode=\"/dir1/file1\":leo:sales:-:rw-r--r--"
        );
    }

    #[test]
    fn test_check_missing_tree_file() {
        let tree = std::path::Path::new("/nonexistent/tree.toml");
        let args = check_args(tree, "leo", RequestPreset::Read);
        let err = cmd_check(&PermissionConfig::default(), &args).unwrap_err();
        assert!(!err.is_access_denied());
    }
}
