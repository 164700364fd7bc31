//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use fsgate_acl::{AccessRequest, AclPermission};

/// fsgate - POSIX-style permission checks for hierarchical namespaces
#[derive(Parser, Debug)]
#[command(name = "fsgate", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert and apply permission modes
    Mode {
        /// Mode action
        #[command(subcommand)]
        action: ModeAction,
    },

    /// Show the ACL a new node would get
    DefaultAcl {
        /// Creating user; defaults to the login user
        #[arg(short, long)]
        user: Option<String>,

        /// Show the directory ACL instead of the file ACL
        #[arg(long)]
        dir: bool,
    },

    /// Check access to a path in a tree fixture
    Check(CheckArgs),

    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `mode` subcommands.
#[derive(Subcommand, Debug)]
pub enum ModeAction {
    /// Print the symbolic form of an octal mode
    Format {
        /// Octal mode, e.g. 644
        mode: String,
    },

    /// Apply a chmod-style mode string to a base mode
    Parse {
        /// Octal (755) or symbolic (u+x,go-w) mode string
        spec: String,

        /// Mode to apply the change to
        #[arg(short, long, default_value = "000")]
        base: String,

        /// Treat the target as a directory (affects X)
        #[arg(long)]
        dir: bool,
    },
}

/// Arguments of `check`.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// TOML file describing the tree
    #[arg(short, long)]
    pub tree: String,

    /// Acting user
    #[arg(short, long)]
    pub user: String,

    /// Groups of the acting user
    #[arg(short, long, value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Path to check
    #[arg(short, long)]
    pub path: String,

    /// Named request; explicit stage flags override its stages
    #[arg(short, long, value_enum)]
    pub request: Option<RequestPreset>,

    /// Access required on every existing ancestor
    #[arg(long)]
    pub ancestor: Option<AclPermission>,

    /// Access required on every node above the target
    #[arg(long)]
    pub parent: Option<AclPermission>,

    /// Access required on the target
    #[arg(short, long)]
    pub access: Option<AclPermission>,

    /// Require the user to own the target
    #[arg(long)]
    pub owner: bool,
}

impl CheckArgs {
    /// The request these arguments describe.
    pub fn request(&self) -> AccessRequest {
        let mut request = self.request.map(RequestPreset::request).unwrap_or_default();
        if let Some(ancestor) = self.ancestor {
            request = request.with_ancestor(ancestor);
        }
        if let Some(parent) = self.parent {
            request = request.with_parent(parent);
        }
        if let Some(access) = self.access {
            request = request.with_access(access);
        }
        if self.owner {
            request = request.with_owner(true);
        }
        request
    }
}

/// Named requests accepted by `check --request`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RequestPreset {
    /// Execute on every directory above the target
    Traverse,
    /// Read the target
    Read,
    /// Write the target
    Write,
    /// List the target directory
    List,
    /// Traverse to the deepest existing ancestor
    Create,
    /// Own the target
    Owner,
}

impl RequestPreset {
    /// The matching [`AccessRequest`].
    pub fn request(self) -> AccessRequest {
        match self {
            RequestPreset::Traverse => AccessRequest::traverse(),
            RequestPreset::Read => AccessRequest::read(),
            RequestPreset::Write => AccessRequest::write(),
            RequestPreset::List => AccessRequest::list(),
            RequestPreset::Create => AccessRequest::create(),
            RequestPreset::Owner => AccessRequest::owner(),
        }
    }
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print the effective configuration
    Show,

    /// Print one effective configuration value
    Get {
        /// Key, e.g. `umask` or `supergroup`
        key: String,
    },

    /// Write a configuration file holding the defaults
    Init {
        /// Where to write; defaults to the resolved config path
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "fsgate", "check", "--tree", "t.toml", "--user", "diana", "--groups", "sales,staff",
            "--path", "/dir1", "--request", "read", "--access", "write",
        ])
        .unwrap();
        let Command::Check(args) = cli.command else {
            unreachable!("parsed as check");
        };
        assert_eq!(args.groups, vec!["sales", "staff"]);
        let request = args.request();
        assert_eq!(request.parent, Some(AclPermission::Execute));
        assert_eq!(request.access, Some(AclPermission::Write));
    }

    #[test]
    fn test_parse_mode_parse() {
        let cli = Cli::try_parse_from(["fsgate", "mode", "parse", "u+x", "--base", "644"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Mode {
                action: ModeAction::Parse { ref spec, ref base, dir: false }
            } if spec == "u+x" && base == "644"
        ));
    }
}
