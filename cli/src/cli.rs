//! Command-line interface definitions.
//!
//! Only clap structs live here. The commands themselves are in `commands`.

use blacksquid::MissingKey;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Blacksquid - render `{{name}}` templates against typed values
#[derive(Parser, Debug)]
#[command(name = "blacksquid", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a template to stdout
    Render(RenderArgs),

    /// Validate templates and list their placeholders
    Check(CheckArgs),
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template file, or `-` for stdin
    pub file: String,

    #[command(flatten)]
    pub vars: VarArgs,

    /// What to do with a placeholder that has no value
    #[arg(long, value_enum, default_value_t = MissingPolicy::Skip)]
    pub missing: MissingPolicy,

    /// Maximum nesting of lists, arrays and maps in a rendered value
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Words per arena region
    #[arg(long, value_name = "WORDS")]
    pub region_capacity: Option<usize>,
}

/// Values bound to placeholders. Each flag may be repeated; for a key given
/// more than once the flag applied last wins, in the order the fields below
/// are listed.
#[derive(Args, Debug, Default)]
pub struct VarArgs {
    /// Bind a string value
    #[arg(long = "var", value_name = "KEY=TEXT")]
    pub strings: Vec<String>,

    /// Bind a signed integer
    #[arg(long = "int", value_name = "KEY=N")]
    pub ints: Vec<String>,

    /// Bind an unsigned integer
    #[arg(long = "uint", value_name = "KEY=N")]
    pub uints: Vec<String>,

    /// Bind a float
    #[arg(long = "float", value_name = "KEY=X")]
    pub floats: Vec<String>,

    /// Bind a list of strings split on commas
    #[arg(long = "list", value_name = "KEY=A,B,C")]
    pub lists: Vec<String>,
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Template files to check (use `-` for stdin)
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Only report errors
    #[arg(long, short)]
    pub quiet: bool,
}

/// Missing-key policy as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MissingPolicy {
    /// Render nothing in its place
    #[default]
    Skip,
    /// Leave the placeholder text as written
    Keep,
    /// Fail the render
    Error,
}

impl From<MissingPolicy> for MissingKey {
    fn from(policy: MissingPolicy) -> Self {
        match policy {
            MissingPolicy::Skip => MissingKey::Skip,
            MissingPolicy::Keep => MissingKey::Keep,
            MissingPolicy::Error => MissingKey::Error,
        }
    }
}
