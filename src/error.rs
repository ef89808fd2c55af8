//! Unified error types for the installer.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors from the theme registry and webfont HTTP layer.
#[derive(Debug)]
pub enum RegistryError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the registry.
    Status(u16, String),
    /// The response arrived but did not contain what we needed.
    Malformed(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code, body) => write!(f, "status {code}: {body}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<reqwest::Error> for RegistryError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// LayoutError
// ---------------------------------------------------------------------------

/// Errors from the layout font-injection engine.
#[derive(Debug)]
pub enum LayoutError {
    /// No candidate layout file exists in the project.
    NotFound,
    /// The layout file has neither a `</head>` nor a `<body>` marker.
    NoInsertionPoint,
    Io(std::io::Error),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "could not find layout.tsx or layout.js in the app directory (looked in app/ and src/app/)"
            ),
            Self::NoInsertionPoint => write!(
                f,
                "layout file has no </head> or <body> tag to insert font links into"
            ),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// GitError
// ---------------------------------------------------------------------------

/// Errors from the working-tree cleanliness check.
#[derive(Debug)]
pub enum GitError {
    /// The project directory is not inside a git repository.
    NotARepository,
    /// The working tree has uncommitted changes.
    DirtyWorktree,
    /// A git invocation ran but reported failure.
    Command(String),
    Io(std::io::Error),
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotARepository => write!(
                f,
                "not a git repository. Run this command inside a git repository."
            ),
            Self::DirtyWorktree => write!(
                f,
                "git working tree is not clean. Commit or stash your changes first."
            ),
            Self::Command(msg) => write!(f, "git: {msg}"),
            Self::Io(e) => write!(f, "git: {e}"),
        }
    }
}

impl std::error::Error for GitError {}

impl From<std::io::Error> for GitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ProjectError
// ---------------------------------------------------------------------------

/// Errors from the project shape check.
#[derive(Debug)]
pub enum ProjectError {
    /// The target directory does not look like a Next.js app-router project.
    NotNextApp,
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNextApp => write!(
                f,
                "not a Next.js app-router project: expected an app/ or src/app/ directory"
            ),
        }
    }
}

impl std::error::Error for ProjectError {}

// ---------------------------------------------------------------------------
// InstallerError
// ---------------------------------------------------------------------------

/// Errors from invoking the component installer command.
#[derive(Debug)]
pub enum InstallerError {
    /// The configured runner command is empty.
    EmptyRunner,
    /// The runner process could not be started.
    Spawn(std::io::Error),
    /// The runner ran but exited non-zero.
    Failed(i32, String),
}

impl fmt::Display for InstallerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRunner => write!(f, "installer.runner is empty"),
            Self::Spawn(e) => write!(f, "failed to run installer command: {e}"),
            Self::Failed(code, stderr) => {
                write!(f, "installer command exited with code {code}: {stderr}")
            }
        }
    }
}

impl std::error::Error for InstallerError {}

// ---------------------------------------------------------------------------
// CliError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type for CLI commands.
#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Registry(RegistryError),
    Layout(LayoutError),
    Git(GitError),
    Project(ProjectError),
    Installer(InstallerError),
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Registry(e) => write!(f, "registry: {e}"),
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::Git(e) => write!(f, "{e}"),
            Self::Project(e) => write!(f, "{e}"),
            Self::Installer(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<LayoutError> for CliError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<GitError> for CliError {
    fn from(e: GitError) -> Self {
        Self::Git(e)
    }
}

impl From<ProjectError> for CliError {
    fn from(e: ProjectError) -> Self {
        Self::Project(e)
    }
}

impl From<InstallerError> for CliError {
    fn from(e: InstallerError) -> Self {
        Self::Installer(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
