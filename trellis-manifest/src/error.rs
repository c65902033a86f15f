use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for trellis-manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename so validation code can
/// build span-carrying errors without threading both through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Locate the first quoted occurrence of `value` in the source.
    pub fn find_value_span(&self, value: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", value);
        self.src
            .find(&quoted)
            .map(|offset| SourceSpan::from((offset, quoted.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            filename: self.filename.clone(),
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, pointing at `value` when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, value: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find_value_span(value),
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(trellis::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {filename}")]
    #[diagnostic(code(trellis::parse_error))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(trellis::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("failed to parse '{path}'")]
    #[diagnostic(
        code(trellis::package_json),
        help("the package name is read from the \"name\" field of package.json")
    )]
    PackageJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("workspace member '{member}' does not exist")]
    #[diagnostic(
        code(trellis::missing_member),
        help("remove it from `members` in trellis.toml or create the directory")
    )]
    MissingMember { member: String },

    #[error("package name '{name}' is used by more than one package")]
    #[diagnostic(
        code(trellis::duplicate_package),
        help("first declared in '{first}', again in '{second}'")
    )]
    DuplicatePackage {
        name: String,
        first: String,
        second: String,
    },

    #[error("host package '{name}' not found in the workspace")]
    #[diagnostic(code(trellis::unknown_host), help("known packages: {known}"))]
    UnknownHost { name: String, known: String },

    #[error("the workspace has no packages")]
    #[diagnostic(
        code(trellis::empty_workspace),
        help("add package directories matching `members` in trellis.toml")
    )]
    EmptyWorkspace,
}

impl Error {
    /// Create an io error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
