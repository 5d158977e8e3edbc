use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics overlap, the higher-priority one suppresses the
/// lower-priority one, which keeps cascades out of the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Unclosed delimiters swallow the rest of the grammar
    UnclosedGroup,
    UnclosedCapture,
    UnclosedDefinition,
    UnclosedRepeatBounds,

    // Something required is missing
    ExpectedExpression,
    ExpectedName,

    // Something present doesn't belong
    UnexpectedToken,
    EmptyLiteral,
    InvalidRepetitionBounds,
    InvalidRegex,
    InvalidName,
    DefinitionNotAllowed,

    // Valid syntax, invalid semantics
    DuplicateDefinition,
    UndefinedReference,
    RecursionNoEscape,

    UnusedDefinition,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnusedDefinition => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Lower discriminant wins.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedGroup
                | Self::UnclosedCapture
                | Self::UnclosedDefinition
                | Self::UnclosedRepeatBounds
        )
    }

    /// Root causes suppress structural errors reported at the same position.
    pub fn is_root_cause_error(&self) -> bool {
        matches!(self, Self::ExpectedExpression | Self::ExpectedName)
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedName | Self::InvalidName => {
                Some("names start with a letter or `_`, e.g. `digits` or `_item2`")
            }
            Self::EmptyLiteral => Some("use `$` to match any token"),
            Self::InvalidRepetitionBounds => Some("e.g., `{2}`, `{1,}`, `{,3}` or `{1,3}`"),
            Self::DefinitionNotAllowed => {
                Some("sub-grammar definitions are disabled for this grammar")
            }
            Self::RecursionNoEscape => {
                Some("add an alternative that does not reference the definition again")
            }
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedGroup => "missing closing `)`",
            Self::UnclosedCapture => "missing closing `>`",
            Self::UnclosedDefinition => "missing closing `@@`",
            Self::UnclosedRepeatBounds => "missing closing `}`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedName => "expected a name",

            Self::UnexpectedToken => "unexpected token",
            Self::EmptyLiteral => "empty literal never matches",
            Self::InvalidRepetitionBounds => "invalid repetition bounds",
            Self::InvalidRegex => "invalid regex",
            Self::InvalidName => "invalid name",
            Self::DefinitionNotAllowed => "sub-grammar definitions are not allowed",

            Self::DuplicateDefinition => "duplicate definition",
            Self::UndefinedReference => "undefined reference",
            Self::RecursionNoEscape => "infinite recursion: no escape path",

            Self::UnusedDefinition => "unused definition",
        }
    }

    /// Template for custom messages; `{}` is replaced by the caller's detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateDefinition => "`{}` is already defined".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::UnusedDefinition => "`{}` is never referenced".to_string(),
            Self::InvalidName => "`{}` is not a valid name".to_string(),

            Self::UnclosedGroup
            | Self::UnclosedCapture
            | Self::UnclosedDefinition
            | Self::UnclosedRepeatBounds => format!("{}; {{}}", self.fallback_message()),

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` renders the fallback, `Some(detail)` fills the custom template.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

/// A single diagnostic with its position in the grammar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range underlined in output.
    pub(crate) range: TextRange,
    /// Range used for suppression. Defaults to `range`; the parser widens it to
    /// the enclosing delimiter so errors inside an unclosed group stay quiet.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            suppression_range: range,
            message: message.into(),
            fix: None,
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
