use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tokex_lib::grammar::{self, AnalyzedGrammar};
use tokex_lib::{CompileOptions, Diagnostics};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("grammar is required: use positional argument or -g/--grammar")]
    MissingGrammar,

    #[error("input is required: use positional argument or -i/--input")]
    MissingInput,

    #[error("grammar and input cannot both be from stdin")]
    StdinTwice,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{path}': {source}")]
    File { path: String, source: io::Error },
}

/// Grammar text plus the name diagnostics point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSource {
    pub text: String,
    /// `None` for inline grammars.
    pub path: Option<String>,
}

impl GrammarSource {
    pub fn inline(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            path: None,
        }
    }

    /// Runs every compile stage; `Err` only when the parser runs out of fuel.
    pub fn analyze(&self, options: &CompileOptions) -> tokex_lib::Result<AnalyzedGrammar<'_>> {
        grammar::analyze(&self.text, options)
    }

    pub fn render(&self, diagnostics: &Diagnostics, color: bool) -> String {
        let printer = diagnostics.filtered_printer(&self.text).colored(color);
        match &self.path {
            Some(path) => printer.path(path).render(),
            None => printer.render(),
        }
    }
}

pub fn load_grammar(
    grammar_path: Option<&Path>,
    grammar_text: Option<&str>,
) -> Result<GrammarSource, LoadError> {
    if let Some(text) = grammar_text {
        return Ok(GrammarSource::inline(text));
    }

    let Some(path) = grammar_path else {
        return Err(LoadError::MissingGrammar);
    };

    if path.as_os_str() == "-" {
        return Ok(GrammarSource {
            text: read_stdin()?,
            path: Some("<stdin>".to_owned()),
        });
    }

    Ok(GrammarSource {
        text: read_file(path)?,
        path: Some(path.to_string_lossy().into_owned()),
    })
}

pub fn read_stdin() -> Result<String, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

pub fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.display().to_string(),
        source,
    })
}
