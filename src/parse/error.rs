#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error '{0}'")]
    Io(#[from] std::io::Error),

    #[error("Parameter '{segment}' has no '=' and no value can be inferred")]
    MalformedParameter { segment: String },

    #[error("{skipped} port entries of module '{module}' do not match the port grammar")]
    MalformedPort { module: String, skipped: usize },

    #[error("In module '{module}': {source}")]
    InModule {
        module: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub fn in_module(module: &str, err: ParseError) -> Self {
        ParseError::InModule {
            module: module.to_string(),
            source: Box::new(err),
        }
    }

    /// Name of the module the error was raised for, if any.
    pub fn module(&self) -> Option<&str> {
        match self {
            ParseError::InModule { module, .. } | ParseError::MalformedPort { module, .. } => Some(module.as_str()),
            _ => None,
        }
    }
}
