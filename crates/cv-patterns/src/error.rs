use crate::span::Span;
use cv_core::ConvertError;
use std::fmt;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    EmptyPattern,
    MalformedToken {
        token: String,
        span: Span,
    },
    UnclosedGrace {
        open_span: Span,
    },
    Convert {
        token: String,
        span: Span,
        source: ConvertError,
    },
}

impl ParseError {
    pub fn malformed_token(token: impl Into<String>, span: Span) -> Self {
        ParseError::MalformedToken {
            token: token.into(),
            span,
        }
    }

    pub fn unclosed_grace(open_span: Span) -> Self {
        ParseError::UnclosedGrace { open_span }
    }

    pub fn convert(token: impl Into<String>, span: Span, source: ConvertError) -> Self {
        ParseError::Convert {
            token: token.into(),
            span,
            source,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::EmptyPattern => None,
            ParseError::MalformedToken { span, .. } => Some(*span),
            ParseError::UnclosedGrace { open_span, .. } => Some(*open_span),
            ParseError::Convert { span, .. } => Some(*span),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyPattern => write!(f, "Empty pattern"),
            ParseError::MalformedToken { token, span } => {
                write!(f, "Invalid note '{}' at {}", token, span)
            }
            ParseError::UnclosedGrace { open_span } => {
                write!(f, "Unclosed grace note group opened at {}", open_span)
            }
            ParseError::Convert { token, span, source } => {
                write!(f, "{} (in '{}' at {})", source, token, span)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Convert { source, .. } => Some(source),
            _ => None,
        }
    }
}
