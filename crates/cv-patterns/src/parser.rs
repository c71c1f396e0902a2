use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token};
use crate::pattern::{Note, Pattern, CV_EPSILON};
use crate::span::Span;
use cv_core::{duration_to_units, note_to_cv};

/// Parser for note patterns.
///
/// A pattern is whitespace-separated `name/duration` tokens, a trailing `~`
/// ties a token to the next one, and a parenthesized note name at the very
/// start of the string is an acciaccatura. Ties between equal pitches merge
/// into one longer note; ties between different pitches set the slide flag
/// on the note being left.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    resolution: u32,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str, resolution: u32) -> Self {
        Parser {
            lexer: Lexer::new(source),
            resolution,
        }
    }

    pub fn parse_pattern(&mut self) -> Result<Pattern> {
        let acciaccatura = self.parse_grace()?;

        let mut notes: Vec<Note> = Vec::new();
        let mut tied = false;
        while let Some((token, span)) = self.lexer.next_token() {
            match token {
                Token::Note => {
                    let raw = self.lexer.slice(span);
                    self.note_token(&mut notes, raw, span, &mut tied)?;
                }
                // A parenthesis past the pattern start is never a grace
                // note, just an invalid token.
                _ => return Err(ParseError::malformed_token(self.lexer.slice(span), span)),
            }
        }

        if notes.is_empty() {
            return Err(ParseError::EmptyPattern);
        }
        Ok(Pattern {
            notes,
            acciaccatura,
        })
    }

    /// Grace notes are only looked for at byte 0, before any note token;
    /// there is no later scan to reject them elsewhere.
    fn parse_grace(&mut self) -> Result<Option<f64>> {
        let open_span = match self.lexer.peek_token() {
            Some((Token::LParen, span)) if span.start == 0 => span,
            _ => return Ok(None),
        };
        self.lexer.next_token();

        let mut name = String::new();
        let mut name_span: Option<Span> = None;
        loop {
            match self.lexer.next_token() {
                Some((Token::RParen, _)) => break,
                Some((Token::Note, span)) => {
                    name.push_str(self.lexer.slice(span));
                    name_span = Some(name_span.map_or(span, |s| s.merge(span)));
                }
                Some((_, span)) => {
                    return Err(ParseError::malformed_token(self.lexer.slice(span), span))
                }
                None => return Err(ParseError::unclosed_grace(open_span)),
            }
        }

        let span = name_span.unwrap_or(open_span);
        let cv = note_to_cv(&name).map_err(|e| ParseError::convert(&name, span, e))?;
        Ok(Some(cv))
    }

    fn note_token(
        &self,
        notes: &mut Vec<Note>,
        raw: &str,
        span: Span,
        tied: &mut bool,
    ) -> Result<()> {
        let (body, ends_tied) = match raw.strip_suffix('~') {
            Some(body) => (body, true),
            None => (raw, false),
        };

        let mut parts = body.split('/');
        let (name, duration_part) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(duration), None) => (name, duration),
            _ => return Err(ParseError::malformed_token(raw, span)),
        };

        let cv = note_to_cv(name).map_err(|e| ParseError::convert(raw, span, e))?;
        let duration = duration_to_units(duration_part, self.resolution)
            .map_err(|e| ParseError::convert(raw, span, e))?;

        let merged = match notes.last_mut() {
            // Same-note legato: extend the retained note instead of
            // appending a new one.
            Some(last) if *tied && (cv - last.cv).abs() < CV_EPSILON => {
                last.duration += duration;
                true
            }
            Some(last) => {
                if *tied {
                    last.slide = true;
                }
                false
            }
            None => false,
        };
        if !merged {
            notes.push(Note {
                cv,
                duration,
                slide: false,
                name: name.to_string(),
            });
        }

        *tied = ends_tied;
        Ok(())
    }
}

/// Parse one pattern string at the given duration resolution.
pub fn parse_pattern(source: &str, resolution: u32) -> Result<Pattern> {
    Parser::new(source, resolution).parse_pattern()
}
