//! Token construction behind an injectable factory seam

use super::token::{Token, TokenProvenance, TokenType, DEFAULT_CHANNEL, EOF};
use crate::utils::Span;

/// Everything needed to build one token.
///
/// `override_text` takes precedence over `source_text`; the latter is the
/// slice of input covered by the token's span.
#[derive(Debug, Clone)]
pub struct TokenBlueprint {
    pub token_type: TokenType,
    pub channel: usize,
    pub span: Span,
    pub provenance: TokenProvenance,
    pub source_text: String,
    pub override_text: Option<String>,
}

/// Factory seam letting embedders substitute their own token construction
pub trait TokenFactory {
    fn create(&self, blueprint: TokenBlueprint) -> Token;
}

/// Default factory producing plain [`Token`] values
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonTokenFactory;

impl CommonTokenFactory {
    pub fn new() -> Self {
        Self
    }
}

impl TokenFactory for CommonTokenFactory {
    fn create(&self, blueprint: TokenBlueprint) -> Token {
        let text = blueprint
            .override_text
            .unwrap_or(blueprint.source_text);
        Token::new(
            blueprint.token_type,
            blueprint.channel,
            text,
            blueprint.span,
            blueprint.provenance,
        )
    }
}

impl TokenBlueprint {
    /// Blueprint for an end of file token at the given position
    pub fn end_of_file(span: Span, provenance: TokenProvenance) -> Self {
        Self {
            token_type: EOF,
            channel: DEFAULT_CHANNEL,
            span,
            provenance,
            source_text: String::new(),
            override_text: Some("<EOF>".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token::MIN_USER_TOKEN_TYPE;
    use crate::utils::Position;

    #[test]
    fn test_factory_uses_source_text() {
        let factory = CommonTokenFactory::new();
        let token = factory.create(TokenBlueprint {
            token_type: MIN_USER_TOKEN_TYPE,
            channel: DEFAULT_CHANNEL,
            span: Span::from_offsets(0, 2),
            provenance: TokenProvenance::detached(),
            source_text: "ab".to_string(),
            override_text: None,
        });
        assert_eq!(token.text, "ab");
        assert_eq!(token.token_type, MIN_USER_TOKEN_TYPE);
    }

    #[test]
    fn test_factory_prefers_override_text() {
        let factory = CommonTokenFactory::new();
        let token = factory.create(TokenBlueprint {
            token_type: MIN_USER_TOKEN_TYPE,
            channel: DEFAULT_CHANNEL,
            span: Span::from_offsets(0, 2),
            provenance: TokenProvenance::detached(),
            source_text: "ab".to_string(),
            override_text: Some("rewritten".to_string()),
        });
        assert_eq!(token.text, "rewritten");
    }

    #[test]
    fn test_end_of_file_blueprint() {
        let factory = CommonTokenFactory::new();
        let position = Position::new(5, 2, 1);
        let token = factory.create(TokenBlueprint::end_of_file(
            Span::new(position, position),
            TokenProvenance::detached(),
        ));
        assert!(token.is_eof());
        assert_eq!(token.text, "<EOF>");
        assert_eq!(token.span.start(), position);
        assert_eq!(token.span.end(), position);
    }
}
