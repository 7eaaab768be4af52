//! Single-pass scanner over the source text.
//!
//! Works a sliding window `[start, cur)` left to right, tracking 1-based
//! line and column so every token and every error carries provenance. The
//! token stream always ends with an `Eof` sentinel.

use y86_core::isa;
use y86_core::state::Register;

use crate::errors::{ScanError, ScanErrorKind};
use crate::token::{Token, TokenKind};

/// Scans a source string into its token sequence.
///
/// # Errors
///
/// Returns a [`ScanError`] at the first invalid character, malformed
/// register, or malformed number.
pub fn scan(src: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(src).scan()
}

struct Scanner<'a> {
    src: &'a [u8],
    start: usize,
    cur: usize,
    line: u32,
    col: u32,
    token_col: u32,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.as_bytes(),
            start: 0,
            cur: 0,
            line: 1,
            col: 1,
            token_col: 1,
            tokens: Vec::new(),
        }
    }

    fn scan(mut self) -> Result<Vec<Token>, ScanError> {
        while !self.at_end() {
            self.start = self.cur;
            self.token_col = self.col;
            self.next_token()?;
        }
        self.push_literal(TokenKind::Eof, "");
        Ok(self.tokens)
    }

    fn at_end(&self) -> bool {
        self.cur >= self.src.len()
    }

    fn advance(&mut self) -> u8 {
        let byte = self.src[self.cur];
        self.cur += 1;
        self.col += 1;
        byte
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.cur).copied()
    }

    fn lexeme(&self) -> &str {
        // the scanner only ever advances byte-wise over ASCII it accepted
        std::str::from_utf8(&self.src[self.start..self.cur]).unwrap_or_default()
    }

    fn push(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.lexeme(), self.line, self.token_col);
        self.tokens.push(token);
    }

    fn push_literal(&mut self, kind: TokenKind, lexeme: &str) {
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.token_col));
    }

    fn error(&self, kind: ScanErrorKind) -> ScanError {
        ScanError {
            kind,
            line: self.line,
            col: self.token_col,
        }
    }

    fn next_token(&mut self) -> Result<(), ScanError> {
        let byte = self.advance();
        match byte {
            b'\n' => {
                self.line += 1;
                self.col = 1;
            }
            b' ' | b'\t' | b'\r' => {}
            b'(' => self.push_literal(TokenKind::LParen, "("),
            b')' => self.push_literal(TokenKind::RParen, ")"),
            b':' => self.push_literal(TokenKind::Colon, ":"),
            b',' => self.push_literal(TokenKind::Comma, ","),
            b'.' => self.identifier(),
            b'%' => self.register()?,
            b'0' => self.zero_prefixed()?,
            b'1'..=b'9' | b'-' => self.number()?,
            c if c.is_ascii_alphabetic() || c == b'_' => self.identifier(),
            other => {
                return Err(self.error(ScanErrorKind::InvalidCharacter(char::from(other))));
            }
        }
        Ok(())
    }

    /// `0x` begins a hex literal; `0(` emits the number `0` and leaves the
    /// paren for the next round; anything else continues as decimal.
    fn zero_prefixed(&mut self) -> Result<(), ScanError> {
        match self.peek() {
            Some(b'x') => {
                self.advance();
                self.hex_number()
            }
            Some(b'(') => {
                self.push(TokenKind::Number);
                Ok(())
            }
            _ => self.number(),
        }
    }

    fn number(&mut self) -> Result<(), ScanError> {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
        let has_digits = self.lexeme().bytes().any(|b| b.is_ascii_digit());
        if !has_digits || !self.at_number_boundary() {
            while self.peek().is_some_and(|b| !is_number_terminator(b)) {
                self.advance();
            }
            return Err(self.error(ScanErrorKind::MalformedNumber(self.lexeme().to_owned())));
        }
        self.push(TokenKind::Number);
        Ok(())
    }

    fn hex_number(&mut self) -> Result<(), ScanError> {
        let digits_start = self.cur;
        while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
            self.advance();
        }
        if self.cur == digits_start || !self.at_number_boundary() {
            while self.peek().is_some_and(|b| !is_number_terminator(b)) {
                self.advance();
            }
            return Err(self.error(ScanErrorKind::MalformedNumber(self.lexeme().to_owned())));
        }
        self.push(TokenKind::Number);
        Ok(())
    }

    fn at_number_boundary(&self) -> bool {
        self.peek().is_none_or(is_number_terminator)
    }

    /// `%` + register tail, emitted under its canonical name.
    fn register(&mut self) -> Result<(), ScanError> {
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
            self.advance();
        }
        let lexeme = self.lexeme().to_owned();
        match Register::from_name(&lexeme) {
            Some(reg) => {
                self.push_literal(TokenKind::Register, reg.name());
                Ok(())
            }
            None => Err(self.error(ScanErrorKind::MalformedRegister(lexeme))),
        }
    }

    /// Identifier, classified by table lookup: mnemonic, directive, or
    /// label.
    fn identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_byte) {
            self.advance();
        }
        let kind = match self.lexeme() {
            lex if isa::is_mnemonic(lex) => TokenKind::Instruction,
            ".pos" | ".quad" => TokenKind::Directive,
            _ => TokenKind::Label,
        };
        self.push(kind);
    }
}

const fn is_number_terminator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b',' | b'(' | b')')
}

const fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'_'
}

#[cfg(test)]
mod tests {
    use super::scan;
    use crate::errors::{ScanError, ScanErrorKind};
    use crate::token::TokenKind;

    fn kinds(src: &str) -> Vec<TokenKind> {
        scan(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn lexemes(src: &str) -> Vec<String> {
        scan(src).unwrap().into_iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn empty_source_yields_only_the_sentinel() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn single_character_tokens() {
        assert_eq!(
            kinds("( ) : ,"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn mnemonics_classify_as_instructions() {
        assert_eq!(
            kinds("irmovq halt jg modq"),
            vec![TokenKind::Instruction; 4]
                .into_iter()
                .chain([TokenKind::Eof])
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn unknown_identifiers_classify_as_labels() {
        assert_eq!(
            kinds("main loop_2 x.y"),
            vec![
                TokenKind::Label,
                TokenKind::Label,
                TokenKind::Label,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn directives_are_recognised_and_unknown_dots_fall_back_to_labels() {
        assert_eq!(
            kinds(".pos .quad .align"),
            vec![
                TokenKind::Directive,
                TokenKind::Directive,
                TokenKind::Label,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn registers_emit_canonical_names() {
        assert_eq!(
            lexemes("%rax %rsp %r8 %r15"),
            vec!["%rax", "%rsp", "%r8", "%r15", ""]
        );
    }

    #[test]
    fn malformed_registers_error_with_location() {
        assert_eq!(
            scan("  %r16"),
            Err(ScanError {
                kind: ScanErrorKind::MalformedRegister("%r16".into()),
                line: 1,
                col: 3,
            })
        );
        assert!(scan("%x").is_err());
        assert!(scan("%").is_err());
    }

    #[test]
    fn decimal_and_hex_numbers() {
        let tokens = scan("42 0x1F 0 -7").unwrap();
        assert_eq!(
            tokens
                .iter()
                .map(|t| (t.kind, t.lexeme.as_str()))
                .collect::<Vec<_>>(),
            vec![
                (TokenKind::Number, "42"),
                (TokenKind::Number, "0x1F"),
                (TokenKind::Number, "0"),
                (TokenKind::Number, "-7"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn zero_before_a_paren_keeps_the_paren() {
        assert_eq!(
            kinds("0(%rbx)"),
            vec![
                TokenKind::Number,
                TokenKind::LParen,
                TokenKind::Register,
                TokenKind::RParen,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn displacement_before_a_paren_terminates_cleanly() {
        assert_eq!(
            lexemes("16(%rbp)"),
            vec!["16", "(", "%rbp", ")", ""]
        );
    }

    #[test]
    fn malformed_numbers_error() {
        assert!(matches!(
            scan("12ab").unwrap_err().kind,
            ScanErrorKind::MalformedNumber(_)
        ));
        assert!(matches!(
            scan("0x").unwrap_err().kind,
            ScanErrorKind::MalformedNumber(_)
        ));
        assert!(matches!(
            scan("0xZZ").unwrap_err().kind,
            ScanErrorKind::MalformedNumber(_)
        ));
        assert!(matches!(
            scan("-").unwrap_err().kind,
            ScanErrorKind::MalformedNumber(_)
        ));
    }

    #[test]
    fn invalid_characters_error_with_line_and_column() {
        let err = scan("nop\n  @").unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::InvalidCharacter('@'));
        assert_eq!((err.line, err.col), (2, 3));
    }

    #[test]
    fn provenance_tracks_lines_and_columns() {
        let tokens = scan("irmovq 5, %rax\nloop:\n").unwrap();
        let loop_token = &tokens[4];
        assert_eq!(loop_token.lexeme, "loop");
        assert_eq!((loop_token.line, loop_token.col), (2, 1));
        let colon = &tokens[5];
        assert_eq!((colon.line, colon.col), (2, 5));
    }

    #[test]
    fn a_full_instruction_line_scans_in_order() {
        assert_eq!(
            kinds("mrmovq 8(%rbx), %rax"),
            vec![
                TokenKind::Instruction,
                TokenKind::Number,
                TokenKind::LParen,
                TokenKind::Register,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Register,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn label_definitions_scan_as_label_then_colon() {
        assert_eq!(
            kinds("target:\n  nop"),
            vec![
                TokenKind::Label,
                TokenKind::Colon,
                TokenKind::Instruction,
                TokenKind::Eof
            ]
        );
    }
}
