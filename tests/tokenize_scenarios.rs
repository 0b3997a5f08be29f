use tokenize::{Resource, TokenSet, TokenType};

fn type_decl_token_set() -> TokenSet {
    let mut ts = TokenSet::new();
    ts.add_string_token("type", TokenType::Keyword, -1);
    ts.add_regex_token("([a-zA-Z_]+)\\w*", TokenType::Identifier, -1);
    ts.add_string_token("=", TokenType::Symbol, -1);
    ts.add_string_token("{", TokenType::Symbol, -1);
    ts.add_string_token("}", TokenType::Symbol, -1);
    ts.add_string_token(":", TokenType::Symbol, -1);
    ts.add_string_token(";", TokenType::EndOfStatement, -1);
    ts
}

#[test]
fn keyword_identifier_symbol_mix_produces_eleven_located_tokens() {
    let src = Resource::new(b"type Test = {\n    a: i32;\n};", 0);
    let ts = type_decl_token_set();

    let scanned = src.tokenize(&ts).expect("well-formed type declaration");
    let tokens = scanned.tokens();
    assert_eq!(tokens.len(), 11);

    let expected = [
        (TokenType::Keyword, "type", 0, 4, 0, 0, 0, 4),
        (TokenType::Identifier, "Test", 5, 9, 0, 0, 5, 9),
        (TokenType::Symbol, "=", 10, 11, 0, 0, 10, 11),
        (TokenType::Symbol, "{", 12, 13, 0, 0, 12, 13),
        (TokenType::Identifier, "a", 18, 19, 1, 1, 4, 5),
        (TokenType::Symbol, ":", 19, 20, 1, 1, 5, 6),
        (TokenType::Identifier, "i32", 21, 24, 1, 1, 7, 10),
        (TokenType::EndOfStatement, ";", 24, 25, 1, 1, 10, 11),
        (TokenType::Symbol, "}", 26, 27, 2, 2, 0, 1),
        (TokenType::EndOfStatement, ";", 27, 28, 2, 2, 1, 2),
    ];

    for (tok, (ty, text, sb, eb, sl, el, sc, ec)) in tokens.iter().zip(expected.iter()) {
        assert_eq!(tok.token_type, *ty);
        assert_eq!(tok.sub_type, -1);
        assert_eq!(tok.content_begin_offset, -1);
        assert_eq!(tok.content_length, -1);
        assert_eq!(tok.as_str(), *text);
        assert_eq!(tok.location.resource_id, 0);
        assert_eq!(tok.location.start_buffer_position, *sb);
        assert_eq!(tok.location.end_buffer_position, *eb);
        assert_eq!(tok.location.start_line, *sl);
        assert_eq!(tok.location.end_line, *el);
        assert_eq!(tok.location.start_column, *sc);
        assert_eq!(tok.location.end_column, *ec);
    }

    assert_eq!(tokens[10].token_type, TokenType::EndOfInput);
}

#[test]
fn real_tokens_are_monotonically_non_overlapping() {
    let src = Resource::new(b"type Test = {\n    a: i32;\n};", 0);
    let ts = type_decl_token_set();
    let scanned = src.tokenize(&ts).expect("well-formed type declaration");

    let real = &scanned.tokens()[..scanned.tokens().len() - 1];
    for pair in real.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.location.end_buffer_position <= b.location.start_buffer_position);

        let gap = src.bytes_at_location(&tokenize::SourceLocation {
            resource_id: 0,
            start_buffer_position: a.location.end_buffer_position,
            end_buffer_position: b.location.start_buffer_position,
            ..Default::default()
        });
        assert!(gap.iter().all(|b| b.is_ascii_whitespace()));
    }
}

#[test]
fn ranged_literal_content_matches_the_bytes_between_delimiters() {
    let mut ts = TokenSet::new();
    ts.add_ranged_string_token("'", "'", "\\$", TokenType::StringLiteral, -1);

    let src = Resource::new(b" 'abc\\'def$''", 0);
    let scanned = src.tokenize(&ts).expect("well-formed string literal");
    let tok = &scanned.tokens()[0];

    assert_eq!(tok.token_type, TokenType::StringLiteral);
    assert_eq!(tok.content_str(), "abc\\'def$'");
}

#[test]
fn ranged_regex_comment_is_recognized_end_to_end() {
    let mut ts = TokenSet::new();
    ts.add_ranged_regex_token("<c>", "<\\/c>", TokenType::Comment, -1);

    let src = Resource::new(b" <c>test test test</c>", 0);
    let scanned = src.tokenize(&ts).expect("well-formed comment");
    let tokens = scanned.tokens();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].token_type, TokenType::Comment);
    assert_eq!(tokens[0].content_str(), "test test test");
}

#[test]
fn unterminated_ranged_token_surfaces_as_an_error_not_a_partial_stream() {
    let mut ts = TokenSet::new();
    ts.add_ranged_string_token("'", "'", "\\", TokenType::StringLiteral, -1);

    let src = Resource::new(b"'abc", 0);
    let err = src.tokenize(&ts).expect_err("unterminated literal must fail");
    assert_eq!(err.location().start_buffer_position, 0);
    assert_eq!(err.location().end_buffer_position, 4);
}

#[test]
fn empty_and_whitespace_only_input_yield_only_end_of_input() {
    let ts = type_decl_token_set();

    let empty = Resource::new(b"", 1);
    let scanned = empty.tokenize(&ts).expect("empty input never fails");
    assert_eq!(scanned.tokens().len(), 1);
    assert_eq!(scanned.tokens()[0].token_type, TokenType::EndOfInput);

    let whitespace = Resource::new(b"   \r\n\t ", 2);
    let scanned = whitespace.tokenize(&ts).expect("whitespace-only input never fails");
    assert_eq!(scanned.tokens().len(), 1);
    assert_eq!(scanned.tokens()[0].token_type, TokenType::EndOfInput);
}

#[test]
fn literal_beats_regex_at_every_position_where_both_apply() {
    let mut ts = TokenSet::new();
    ts.add_regex_token("keyword\\b", TokenType::Keyword, -1);
    ts.add_regex_token("([a-zA-Z_]+)\\w*", TokenType::Identifier, -1);

    let src = Resource::new(b"keyword", 0);
    let scanned = src.tokenize(&ts).expect("regex-only match");
    assert_eq!(scanned.tokens()[0].token_type, TokenType::Keyword);

    let mut ts_with_literal = TokenSet::new();
    ts_with_literal.add_regex_token("([a-zA-Z_]+)\\w*", TokenType::Identifier, -1);
    ts_with_literal.add_string_token("keyword", TokenType::Keyword, -1);

    let scanned = src.tokenize(&ts_with_literal).expect("literal-beats-regex match");
    assert_eq!(scanned.tokens()[0].token_type, TokenType::Keyword);
}

#[test]
fn calculate_source_location_from_range_matches_the_universal_invariant() {
    let src = Resource::new(b"abc\ndef\nghi", 0);

    let loc = src.calculate_source_location_from_range(1, 7);
    assert_eq!(loc.resource_id, 0);
    assert_eq!(loc.start_buffer_position, 1);
    assert_eq!(loc.end_buffer_position, 7);
    assert_eq!((loc.start_line, loc.start_column), (0, 1));
    assert_eq!((loc.end_line, loc.end_column), (1, 3));

    assert_eq!(src.line(2), "ghi");

    let src_crlf = Resource::new(b"abc\ndef\nghi\r\njkl", 0);
    assert_eq!(src_crlf.line(2), "ghi\r\n");

    let invalid = src.calculate_source_location_from_range(0, 100);
    assert!(!invalid.is_valid());
}
