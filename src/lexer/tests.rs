#[cfg(test)]
use super::*;

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let tok = lexer.next_token().expect("tokenize");
        if tok == Token::Eof {
            break;
        }
        out.push(tok);
    }
    out
}

#[test]
fn test_object_tokens() {
    let expected = vec![
        Token::LBrace,
        Token::Word("name".into()),
        Token::Colon,
        Token::String("\"app\"".into()),
        Token::Comma,
        Token::Word("list".into()),
        Token::Colon,
        Token::LBracket,
        Token::Word("1".into()),
        Token::Comma,
        Token::Word("0x10".into()),
        Token::RBracket,
        Token::RBrace,
    ];
    assert_eq!(tokens("{name: \"app\", list: [1, 0x10]}"), expected);
}

#[test]
fn test_parent_list_is_one_word() {
    assert_eq!(
        tokens("debug(base,common):{}"),
        vec![
            Token::Word("debug(base,common)".into()),
            Token::Colon,
            Token::LBrace,
            Token::RBrace,
        ]
    );
}

#[test]
fn test_variable_braces_stay_in_word() {
    assert_eq!(
        tokens("out:${root}/bin,"),
        vec![
            Token::Word("out".into()),
            Token::Colon,
            Token::Word("${root}/bin".into()),
            Token::Comma,
        ]
    );
}

#[test]
fn test_unterminated_variable_is_literal() {
    assert_eq!(
        tokens("{a: ${x, b: 1}"),
        vec![
            Token::LBrace,
            Token::Word("a".into()),
            Token::Colon,
            Token::Word("${x".into()),
            Token::Comma,
            Token::Word("b".into()),
            Token::Colon,
            Token::Word("1".into()),
            Token::RBrace,
        ]
    );
}

#[test]
fn test_unclosed_paren_is_literal() {
    assert_eq!(
        tokens("{msg: sad:(, b: 1}"),
        vec![
            Token::LBrace,
            Token::Word("msg".into()),
            Token::Colon,
            Token::Word("sad".into()),
            Token::Colon,
            Token::Word("(".into()),
            Token::Comma,
            Token::Word("b".into()),
            Token::Colon,
            Token::Word("1".into()),
            Token::RBrace,
        ]
    );
}

#[test]
fn test_platform_tag_is_part_of_word() {
    assert_eq!(
        tokens("lib<Windows>:x"),
        vec![
            Token::Word("lib<Windows>".into()),
            Token::Colon,
            Token::Word("x".into()),
        ]
    );
}

#[test]
fn test_string_escapes_are_kept_raw() {
    assert_eq!(tokens(r#""a\"b\\""#), vec![Token::String(r#""a\"b\\""#.into())]);
}

#[test]
fn test_single_quoted_string_is_requoted() {
    assert_eq!(
        tokens(r#"'say "hi"'"#),
        vec![Token::String(r#""say \"hi\"""#.into())]
    );
}

#[test]
fn test_unclosed_string() {
    let mut lexer = Lexer::new("key: \"open");
    assert_eq!(lexer.next_token(), Ok(Token::Word("key".into())));
    assert_eq!(lexer.next_token(), Ok(Token::Colon));
    match lexer.next_token() {
        Err(JscError::UnclosedString { quote, line, column, .. }) => {
            assert_eq!(quote, '"');
            assert_eq!(line, 1);
            assert_eq!(column, 5);
        }
        other => panic!("Expected UnclosedString, got {:?}", other),
    }
}

#[test]
fn test_token_positions_track_lines() {
    let mut lexer = Lexer::new("{\n  a: 1\n}");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_line(), 2);
    assert_eq!(lexer.token_column(), 2);
}
