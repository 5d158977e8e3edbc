use super::tokenize;

fn texts(input: &str) -> Vec<&str> {
    tokenize(input).into_iter().map(|t| t.text).collect()
}

#[test]
fn words_and_punctuation() {
    assert_eq!(texts("move north, then stop!"), ["move", "north", ",", "then", "stop", "!"]);
}

#[test]
fn quoted_spans_stay_whole() {
    assert_eq!(
        texts(r#"say "hello there" to 'the world'"#),
        ["say", "\"hello there\"", "to", "'the world'"]
    );
}

#[test]
fn unterminated_quote_falls_back_to_single_chars() {
    assert_eq!(texts("it's fine"), ["it", "'", "s", "fine"]);
}

#[test]
fn empty_and_blank_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" \t\n ").is_empty());
}

#[test]
fn spans_point_into_input() {
    let input = "  set x = 42";
    let tokens = tokenize(input);
    insta::assert_debug_snapshot!(tokens.iter().map(|t| (t.text, t.span)).collect::<Vec<_>>(), @r#"
    [
        (
            "set",
            (
                2,
                5,
            ),
        ),
        (
            "x",
            (
                6,
                7,
            ),
        ),
        (
            "=",
            (
                8,
                9,
            ),
        ),
        (
            "42",
            (
                10,
                12,
            ),
        ),
    ]
    "#);
    for token in &tokens {
        assert_eq!(&input[token.range()], token.text);
    }
}

#[test]
fn concatenation_reconstructs_non_whitespace() {
    let input = "a+b  'c d'\t\"e\"  f_1";
    let joined: String = texts(input).concat();
    let expected: String = input.split_whitespace().collect();
    // Quoted spans keep their inner whitespace
    assert_eq!(joined.replace(' ', ""), expected.replace(' ', ""));
    assert_eq!(texts(input), ["a", "+", "b", "'c d'", "\"e\"", "f_1"]);
}

#[test]
fn unicode_word_characters() {
    assert_eq!(texts("café über"), ["café", "über"]);
}
