//! Selector parsing tests
//!
//! Escaping convention for `abstract(tag, predicate, property)`:
//!
//! - literals are quoted with `'` or `"`
//! - inside a literal, a doubled quote (`''`) or a backslash (`\'`, `\"`,
//!   `\\`) yields the literal character
//! - any other backslash is kept, so regex classes like `\d` pass through
//! - commas and parentheses inside literals never split arguments
//! - commas inside balanced parentheses never split arguments
//! - an unterminated literal or unbalanced parenthesis is rejected

use webattr::error::SelectorError;
use webattr::extraction::selector::split_arguments;
use webattr::extraction::{resolve, Predicate, Property};

#[test]
fn test_doubled_single_quote() {
    let q = resolve("abstract(meta, content -eq 'it''s here', name)").unwrap();
    assert!(q.predicate().test("it's here"));
}

#[test]
fn test_backslash_escaped_quote() {
    let q = resolve(r"abstract(meta, content -eq 'it\'s here', name)").unwrap();
    assert!(q.predicate().test("it's here"));
}

#[test]
fn test_double_quoted_literal_with_single_quotes_inside() {
    let q = resolve(r#"abstract(meta, content -eq "it's, here", name)"#).unwrap();
    assert!(q.predicate().test("it's, here"));
}

#[test]
fn test_escaped_backslash() {
    let q = resolve(r"abstract(meta, content -eq 'C:\\temp', name)").unwrap();
    assert!(q.predicate().test(r"C:\temp"));
}

#[test]
fn test_regex_escapes_reach_the_pattern() {
    let q = resolve(r"abstract(a, href -match '^/p/\d+$', href)").unwrap();
    assert_eq!(q.predicate().to_string(), r"href -match '^/p/\\d+$'");
    assert!(q.predicate().test("/p/42"));
    assert!(!q.predicate().test("/p/dd"));

    let q = resolve(r"abstract(a, innerText -match '\w+\s\w+', href)").unwrap();
    assert!(q.predicate().test("read more"));
    assert!(!q.predicate().test("readmore"));
}

#[test]
fn test_comma_inside_literal_does_not_split() {
    let args = split_arguments("meta, content -eq 'a, b, c', name").unwrap();
    assert_eq!(args.len(), 3);
    assert_eq!(args[1], "content -eq 'a, b, c'");
}

#[test]
fn test_paren_inside_literal_does_not_unbalance() {
    let q = resolve("abstract(a, innerText -eq 'click (here', href)").unwrap();
    assert!(q.predicate().test("click (here"));
}

#[test]
fn test_regex_groups_with_commas() {
    let q = resolve("abstract(a, href -match '^https://(a|b),x', href)").unwrap();
    assert!(q.predicate().test("https://a,x"));
}

#[test]
fn test_predicate_property_prefix() {
    let q = resolve("abstract(link, $_.rel -eq 'canonical', $_.href)").unwrap();
    assert_eq!(q.property(), &Property::Attribute("href".to_string()));
    assert_eq!(q.predicate().property(), &Property::Attribute("rel".to_string()));
}

#[test]
fn test_predicate_variants() {
    assert!(matches!(
        resolve("abstract(a, class contains 'btn', href)").unwrap().predicate(),
        Predicate::Contains { .. }
    ));
    assert!(matches!(
        resolve("abstract(a, class matches 'b.n', href)").unwrap().predicate(),
        Predicate::Matches { .. }
    ));
    assert!(matches!(
        resolve("abstract(a, class equals btn, href)").unwrap().predicate(),
        Predicate::Equals { .. }
    ));
}

#[test]
fn test_invalid_selectors() {
    let cases = [
        "",
        "not-a-valid-selector",
        "abstract",
        "abstract()",
        "abstract(meta)",
        "abstract(meta, name -eq 'x')",
        "abstract(meta, name -eq 'x', content, more)",
        "abstract(, name -eq 'x', content)",
        "abstract(meta, name -eq 'x', )",
        "abstract(meta, name -eq 'x, content)",
        "abstract(meta, name -eq x), content)",
        "abstract(meta, name -eq 'x', content",
        "abstract(meta, name, content)",
        "abstract(meta, name -lt 'x', content)",
        "abstract(meta, name -eq 'x', content value)",
        "abstract(me ta, name -eq 'x', content)",
    ];
    for case in cases {
        assert!(resolve(case).is_err(), "expected '{case}' to be rejected");
    }
}

#[test]
fn test_argument_count_error() {
    assert_eq!(
        resolve("abstract(meta)"),
        Err(SelectorError::ArgumentCount(1))
    );
    assert_eq!(
        resolve("abstract(meta, name -eq 'x', )"),
        Err(SelectorError::EmptyArgument(3))
    );
}

#[test]
fn test_bad_tag_and_property_are_reported_as_such() {
    assert_eq!(
        resolve("abstract(me ta, name -eq 'x', content)"),
        Err(SelectorError::InvalidTag("me ta".to_string()))
    );
    assert_eq!(
        resolve("abstract(meta, name -eq 'x', content value)"),
        Err(SelectorError::InvalidProperty("content value".to_string()))
    );
    assert_eq!(
        resolve("abstract(meta, na/me -eq 'x', content)"),
        Err(SelectorError::InvalidProperty("na/me".to_string()))
    );
}
