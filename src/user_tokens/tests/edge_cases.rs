use super::*;

#[test]
fn test_empty_fields_produce_no_tokens() {
    let user = User::new(1, "", "", "");
    assert!(extract_tokens(&user).is_empty());
}

#[test]
fn test_whitespace_only_name_is_skipped() {
    let user = User::new(1, "   \t  ", "solo", "solo@example.com");
    let tokens = extract_tokens(&user);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].source, TokenSource::Username);
}

#[test]
fn test_repeated_spaces_in_name() {
    let user = User::new(1, "  Leanne   Graham ", "Bret", "Sincere@april.biz");
    let names: Vec<&str> = extract_tokens(&user)
        .iter()
        .filter(|t| t.source == TokenSource::Name)
        .map(|t| t.text)
        .collect();
    assert_eq!(names, vec!["Leanne", "Graham"]);
}

#[test]
fn test_email_without_at_indexes_whole_value() {
    let user = User::new(1, "", "", "not-an-email");
    let tokens = extract_tokens(&user);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0], UserToken { source: TokenSource::EmailLocalPart, text: "not-an-email" });
}

#[test]
fn test_email_uses_first_at_only() {
    assert_eq!(email_local_part("a@b@c"), "a");
}

#[test]
fn test_email_with_empty_local_part_is_skipped() {
    let user = User::new(1, "", "", "@example.com");
    assert!(extract_tokens(&user).is_empty());
}

#[test]
fn test_duplicate_tokens_are_kept() {
    let user = User::new(1, "Bret Bret", "Bret", "bret@example.com");
    assert_eq!(extract_tokens(&user).len(), 4);
}

#[test]
fn test_canonicalize_non_ascii() {
    assert_eq!(canonicalize("ÅSA"), "åsa");
    assert_eq!(canonicalize("Straße"), "strasse");
    assert!(matches!(canonicalize("zoë"), std::borrow::Cow::Borrowed(_)));
}

#[test]
fn test_canonicalize_final_sigma_is_context_free() {
    assert_eq!(canonicalize("ΚΟΣΜΟΣ"), "κοσμοσ");
    assert_eq!(canonicalize("κόσμος"), "κόσμοσ");
    assert_eq!(canonicalize("ΚΟΣ"), "κοσ");
    assert!(canonicalize("ΚΟΣΜΟΣ").starts_with(canonicalize("ΚΟΣ").as_ref()));
}

#[test]
fn test_canonicalize_matches_upper_case_form() {
    for word in ["Straße", "Ørsted", "ΚΟΣΜΟΣ", "Ђорђе", "İstanbul"] {
        assert_eq!(canonicalize(word), canonicalize(&word.to_uppercase()), "{}", word);
    }
}
