use super::*;

fn texts(user: &User) -> Vec<&str> {
    extract_tokens(user).iter().map(|t| t.text).collect()
}

#[test]
fn test_tokens_in_insertion_order() {
    let user = User::new(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv");
    assert_eq!(texts(&user), vec!["Ervin", "Howell", "Antonette", "Shanna"]);
}

#[test]
fn test_token_sources() {
    let user = User::new(3, "Clementine Bauch", "Samantha", "Nathan@yesenia.net");
    let sources: Vec<TokenSource> = extract_tokens(&user).iter().map(|t| t.source).collect();
    assert_eq!(sources, vec![
        TokenSource::Name,
        TokenSource::Name,
        TokenSource::Username,
        TokenSource::EmailLocalPart,
    ]);
}

#[test]
fn test_multi_word_name() {
    let user = User::new(5, "Mrs. Dennis Schulist", "Leopoldo_Corkery", "Karley_Dach@jasper.info");
    assert_eq!(texts(&user), vec!["Mrs.", "Dennis", "Schulist", "Leopoldo_Corkery", "Karley_Dach"]);
}

#[test]
fn test_token_source_display() {
    assert_eq!(TokenSource::Name.to_string(), "name");
    assert_eq!(TokenSource::Username.to_string(), "username");
    assert_eq!(TokenSource::EmailLocalPart.to_string(), "email");
}

#[test]
fn test_canonicalize_borrows_lowercase_input() {
    assert!(matches!(canonicalize("already lower"), std::borrow::Cow::Borrowed(_)));
    assert!(matches!(canonicalize("Mixed"), std::borrow::Cow::Owned(_)));
    assert_eq!(canonicalize("LEANNE"), "leanne");
}
