use super::slugify;

#[test]
fn slug_lowercases_and_hyphenates_whitespace() {
    assert_eq!(slugify("Men's Fashion"), "men's-fashion");
    assert_eq!(slugify("Electronics"), "electronics");
    assert_eq!(slugify("  Home   Decor  "), "home-decor");
}

#[test]
fn slug_keeps_non_whitespace_punctuation() {
    assert_eq!(slugify("Home & Living"), "home-&-living");
}

#[test]
fn slug_collapses_tabs_and_newlines() {
    assert_eq!(slugify("Sports\tand\nOutdoors"), "sports-and-outdoors");
}
