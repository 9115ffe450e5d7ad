//! Name formatting, corruption detection and reconstruction tests

use im_authors::{format_name, is_corrupted, reconstruct, title_case};
use proptest::prelude::*;
use rstest::rstest;

// === Formatting ===

#[rstest]
#[case("Murilo Mendes", "MENDES, Murilo")]
#[case("Bonvicino, Régis", "BONVICINO, Régis")]
#[case("Bach", "BACH")]
#[case("  Carlos   Drummond   de Andrade ", "ANDRADE, Carlos Drummond de")]
#[case("João Cabral de Melo Neto", "NETO, João Cabral de Melo")]
#[case("pessoa,fernando", "PESSOA, fernando")]
#[case("Bach,", "BACH")]
#[case("", "")]
#[case("   ", "")]
fn test_format_name(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(format_name(raw), expected, "input: {:?}", raw);
}

#[test]
fn test_format_keeps_given_name_casing() {
    assert_eq!(format_name("valter hugo mãe"), "MÃE, valter hugo");
    assert_eq!(format_name("Cummings, e. e."), "CUMMINGS, e. e.");
}

// === Corruption ===

#[rstest]
#[case(&["MENDES", "MURILO", "CABRAL", "JOÃO"], true)]
#[case(&["MENDES, Murilo", "CABRAL, João"], false)]
#[case(&["KOZER", "José Kozer"], false)]
#[case(&["BACH"], false)]
#[case(&[], false)]
#[case(&["A", "B", "C", "D", "E", "F", "G", "SILVA, José", "SOUZA, Ana", "LIMA, Rui"], false)]
#[case(&["A", "B", "C", "D", "E", "F", "G", "H", "SOUZA, Ana", "LIMA, Rui"], true)]
fn test_is_corrupted(#[case] names: &[&str], #[case] expected: bool) {
    assert_eq!(is_corrupted(names), expected, "names: {:?}", names);
}

// === Reconstruction ===

#[test]
fn test_reconstruct_two_people() {
    assert_eq!(
        reconstruct(&["MENDES", "MURILO", "CABRAL", "JOÃO"]),
        vec!["MENDES, Murilo", "CABRAL, João"]
    );
}

#[test]
fn test_reconstruct_absorbs_preposition() {
    let names = reconstruct(&["ANDRADE", "DE", "DRUMMOND", "CARLOS"]);
    assert!(names[0].starts_with("ANDRADE, De"));
    assert_eq!(names.len(), 2);
}

#[rstest]
#[case(&["CAMPOS", "HAROLDO", "DE"], "CAMPOS, Haroldo De")]
#[case(&["CAMPOS", "AUGUSTO", "DA"], "CAMPOS, Augusto Da")]
#[case(&["SOUSA", "ANA", "DOS"], "SOUSA, Ana Dos")]
#[case(&["LIMA", "RUI", "DAS"], "LIMA, Rui Das")]
#[case(&["REIS", "RICARDO", "DO"], "REIS, Ricardo Do")]
fn test_reconstruct_particles(#[case] tokens: &[&str], #[case] expected: &str) {
    assert_eq!(reconstruct(tokens), vec![expected]);
}

// === Properties ===

proptest! {
    #[test]
    fn test_format_is_idempotent(raw in "[A-Za-zÀ-ÿ ,.'-]{0,40}") {
        let once = format_name(&raw);
        prop_assert_eq!(format_name(&once), once.clone(), "input: {:?}", raw);
    }

    #[test]
    fn test_format_surname_is_uppercase(raw in "[A-Za-z ,]{1,40}") {
        let formatted = format_name(&raw);
        let surname = formatted.split(',').next().unwrap_or("");
        prop_assert_eq!(surname.to_uppercase(), surname);
    }

    #[test]
    fn test_reconstruct_never_grows(tokens in prop::collection::vec("[A-Za-z]{1,8}", 0..20)) {
        let names = reconstruct(&tokens);
        prop_assert!(names.len() <= tokens.len());
        prop_assert_eq!(names.is_empty(), tokens.is_empty());
    }

    #[test]
    fn test_reconstruct_keeps_every_token(tokens in prop::collection::vec("[A-Z]{1,8}", 1..20)) {
        let names = reconstruct(&tokens);
        let words: usize = names
            .iter()
            .map(|name| name.split(|c| c == ' ' || c == ',').filter(|w| !w.is_empty()).count())
            .sum();
        prop_assert_eq!(words, tokens.len());
    }

    #[test]
    fn test_title_case_has_no_inner_capitals(word in "[A-Z]{2,12}") {
        let titled = title_case(&word);
        prop_assert!(titled.chars().skip(1).all(|c| c.is_lowercase()));
    }
}
