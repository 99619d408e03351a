use permanence_core::paths::{form_file, form_id_from_file, form_id_from_name, IdStyle};

#[test]
fn slug_with_underscores() {
    assert_eq!(
        form_id_from_name("  Blood Pressure -- Morning  ", IdStyle::Underscore),
        "blood_pressure_morning"
    );
    assert_eq!(form_id_from_name("GAD-7 (anxiety)", IdStyle::Underscore), "gad_7_anxiety");
}

#[test]
fn slug_with_hyphens() {
    assert_eq!(
        form_id_from_name("Sleep_quality log", IdStyle::Hyphen),
        "sleep-quality-log"
    );
}

#[test]
fn slug_drops_non_ascii_letters() {
    assert_eq!(form_id_from_name("Dotazník č. 2", IdStyle::Underscore), "dotaznk_2");
}

#[test]
fn empty_slug_gets_timestamped_id() {
    for name in ["", "   ", "!!!"] {
        let id = form_id_from_name(name, IdStyle::Underscore);
        let millis = id.strip_prefix("form-").expect("fallback id");
        assert!(millis.parse::<i64>().is_ok(), "unexpected id {id}");
    }
}

#[test]
fn form_file_names() {
    assert_eq!(form_file("weight"), "weight.json");
    assert_eq!(form_id_from_file("weight.json"), Some("weight"));
    assert_eq!(form_id_from_file(".json"), None);
    assert_eq!(form_id_from_file("weight.json.tmp"), None);
    assert_eq!(form_id_from_file("weightjson"), None);
}
