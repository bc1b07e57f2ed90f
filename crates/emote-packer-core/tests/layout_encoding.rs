use emote_packer_core::prelude::*;

fn e(name: &str, glyph: char, w: u32, h: u32) -> Emote {
    Emote::new(name, glyph, w, h).expect("non-zero size")
}

fn opts(tab_width: usize) -> LayoutOptions {
    LayoutOptions {
        tab_width,
        non_grouped_name: "other".into(),
        wide_name: "wide".into(),
    }
}

#[test]
fn sample_layout_matches_expected_bytes() {
    let catalog = vec![
        e("pwgood_a", 'A', 10, 10),
        e("peepoWide", 'B', 32, 10),
        e("xyz", 'C', 10, 10),
    ];
    let prefixes = vec!["pwgood".to_string(), "peepo".to_string()];
    let p = classify(&catalog, &prefixes, 1.6);
    let out = encode(&p, &opts(10));
    assert_eq!(
        out,
        "pwgood    A         other     C         wide       B "
    );
    assert!(out.starts_with("pwgood"));
}

#[test]
fn encoding_is_deterministic() {
    let p = Partition {
        wide: vec![e("w1", 'W', 40, 10), e("w2", 'V', 40, 10)],
        grouped: vec![EmoteGroup {
            prefix: "pepe".into(),
            emotes: vec![e("pepeA", 'a', 10, 10), e("pepeB", 'b', 10, 10)],
        }],
        ungrouped: vec![e("x", 'x', 10, 10)],
    };
    let first = encode(&p, &opts(8));
    for _ in 0..5 {
        assert_eq!(encode(&p, &opts(8)), first);
    }
}

#[test]
fn wide_glyph_moves_to_next_column_when_room_is_short() {
    let p = Partition {
        wide: vec![
            e("w1", 'B', 40, 10),
            e("w2", 'D', 40, 10),
            e("w3", 'E', 40, 10),
            e("w4", 'F', 40, 10),
        ],
        ..Default::default()
    };
    let out = encode(&p, &opts(10));
    // other: 0..10, (no glyphs, already aligned), wide: 10..20
    // " B " -> 23, " D " -> 26, " E " -> 29, 1 cell left -> pad to 30, " F " -> 33
    let expected = [
        "other     ",
        "wide      ",
        " B ",
        " D ",
        " E ",
        " ",
        " F ",
    ]
    .concat();
    assert_eq!(out, expected);
}

#[test]
fn wide_glyph_stays_when_three_cells_remain() {
    let p = Partition {
        wide: vec![e("w1", 'B', 40, 10), e("w2", 'D', 40, 10), e("w3", 'E', 40, 10)],
        ..Default::default()
    };
    let out = encode(&p, &opts(9));
    // other: 0..9, wide: 9..18, " B " -> 21 (6 left), " D " -> 24 (3 left), " E " -> 27
    assert_eq!(out, "other    wide      B  D  E ");
}

#[test]
fn header_equal_to_tab_width_is_not_padded() {
    let p = Partition {
        grouped: vec![EmoteGroup {
            prefix: "pepe".into(),
            emotes: vec![e("pepeA", 'a', 10, 10), e("pepeB", 'b', 10, 10)],
        }],
        ..Default::default()
    };
    let o = LayoutOptions {
        tab_width: 4,
        non_grouped_name: "oth".into(),
        wide_name: "wd".into(),
    };
    assert_eq!(encode(&p, &o), "pepeab  oth wd  ");
}

#[test]
fn glyph_run_ending_on_boundary_gets_no_trailing_pad() {
    let p = Partition {
        ungrouped: vec![
            e("a", 'a', 1, 1),
            e("b", 'b', 1, 1),
            e("c", 'c', 1, 1),
            e("d", 'd', 1, 1),
            e("e", 'e', 1, 1),
        ],
        ..Default::default()
    };
    let out = encode(&p, &opts(10));
    assert_eq!(out, "other     abcde     wide      ");
    let o = LayoutOptions {
        tab_width: 5,
        non_grouped_name: "oth".into(),
        wide_name: "wd".into(),
    };
    // "oth  " then five glyphs land exactly on 10
    assert_eq!(encode(&p, &o), "oth  abcdewd   ");
}

#[test]
fn tab_width_one_never_pads() {
    let p = Partition {
        ungrouped: vec![e("a", 'a', 1, 1)],
        wide: vec![e("w", 'w', 9, 1)],
        ..Default::default()
    };
    assert_eq!(encode(&p, &opts(1)), "otherawide w ");
}

#[test]
fn options_come_from_config() {
    let cfg = EmoteConfig::builder()
        .tab_width(6)
        .non_grouped_name("misc")
        .wide_name("big")
        .build();
    let o = LayoutOptions::from(&cfg);
    assert_eq!(o.tab_width, 6);
    assert_eq!(o.non_grouped_name, "misc");
    assert_eq!(o.wide_name, "big");
    assert_eq!(encode(&Partition::default(), &o), "misc  big   ");
}
