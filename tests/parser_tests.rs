//! End-to-end parsing scenarios.

use chrono::{NaiveDate, NaiveDateTime};
use seriarr::{EpisodeId, IdKind, IdMode, ParseInput, WarningKind, parse};

fn parsed(name: &str, data: &str) -> seriarr::ParseResult {
    parse(&ParseInput::new(name, data)).expect("parse should not error")
}

fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn scene_release_with_quality_and_group() {
    let r = parsed("Some Show", "Some.Show.S01E02.720p.HDTV.x264-GRP");
    assert!(r.valid());
    assert_eq!(r.id_kind(), Some(IdKind::Ep));
    assert_eq!(r.season(), Some(1));
    assert_eq!(r.episode(), Some(2));
    assert_eq!(r.quality.name, "720p hdtv");
    assert_eq!(r.identifier().as_deref(), Some("S01E02"));
    assert_eq!(r.proper_count, 0);
}

#[test]
fn cross_format_with_end_episode() {
    let r = parsed("Some Show", "Some Show 1x02-03");
    assert_eq!(r.season(), Some(1));
    assert_eq!(r.episode(), Some(2));
    assert_eq!(r.end_episode(), Some(3));
    assert_eq!(r.identifier().as_deref(), Some("S01E02"));
}

#[test]
fn airdate_identifier() {
    let input = ParseInput::new("Daily Show", "Daily.Show.2011-05-23").now(noon(2012, 1, 1));
    let r = parse(&input).unwrap();
    assert_eq!(r.id_kind(), Some(IdKind::Date));
    assert_eq!(
        r.id,
        Some(EpisodeId::Date(NaiveDate::from_ymd_opt(2011, 5, 23).unwrap()))
    );
    assert_eq!(r.identifier().as_deref(), Some("2011-05-23"));
    assert_eq!(
        r.id_groups.as_deref(),
        Some(&["2011".to_string(), "05".to_string(), "23".to_string()][..])
    );
}

#[test]
fn anime_sequence_with_version() {
    let r = parsed("Anime", "[Grp] Anime - 12v2 [720p]");
    assert_eq!(r.id_kind(), Some(IdKind::Sequence));
    assert_eq!(r.season(), Some(0));
    assert_eq!(r.episode(), Some(12));
    assert_eq!(r.proper_count, 1);
    assert_eq!(r.quality.name, "720p");
    assert_eq!(r.identifier().as_deref(), Some("12"));
}

#[test]
fn season_pack_is_invalid() {
    let r = parsed("Show", "Show Season 2 Complete");
    assert!(!r.valid());
    assert!(r.warning.is_none());
}

#[test]
fn part_roman_reads_as_episode() {
    // ep strategy outranks sequence, so Part IV is S01E04
    let r = parsed("Show", "Show Part IV");
    assert_eq!(r.id_kind(), Some(IdKind::Ep));
    assert_eq!(r.season(), Some(1));
    assert_eq!(r.episode(), Some(4));
}

#[test]
fn disc_and_all_markers_are_invalid() {
    assert!(!parsed("Show", "Show S03D01 extras").valid());
    assert!(!parsed("Show", "Show 1xAll").valid());
    assert!(!parsed("Show", "Show disc 2").valid());
    assert!(!parsed("Show", "Show seasons 1 2 3 4").valid());
}

#[test]
fn proper_markers_are_counted() {
    let r = parsed("Some Show", "Some.Show.S01E02.PROPER.720p.HDTV");
    assert_eq!(r.proper_count, 1);
    assert!(r.proper());

    let r = parsed("Some Show", "Some.Show.S01E02.REPACK.REAL.720p");
    assert_eq!(r.proper_count, 2);
}

#[test]
fn special_becomes_the_identifier() {
    let r = parsed("Some Show", "Some.Show.Special.Christmas.720p");
    assert!(r.valid());
    assert!(r.special);
    assert_eq!(r.id_kind(), Some(IdKind::Special));
    assert_eq!(r.identifier().as_deref(), Some("christmas"));
}

#[test]
fn special_flag_coexists_with_episode_numbering() {
    let r = parsed("Some Show", "Some.Show.S01E02.OVA.720p");
    assert!(r.special);
    assert_eq!(r.id_kind(), Some(IdKind::Ep));
}

#[test]
fn no_numbering_yields_warning() {
    let r = parsed("Some Show", "Some.Show.Episodes");
    assert!(!r.valid());
    let warning = r.warning.expect("warning expected");
    assert_eq!(warning.kind, WarningKind::NoIdentifier);
    assert_eq!(warning.data, "Some.Show.Episodes");
}

#[test]
fn name_miss_is_invalid_without_warning() {
    let r = parsed("Some Show", "Other Show S01E02");
    assert!(!r.valid());
    assert!(r.warning.is_none());
}

#[test]
fn strict_name_rejects_distant_identifiers() {
    let strict = ParseInput::new("Foo", "Foo bar baz S01E02").strict_name(true);
    assert!(!parse(&strict).unwrap().valid());

    let adjacent = ParseInput::new("Foo", "Foo.S01E02").strict_name(true);
    assert!(parse(&adjacent).unwrap().valid());
}

#[test]
fn strict_name_applies_to_dates() {
    let strict = ParseInput::new("Foo", "Foo bar baz 2011-05-23")
        .strict_name(true)
        .now(noon(2012, 1, 1));
    assert!(!parse(&strict).unwrap().valid());

    let adjacent = ParseInput::new("Foo", "Foo 2011-05-23")
        .strict_name(true)
        .now(noon(2012, 1, 1));
    assert!(parse(&adjacent).unwrap().valid());
}

#[test]
fn group_allow_list() {
    let ok = ParseInput::new("Some Show", "Some.Show.S01E02.720p-GRP").allow_groups(["grp"]);
    let r = parse(&ok).unwrap();
    assert!(r.valid());
    assert_eq!(r.group.as_deref(), Some("grp"));

    let bracket = ParseInput::new("Anime", "[Grp] Anime - 12").allow_groups(["grp"]);
    let r = parse(&bracket).unwrap();
    assert!(r.valid());
    assert_eq!(r.group.as_deref(), Some("grp"));

    let wrong = ParseInput::new("Some Show", "Some.Show.S01E02.720p-GRP").allow_groups(["other"]);
    assert!(!parse(&wrong).unwrap().valid());
}

#[test]
fn ep_mode_fallback_recovers_bare_numbering() {
    let ep_mode = ParseInput::new("Foo", "Foo 0102").mode(IdMode::Ep);
    let r = parse(&ep_mode).unwrap();
    assert_eq!(r.season(), Some(1));
    assert_eq!(r.episode(), Some(2));

    // auto mode has no such fallback
    let auto = ParseInput::new("Foo", "Foo 0102");
    assert!(!parse(&auto).unwrap().valid());
}

#[test]
fn seasonless_policy() {
    let allowed = parsed("Foo", "Foo ep 5");
    assert_eq!(allowed.season(), Some(1));
    assert_eq!(allowed.episode(), Some(5));

    // with seasonless eps rejected, the bare number reads as a sequence
    let input = ParseInput::new("Foo", "Foo ep 5").allow_seasonless(false);
    let r = parse(&input).unwrap();
    assert_eq!(r.id_kind(), Some(IdKind::Sequence));
    assert_eq!(r.episode(), Some(5));
}

#[test]
fn oversized_pack_is_invalid() {
    assert!(!parsed("Foo", "Foo 1x01-05").valid());
    assert!(parsed("Foo", "Foo 1x01-03").valid());
}

#[test]
fn huge_range_is_not_a_pack() {
    let r = parsed("Foo", "Foo S01E01-E13");
    assert!(r.valid());
    assert_eq!(r.episode(), Some(1));
    assert_eq!(r.end_episode(), None);
}

#[test]
fn opaque_id_strategy() {
    let r = parsed("Foo", "Foo.2008x03.005");
    assert_eq!(r.id_kind(), Some(IdKind::Id));
    assert_eq!(r.identifier().as_deref(), Some("2008-03-005"));
}

#[test]
fn season_only_marker_blocks_late_strategies() {
    let r = parsed("Foo", "Foo Season 2 2011-05-23");
    assert!(!r.valid());
}

#[test]
fn ampersand_names_match_and_spelling() {
    assert!(parsed("Law & Order", "Law.and.Order.S01E01").valid());
    assert!(parsed("Law and Order", "Law.&.Order.1x01").valid());
}

#[test]
fn bracket_prefix_is_ignored_without_groups() {
    let r = parsed("Anime", "[Whatever] Anime - 07");
    assert!(r.valid());
    assert_eq!(r.id_kind(), Some(IdKind::Sequence));
    assert_eq!(r.episode(), Some(7));
    assert!(r.group.is_none());
}

#[test]
fn quality_hint_skips_scanning() {
    let hint = seriarr::Quality::from_name("1080p bluray").unwrap();
    let input = ParseInput::new("Some Show", "Some.Show.S01E02.720p.HDTV").quality_hint(hint);
    let r = parse(&input).unwrap();
    assert_eq!(r.quality, hint);
    // the 720p token is still stripped before identifier matching
    assert_eq!(r.identifier().as_deref(), Some("S01E02"));
}

#[test]
fn date_dayfirst_override() {
    let input = ParseInput::new("Daily Show", "Daily Show 05-06-2011")
        .date_dayfirst(false)
        .now(noon(2012, 1, 1));
    let r = parse(&input).unwrap();
    assert_eq!(r.identifier().as_deref(), Some("2011-05-06"));
}

#[test]
fn future_dates_never_match() {
    let input = ParseInput::new("Daily Show", "Daily Show 2011-05-23").now(noon(2011, 5, 1));
    let r = parse(&input).unwrap();
    assert!(!r.valid());
}

#[test]
fn user_ep_regexps_take_priority() {
    let input = ParseInput::new("Foo", "Foo Folge 7")
        .ep_regexps([r"folge\s(\d{1,3})"]);
    let r = parse(&input).unwrap();
    assert_eq!(r.season(), Some(1));
    assert_eq!(r.episode(), Some(7));
}

#[test]
fn user_name_regexps_take_over_matching() {
    let input = ParseInput::new("ignored", "f-o-o S01E02").name_regexps([r"^f-o-o"]);
    let r = parse(&input).unwrap();
    assert!(r.valid());
    assert_eq!(r.identifier().as_deref(), Some("S01E02"));
}

#[test]
fn identifier_reparse_is_stable() {
    let first = parsed("Some Show", "Some.Show.S03E07.720p");
    let identifier = first.identifier().unwrap();
    assert_eq!(identifier, "S03E07");

    let again = parsed("Some Show", &format!("Some Show {identifier}"));
    assert_eq!(again.identifier().unwrap(), identifier);
}

#[test]
fn codec_numbers_do_not_become_episodes() {
    let r = parsed("Some Show", "Some.Show.S01E02.x264");
    assert_eq!(r.identifier().as_deref(), Some("S01E02"));

    // h264 must not read as "part 264" or similar
    let r = parsed("Some Show", "Some.Show.5.of.10.h264");
    assert_eq!(r.season(), Some(1));
    assert_eq!(r.episode(), Some(5));
}

#[test]
fn episode_word_forms() {
    assert_eq!(parsed("Foo", "Foo Season 3 Episode 11").episode(), Some(11));
    assert_eq!(parsed("Foo", "Foo series 2 ep 7").season(), Some(2));
    assert_eq!(parsed("Foo", "Foo part three").episode(), Some(3));
    assert_eq!(parsed("Foo", "Foo 4 of 10").episode(), Some(4));
}
