//! Integration tests for command helpers

use espn_flb_stats::{
    commands::{resolve_league_id, stat_names::render_stat_names},
    espn::stat_map::StatNameMap,
    LeagueId, ScrapeError, LEAGUE_ID_ENV_VAR,
};

#[test]
fn test_resolve_league_id_from_option() {
    let result = resolve_league_id(Some(LeagueId::new(12345)));
    assert_eq!(result.unwrap().as_u32(), 12345);
}

// Env-var cases share one test so they never race each other.
#[test]
fn test_resolve_league_id_from_env() {
    std::env::set_var(LEAGUE_ID_ENV_VAR, " 54321 ");
    assert_eq!(resolve_league_id(None).unwrap().as_u32(), 54321);

    std::env::set_var(LEAGUE_ID_ENV_VAR, "not_a_number");
    assert!(matches!(
        resolve_league_id(None),
        Err(ScrapeError::InvalidId(_))
    ));

    std::env::remove_var(LEAGUE_ID_ENV_VAR);
    match resolve_league_id(None) {
        Err(ScrapeError::MissingLeagueId { env_var }) => assert_eq!(env_var, LEAGUE_ID_ENV_VAR),
        other => panic!("Expected MissingLeagueId error, got {:?}", other),
    }

    // An explicit id wins over the environment.
    std::env::set_var(LEAGUE_ID_ENV_VAR, "1");
    assert_eq!(
        resolve_league_id(Some(LeagueId::new(2))).unwrap(),
        LeagueId::new(2)
    );
    std::env::remove_var(LEAGUE_ID_ENV_VAR);
}

#[test]
fn test_render_stat_names_json_includes_builtins() {
    let rendered = render_stat_names(&StatNameMap::builtin(), true).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed["5"], "HR");
    assert_eq!(parsed["21"], "RBI");
}
