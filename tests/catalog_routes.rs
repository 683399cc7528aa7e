//! Behaviour of the catalog browser's route table.

use std::collections::HashSet;
use std::sync::Arc;

use catalog_router::config::RouterConfig;
use catalog_router::routing::{Navigation, Navigator, Params, ResolveError, RouteTable};

mod common;
use common::params;

const DECLARED: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/characters", "character"),
    ("/Episodes", "episode"),
    ("/Locations", "location"),
    ("/characters/:id", "CharacterDetails"),
    ("/locations/:id", "LocationDetails"),
    ("/episodes/:id", "EpisodeDetails"),
];

fn catalog() -> RouteTable {
    RouteTable::catalog().unwrap()
}

#[test]
fn test_declared_table() {
    let table = catalog();
    let declared: Vec<(String, String)> = table
        .routes()
        .iter()
        .map(|r| (r.path.to_string(), r.name.clone()))
        .collect();
    let expected: Vec<(String, String)> = DECLARED
        .iter()
        .map(|(p, n)| (p.to_string(), n.to_string()))
        .collect();
    assert_eq!(declared, expected);
}

#[test]
fn test_every_static_route_resolves_to_itself() {
    let table = catalog();
    for route in table.routes().iter().filter(|r| r.path.is_static()) {
        let resolved = table.resolve_by_path(route.path.as_str()).unwrap();
        assert_eq!(resolved.name(), route.name);
    }
}

#[test]
fn test_every_parameterized_route_resolves() {
    let table = catalog();
    for (path, name) in [
        ("/characters/42", "CharacterDetails"),
        ("/locations/3", "LocationDetails"),
        ("/episodes/28", "EpisodeDetails"),
    ] {
        let resolved = table.resolve_by_path(path).unwrap();
        assert_eq!(resolved.name(), name);
        assert_eq!(resolved.params().len(), 1);
    }
}

#[test]
fn test_character_details_params() {
    let table = catalog();
    let resolved = table.resolve_by_path("/characters/42").unwrap();
    assert_eq!(resolved.name(), "CharacterDetails");
    assert_eq!(resolved.params(), &params(&[("id", "42")]));
    assert_eq!(resolved.props(), params(&[("id", "42")]));
    assert_eq!(resolved.view().0, "CharacterDetails");
}

#[test]
fn test_list_routes_forward_no_props() {
    let table = catalog();
    let resolved = table.resolve_by_path("/characters").unwrap();
    assert_eq!(resolved.view().0, "Character");
    assert!(resolved.props().is_empty());
}

#[test]
fn test_resolve_by_name() {
    let table = catalog();
    assert_eq!(
        table.resolve_by_name("CharacterDetails", &params(&[("id", "7")])).unwrap(),
        "/characters/7"
    );
    assert_eq!(table.resolve_by_name("Home", &Params::new()).unwrap(), "/");
    assert_eq!(table.resolve_by_name("episode", &Params::new()).unwrap(), "/Episodes");
}

#[test]
fn test_resolve_by_name_unknown() {
    let table = catalog();
    assert_eq!(
        table.resolve_by_name("NoSuchRoute", &Params::new()),
        Err(ResolveError::UnknownRouteName("NoSuchRoute".into()))
    );
}

#[test]
fn test_resolve_by_name_missing_parameter() {
    let table = catalog();
    assert_eq!(
        table.resolve_by_name("CharacterDetails", &Params::new()),
        Err(ResolveError::MissingParameter {
            route: "CharacterDetails".into(),
            param: "id".into(),
        })
    );
}

#[test]
fn test_reverse_then_forward() {
    let table = catalog();
    for name in ["CharacterDetails", "LocationDetails", "EpisodeDetails"] {
        let path = table.resolve_by_name(name, &params(&[("id", "Morty Smith")])).unwrap();
        let resolved = table.resolve_by_path(&path).unwrap();
        assert_eq!(resolved.name(), name);
        assert_eq!(resolved.params()["id"], "Morty Smith");
    }
}

#[test]
fn test_reverse_then_forward_dot_ids() {
    let table = catalog();
    for id in ["..", "."] {
        let path = table
            .resolve_by_name("CharacterDetails", &params(&[("id", id)]))
            .unwrap();
        let resolved = table.resolve_by_path(&path).unwrap();
        assert_eq!(resolved.name(), "CharacterDetails", "id {:?} via {}", id, path);
        assert_eq!(resolved.params()["id"], id);
    }

    let literal = table.resolve_by_path("/characters/..").unwrap();
    assert_eq!(literal.name(), "CharacterDetails");
    assert_eq!(literal.params()["id"], "..");
}

#[test]
fn test_names_are_distinct() {
    let table = catalog();
    let names: HashSet<&str> = table.routes().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), table.len());
}

#[test]
fn test_case_insensitive_by_default() {
    let table = catalog();
    assert_eq!(table.resolve_by_path("/episodes").unwrap().name(), "episode");
    assert_eq!(table.resolve_by_path("/locations").unwrap().name(), "location");
    assert_eq!(table.resolve_by_path("/CHARACTERS/1").unwrap().name(), "CharacterDetails");
}

#[test]
fn test_case_sensitive_config() {
    let mut config = RouterConfig::default();
    config.history.case_sensitive = true;
    let table = RouteTable::from_config(&config).unwrap();

    assert!(table.resolve_by_path("/episodes").is_none());
    assert_eq!(table.resolve_by_path("/Episodes").unwrap().name(), "episode");
}

#[test]
fn test_query_hash_and_trailing_slash() {
    let table = catalog();
    let resolved = table.resolve_by_path("/characters/5/?tab=episodes#list").unwrap();
    assert_eq!(resolved.name(), "CharacterDetails");
    assert_eq!(resolved.params()["id"], "5");
    assert_eq!(resolved.location().query["tab"], "episodes");
    assert_eq!(resolved.location().hash.as_deref(), Some("list"));
}

#[test]
fn test_unmatched_paths() {
    let table = catalog();
    assert!(table.resolve_by_path("/planets").is_none());
    assert!(table.resolve_by_path("/characters/1/episodes").is_none());
    assert!(table.resolve_by_path("https://example.com/characters/1").is_none());

    match table.navigate("/planets") {
        Navigation::NotFound { fallback, .. } => {
            assert_eq!(fallback.unwrap().name, "NotFound");
        }
        other => panic!("expected not found, got {:?}", other),
    }
}

#[test]
fn test_mounted_under_base() {
    let mut config = RouterConfig::default();
    config.history.base = "/rick-and-morty/".into();
    let table = RouteTable::from_config(&config).unwrap();

    let resolved = table.resolve_by_path("/rick-and-morty/episodes/1").unwrap();
    assert_eq!(resolved.name(), "EpisodeDetails");
    assert_eq!(
        table.href("EpisodeDetails", &params(&[("id", "1")])).unwrap(),
        "/rick-and-morty/episodes/1"
    );
    assert_eq!(table.href("Home", &Params::new()).unwrap(), "/rick-and-morty");
}

#[test]
fn test_navigator_session() {
    let table = Arc::new(catalog());
    let mut nav = Navigator::new(table.clone());

    nav.push("/characters");
    nav.push_named("CharacterDetails", &params(&[("id", "1")])).unwrap();
    assert_eq!(nav.current().full_path, "/characters/1");

    nav.back();
    assert_eq!(nav.current().route.as_deref(), Some("character"));

    let err = nav.push_named("CharacterDetails", &Params::new()).unwrap_err();
    assert!(matches!(err, ResolveError::MissingParameter { .. }));
    assert_eq!(nav.current().route.as_deref(), Some("character"));
}
