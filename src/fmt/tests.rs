use super::Formatter;
use crate::parser::parse;

fn render(name: &str) -> String {
    let query = parse(name).unwrap();
    Formatter::new().format(&query).unwrap()
}

#[test]
fn test_fmt_canonical_names_are_unchanged() {
    for name in [
        "findByNameAndAgeGreaterThan",
        "countDistinctByStatus",
        "existsByEmailIgnoreCase",
        "findByAgeNotBetween",
        "getMaxAge",
        "findFirst5EmailByStatus",
        "deleteAll",
        "updateByStatus",
        "count",
        "streamByStatusOrderByCreatedDesc",
    ] {
        assert_eq!(render(name), name);
    }
}

#[test]
fn test_fmt_drops_prefix() {
    assert_eq!(render("activeUsersFindByStatus"), "findByStatus");
}

#[test]
fn test_fmt_writes_default_direction() {
    assert_eq!(
        render("findFirst3DistinctByLastNameOrderByFirstNameDescLastName"),
        "findFirst3DistinctByLastNameOrderByFirstNameDescLastNameAsc"
    );
    assert_eq!(
        render("findAllOrderByNameDesc_Age"),
        "findAllOrderByNameDescAgeAsc"
    );
}

#[test]
fn test_fmt_adds_all_without_criteria() {
    assert_eq!(render("findOrderByName"), "findAllOrderByNameAsc");
    assert_eq!(render("list"), "listAll");
}

#[test]
fn test_fmt_capitalizes_nested_segments() {
    assert_eq!(
        render("findByAddress_cityAndAgeNotEqual"),
        "findByAddress_CityAndAgeNotEqual"
    );
}

#[test]
fn test_fmt_writes_equal_when_negated() {
    assert_eq!(
        render("findByNameNotIgnoreCase"),
        "findByNameNotIgnoreCaseEqual"
    );
}

#[test]
fn test_fmt_round_trip() {
    for name in [
        "findFirst3DistinctByLastNameOrderByFirstNameDescLastName",
        "getAvgSalary_AmountByDepartment",
        "findByNameIgnoreCaseNotLike",
        "findByNameIgnoreCaseNotAndAge",
        "findByNameNotOrderByAge",
        "findByName_OrderByAge",
        "findByEmailNullOrAgeLessThanEqual",
        "findAllOrderByName_Age",
        "myReportsListDistinctByOwner",
        "findByname",
        "findFirstName",
    ] {
        let query = parse(name).unwrap();
        let rendered = query.to_string();
        assert_eq!(parse(&rendered).unwrap(), query, "{} -> {}", name, rendered);
    }
}

#[test]
fn test_display_matches_formatter() {
    let query = parse("findByNameOrderByAgeDesc").unwrap();
    assert_eq!(
        query.to_string(),
        Formatter::new().format(&query).unwrap()
    );
}
