//! Scenario tests for full request parameter assembly.

use solrkit::prelude::*;

fn field_map() -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("title", FieldInfo::from_solr_name("tm_title").fulltext());
    fields.insert("body", FieldInfo::from_solr_name("tm_body").fulltext());
    fields.insert("type", FieldInfo::from_solr_name("ss_type"));
    fields.insert("year", FieldInfo::from_solr_name("im_year"));
    fields.insert("created", FieldInfo::from_solr_name("ds_created"));
    fields.insert("coordinates", FieldInfo::from_solr_name("locs_coordinates"));
    fields
}

#[test]
fn test_full_request_with_all_assemblers() -> Result<()> {
    let mut seed = QueryParams::new();
    seed.add("q", "cat");
    seed.add("fq", "locs_coordinates:[10 TO 20]");

    let mut assembler =
        ParamsAssembler::new(field_map(), SchemaVersion::new(4, 5)).with_params(seed);
    assembler.request_sort("coordinates", SortDirection::Asc);
    assembler.request_sort("title", SortDirection::Desc);

    let spatial = SpatialOptions {
        field: Some("coordinates".into()),
        lat: Some(52.5),
        lon: Some(13.4),
        radius: Some(15.0),
        ..SpatialOptions::default()
    };
    assembler.apply_spatial(&[spatial]);
    assembler.apply_sorts(&SortOptions::default())?;
    assembler.apply_grouping(&GroupingOptions {
        fields: vec!["type".into()],
        ..GroupingOptions::default()
    })?;
    assembler.apply_highlighting(
        &HighlightOptions {
            excerpt: true,
            ..HighlightOptions::default()
        },
        &HighlightDefaults::default(),
    );

    let (params, warnings) = assembler.finish();
    assert!(warnings.is_empty());

    // The pre-existing range filter on the spatial field was absorbed and
    // tightened; the unrelated query parameter survived.
    assert_eq!(params.get("q"), Some("cat"));
    assert_eq!(
        params.get_all("fq"),
        vec!["{!frange l=10 u=15}geodist(locs_coordinates,52.5,13.4)"]
    );

    // The location sort was rewritten by spatial assembly before sort
    // resolution; the fulltext sort resolved to its companion field.
    assert_eq!(
        params.get("sort"),
        Some("geodist(locs_coordinates,52.5,13.4) asc,sort_title desc")
    );

    assert_eq!(params.get("group"), Some("true"));
    assert_eq!(params.get_all("group.field"), vec!["ss_type"]);
    assert_eq!(params.get("hl"), Some("true"));
    assert_eq!(params.get_all("hl.fl"), vec!["spell"]);
    Ok(())
}

#[test]
fn test_fulltext_sort_uses_companion_on_recent_schema() -> Result<()> {
    let mut assembler = ParamsAssembler::new(field_map(), "4.5".parse()?);
    assembler.request_sort("title", SortDirection::Asc);
    assembler.apply_sorts(&SortOptions::default())?;

    let (params, _) = assembler.finish();
    assert_eq!(params.get("sort"), Some("sort_title asc"));
    Ok(())
}

#[test]
fn test_grouping_mixes_valid_and_rejected_fields() -> Result<()> {
    let mut assembler = ParamsAssembler::new(field_map(), SchemaVersion::new(4, 5));
    assembler.apply_grouping(&GroupingOptions {
        fields: vec!["body".into(), "type".into()],
        ..GroupingOptions::default()
    })?;

    let (params, warnings) = assembler.finish();
    assert_eq!(params.get_all("group.field"), vec!["ss_type"]);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("body"));
    Ok(())
}

#[test]
fn test_flattened_keywords_feed_the_query_parameter() {
    let expr = KeywordExpr::and(vec![
        KeywordExpr::term("cat"),
        KeywordExpr::or(vec![KeywordExpr::term("dog"), KeywordExpr::term("bird")]),
    ]);

    let mut params = QueryParams::new();
    params.set("q", flatten(&expr));
    assert_eq!(params.get("q"), Some("(+cat +(dog bird))"));
}

#[test]
fn test_keyword_tree_from_request_json() {
    let json = r#"{
        "conjunction": "OR",
        "negation": true,
        "children": ["cat"]
    }"#;
    let expr: KeywordExpr = serde_json::from_str(json).unwrap();
    assert_eq!(flatten(&expr), "-cat");
}

#[test]
fn test_assemblers_are_independent() -> Result<()> {
    // Highlighting alone touches no sort or grouping parameters.
    let mut assembler = ParamsAssembler::new(field_map(), SchemaVersion::new(4, 5));
    assembler.apply_highlighting(
        &HighlightOptions {
            highlight: true,
            ..HighlightOptions::default()
        },
        &HighlightDefaults::default(),
    );
    let (params, _) = assembler.finish();
    assert!(!params.contains_key("sort"));
    assert!(!params.contains_key("group"));
    assert_eq!(params.get_all("hl.fl"), vec!["*"]);

    // Grouping alone touches no highlighting parameters.
    let mut assembler = ParamsAssembler::new(field_map(), SchemaVersion::new(4, 5));
    assembler.apply_grouping(&GroupingOptions {
        fields: vec!["type".into()],
        ..GroupingOptions::default()
    })?;
    let (params, _) = assembler.finish();
    assert!(!params.contains_key("hl"));
    Ok(())
}
