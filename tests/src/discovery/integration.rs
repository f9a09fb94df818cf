#![cfg(test)]
use tagcrawl_common::error::TagError;
use tagcrawl_common::plc::composite::{CompositeType, MemberDescriptor};
use tagcrawl_common::plc::scalar::Scalar;
use tagcrawl_common::plc::tag::Catalog;
use tagcrawl_core::tabular;

use crate::util::{LINE_IP, line_plc, service};

/// Nested structures flatten into dot paths; padding members and program
/// scopes never show up.
#[tokio::test]
async fn catalog_flattens_nested_stations() -> anyhow::Result<()> {
    let plc = line_plc();
    let catalog: Catalog = service(&plc).build_catalog(LINE_IP).await?;

    let paths: Vec<&str> = catalog.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "BatchCount",
            "Filler.Drive.Running",
            "Filler.Drive.Speed",
            "Filler.Recipe",
            "Labeler.Drive.Running",
            "Labeler.Drive.Speed",
            "Labeler.Recipe",
        ]
    );
    assert!(catalog.values().all(|tag| tag.value.is_none()));
    assert_eq!(catalog["Filler.Drive.Speed"].data_type, "REAL");
    assert_eq!(catalog["BatchCount"].source_address.as_str(), LINE_IP);
    Ok(())
}

#[tokio::test]
async fn snapshot_keeps_slow_tags_without_a_value() -> anyhow::Result<()> {
    let plc = line_plc();
    let snapshot: Catalog = service(&plc).snapshot(LINE_IP, None).await?;

    assert_eq!(snapshot.len(), 7);
    assert_eq!(snapshot["BatchCount"].value, Some(Scalar::Int(412)));
    assert_eq!(snapshot["Filler.Recipe"].value, Some(Scalar::Text("cola-330".into())));
    assert_eq!(snapshot["Labeler.Drive.Speed"].value, None);
    assert_eq!(plc.sessions_opened(), plc.sessions_closed());
    Ok(())
}

#[tokio::test]
async fn snapshot_exports_one_row_per_tag() -> anyhow::Result<()> {
    let plc = line_plc();
    let snapshot: Catalog = service(&plc).snapshot(LINE_IP, None).await?;
    let text: String = tabular::catalog_to_tab_delimited(&snapshot)?;

    let rows: Vec<Vec<&str>> = text.lines().skip(1).map(|line| line.split('\t').collect()).collect();
    assert_eq!(rows.len(), snapshot.len());
    assert_eq!(&rows[0][..4], &["BatchCount", "DINT", "412", LINE_IP]);
    assert!(rows.iter().any(|row| row[0] == "Labeler.Drive.Speed" && row[2].is_empty()));
    Ok(())
}

#[tokio::test]
async fn non_controllers_are_turned_away() {
    let plc = line_plc().with_device_type("Communications Adapter");
    let result = service(&plc).snapshot(LINE_IP, None).await;

    assert!(matches!(result, Err(TagError::NotAController { .. })));
    assert_eq!(plc.reads_attempted(), 0);
}

#[tokio::test]
async fn self_referencing_structures_fail_the_catalog() {
    let plc = line_plc().with_tag("Chain", "NODE").with_composite(CompositeType::new(
        "NODE",
        vec![
            MemberDescriptor::new("NODE", ""),
            MemberDescriptor::new("Id", "DINT"),
            MemberDescriptor::new("Next", "NODE"),
        ],
    ));
    let result = service(&plc).build_catalog(LINE_IP).await;

    assert!(matches!(
        result,
        Err(TagError::CompositeTypeCycle { ref type_name, .. }) if type_name == "NODE"
    ));
    assert_eq!(plc.sessions_opened(), plc.sessions_closed());
    assert_eq!(plc.reads_attempted(), 0);
}
