use super::*;

#[test]
fn parse_splits_on_first_separator() {
    let id = VariantId::parse("rose-pastel").unwrap();
    assert_eq!(id.species, "rose");
    assert_eq!(id.theme.as_deref(), Some("pastel"));

    let id = VariantId::parse("tulip-deep-red").unwrap();
    assert_eq!(id.species, "tulip");
    assert_eq!(id.theme.as_deref(), Some("deep-red"));
    assert_eq!(id.to_string(), "tulip-deep-red");

    let bare = VariantId::parse(" daisy ").unwrap();
    assert_eq!(bare.species, "daisy");
    assert_eq!(bare.theme, None);
    assert_eq!(bare.to_string(), "daisy");
}

#[test]
fn parse_rejects_missing_species() {
    assert!(matches!(
        VariantId::parse(""),
        Err(GardenError::Validation(_))
    ));
    assert!(VariantId::parse("-pastel").is_err());
}

#[test]
fn catalog_groups_by_species_in_order() {
    let catalog = VariantCatalog::from_identifiers([
        "rose-pastel",
        "tulip-sunset",
        "rose-classic",
        "daisy",
        "rose-pastel",
    ])
    .unwrap();

    assert_eq!(
        catalog.all_variants(),
        &["rose-pastel", "tulip-sunset", "rose-classic", "daisy"]
    );
    assert_eq!(catalog.variants_for("rose"), &["rose-pastel", "rose-classic"]);
    assert_eq!(catalog.variants_for("daisy"), &["daisy"]);
    assert!(catalog.variants_for("orchid").is_empty());
    assert_eq!(
        catalog.species().collect::<Vec<_>>(),
        vec!["daisy", "rose", "tulip"]
    );
}

#[test]
fn catalog_propagates_parse_errors() {
    assert!(VariantCatalog::from_identifiers(["rose-pastel", ""]).is_err());
    let empty: [&str; 0] = [];
    assert!(VariantCatalog::from_identifiers(empty).unwrap().is_empty());
}

#[test]
fn species_of_reads_prefix() {
    assert_eq!(VariantCatalog::species_of("rose-pastel"), "rose");
    assert_eq!(VariantCatalog::species_of("daisy"), "daisy");
}
