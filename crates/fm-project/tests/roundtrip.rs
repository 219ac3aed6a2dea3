use fm_analysis::InclusionMode;
use fm_feed::{Nutrient, ReportKey};
use fm_project::{
    Formulation, ProjectError, load, load_json, load_yaml, read_csv, save, save_json, save_yaml,
    write_csv,
};
use fm_recommend::{GrowthPhase, TargetOverride};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(name)
}

fn sample() -> Formulation {
    let mut f = Formulation::starter("Broiler grower");
    f.phase = GrowthPhase::Grower;
    f.inclusion_mode = InclusionMode::KgPerTon;
    f.enzymes[0].dosage_g_per_ton = 100.0;
    f.overrides.set(
        ReportKey::nutrient(Nutrient::CrudeProtein),
        TargetOverride::new(20.5, 21.5),
    );
    f.overrides
        .set(ReportKey::nutrient(Nutrient::Choline), TargetOverride::floor(1500.0));
    f.units
        .set(ReportKey::nutrient(Nutrient::MetabolizableEnergy), "MJ/kg")
        .unwrap();
    f
}

#[test]
fn roundtrip_yaml_empty_formulation() {
    let f = Formulation::new("Empty");
    let path = temp_path("fm_project_roundtrip_empty.yaml");
    save_yaml(&path, &f).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), f);
}

#[test]
fn roundtrip_yaml_with_settings() {
    let f = sample();
    let path = temp_path("fm_project_roundtrip_settings.yaml");
    save_yaml(&path, &f).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded, f);
    assert!(
        loaded
            .overrides
            .get(ReportKey::nutrient(Nutrient::Choline))
            .unwrap()
            .max
            .is_infinite()
    );
}

#[test]
fn roundtrip_json_with_settings() {
    let f = sample();
    let path = temp_path("fm_project_roundtrip_settings.json");
    save_json(&path, &f).unwrap();
    assert_eq!(load_json(&path).unwrap(), f);
}

#[test]
fn extension_picks_the_format() {
    let f = sample();
    let path = temp_path("fm_project_by_extension.yml");
    save(&path, &f).unwrap();
    assert_eq!(load(&path).unwrap(), f);

    let err = save(&temp_path("fm_project_by_extension.txt"), &f).unwrap_err();
    assert!(matches!(err, ProjectError::UnsupportedFormat { .. }));
}

#[test]
fn invalid_formulation_is_not_saved() {
    let mut f = sample();
    f.ingredients[0].inclusion_pct = -1.0;
    let path = temp_path("fm_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &f),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn loaded_formulation_analyzes_like_the_original() {
    let f = sample();
    let path = temp_path("fm_project_analysis.yaml");
    save_yaml(&path, &f).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(loaded.analyze(), f.analyze());
    let rows = loaded.assess(&loaded.analyze());
    let cp = rows
        .iter()
        .find(|r| r.key == ReportKey::nutrient(Nutrient::CrudeProtein))
        .unwrap();
    assert!(cp.overridden);
    assert_eq!(cp.recommendation.min, 20.5);

    let me = rows
        .iter()
        .find(|r| r.key == ReportKey::nutrient(Nutrient::MetabolizableEnergy))
        .unwrap();
    assert_eq!(me.unit, "MJ/kg");
}

#[test]
fn csv_file_roundtrip() {
    let f = sample();
    let path = temp_path("fm_project_ingredients.csv");
    write_csv(&path, &f.ingredients).unwrap();

    let imported = read_csv(&path, &[]).unwrap();
    assert_eq!(imported.len(), f.ingredients.len());
    for (a, b) in f.ingredients.iter().zip(&imported) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.inclusion_pct, b.inclusion_pct);
        assert_eq!(a.nutrients, b.nutrients);
    }
}

#[test]
fn kg_per_ton_mode_survives_a_reload() {
    let yaml = "version: 1\nname: Mode\ninclusion_mode: kg_per_ton\n";
    let path = temp_path("fm_project_kg_per_ton.yaml");
    std::fs::write(&path, yaml).unwrap();

    let loaded = load(&path).unwrap();
    assert_eq!(loaded.inclusion_mode, InclusionMode::KgPerTon);
    assert_eq!(loaded.display_inclusion(2.5), (25.0, "kg/ton"));
}
