use std::path::PathBuf;

fn demos_dir() -> PathBuf {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("demos/formulations")
}

#[test]
fn demos_load_and_validate() {
    let demos = ["broiler_grower.yaml"];

    for rel in demos {
        let path = demos_dir().join(rel);
        let result = fm_project::load(&path);
        assert!(
            result.is_ok(),
            "demo failed validation: {} => {:?}",
            path.display(),
            result.err()
        );
    }
}

#[test]
fn grower_demo_sums_to_one_hundred() {
    let f = fm_project::load(&demos_dir().join("broiler_grower.yaml")).unwrap();
    let report = f.analyze();
    assert!((report.total_inclusion - 100.0).abs() < 1e-9);
    assert!(report.total_cost_per_ton > 0.0);
    assert_eq!(f.profile().get(fm_feed::ReportKey::TotalCostPerTon), None);
}
