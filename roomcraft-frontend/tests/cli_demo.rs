use roomcraft_config::AppConfig;
use roomcraft_frontend::loader::{ProjectSource, load_session};
use roomcraft_frontend::run_cli_demo;
use roomcraft_io::{JsonDirRepository, ProjectRepository};

#[test]
fn demo_saves_edited_project_and_reloads_it() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = AppConfig::default();
    config.storage.projects_dir = Some(dir.path().join("projects"));
    config.storage.owner = "tester".to_string();

    run_cli_demo(&config, None).expect("demo runs");

    let repo = JsonDirRepository::open(dir.path().join("projects"), false).unwrap();
    let records = repo.list("tester").unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.name, "Demo Living Room");
    // 默认四面围墙 + 演示中绘制的两段墙
    assert_eq!(record.walls.len(), 6);
    let names: Vec<&str> = record.furniture.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["Sofa", "Coffee Table", "Sofa"]);
    assert!((record.furniture[0].rotation.y() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    let loaded = load_session(&config, Some(record.id));
    assert_eq!(loaded.source, ProjectSource::Stored(record.id));
    assert_eq!(loaded.session.project().unwrap().furniture.len(), 3);
}

#[test]
fn demo_runs_without_storage() {
    let config = AppConfig::default();
    run_cli_demo(&config, None).expect("demo runs in memory");
}
